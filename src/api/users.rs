use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use futures::TryStreamExt;

use crate::config::Config;
use crate::database::MongoDB;
use crate::models::User;
use crate::services::user_service::UserForm;
use crate::services::{file_service, user_service};
use crate::utils::error::{AppError, FieldError};

struct UploadedFile {
    original_name: String,
    data: Vec<u8>,
}

/// Collects the multipart body into the text fields and the optional file
/// part. Parts without a name, and file parts without a filename or bytes,
/// are skipped.
async fn read_form(payload: &mut Multipart) -> Result<(UserForm, Option<UploadedFile>), AppError> {
    let mut form = UserForm::default();
    let mut file = None;

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| AppError::Internal(format!("Failed to read multipart payload: {}", e)))?
    {
        let (name, original_name) = {
            let disposition = field.content_disposition();
            (
                disposition.get_name().unwrap_or_default().to_string(),
                disposition.get_filename().map(String::from),
            )
        };

        let mut data = Vec::new();
        while let Some(chunk) = field
            .try_next()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to read multipart payload: {}", e)))?
        {
            data.extend_from_slice(&chunk);
        }

        if name == "file" {
            if let Some(original_name) = original_name {
                if !original_name.is_empty() && !data.is_empty() {
                    file = Some(UploadedFile {
                        original_name,
                        data,
                    });
                }
            }
        } else {
            form.set_field(&name, String::from_utf8_lossy(&data).into_owned());
        }
    }

    Ok((form, file))
}

#[utoipa::path(
    post,
    path = "/create-user",
    tag = "Users",
    request_body(content = UserForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Validation error, duplicate email or unsupported file type"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_user(
    db: web::Data<MongoDB>,
    config: web::Data<Config>,
    mut payload: Multipart,
) -> HttpResponse {
    log::info!("👤 POST /create-user");

    match create_user_inner(&db, &config, &mut payload).await {
        Ok(user) => {
            log::info!("✅ User created: {}", user.email);
            HttpResponse::Created().json(serde_json::json!({
                "message": "User created successfully",
                "user": user
            }))
        }
        Err(e) => {
            log::warn!("❌ User creation failed: {}", e);
            e.to_response()
        }
    }
}

async fn create_user_inner(
    db: &MongoDB,
    config: &Config,
    payload: &mut Multipart,
) -> Result<User, AppError> {
    let (form, file) = read_form(payload).await?;

    let mut errors = form.validate();

    let file = match file {
        Some(file) => file,
        None => {
            errors.push(FieldError {
                field: "file".to_string(),
                message: "An image file is required".to_string(),
            });
            return Err(AppError::Validation(errors));
        }
    };

    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    // Stored before the insert; a duplicate email leaves the file orphaned,
    // which matches the no-cleanup policy.
    let filename = file_service::store(&config.uploads_dir, &file.original_name, &file.data).await?;

    user_service::create_user(db, &form, filename).await
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users", body = [User]),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_users(db: web::Data<MongoDB>) -> HttpResponse {
    log::info!("📋 GET /users");

    match user_service::list_users(&db).await {
        Ok(users) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Users fetched",
            "users": users
        })),
        Err(e) => {
            log::error!("❌ Failed to list users: {}", e);
            e.to_response()
        }
    }
}

#[utoipa::path(
    delete,
    path = "/users/{email}",
    tag = "Users",
    params(("email" = String, Path, description = "Email of the user to delete")),
    responses(
        (status = 200, description = "Deleted user", body = User),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_user(db: web::Data<MongoDB>, path: web::Path<String>) -> HttpResponse {
    let email = path.into_inner();
    log::info!("🗑️ DELETE /users/{}", email);

    match user_service::delete_user(&db, &email).await {
        Ok(user) => {
            log::info!("✅ User deleted: {}", email);
            HttpResponse::Ok().json(serde_json::json!({
                "message": "User deleted",
                "user": user
            }))
        }
        Err(e) => {
            log::warn!("❌ User deletion failed: {} - {}", email, e);
            e.to_response()
        }
    }
}

#[utoipa::path(
    put,
    path = "/users/{email}",
    tag = "Users",
    params(("email" = String, Path, description = "Email of the user to update")),
    request_body(content = UserForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 400, description = "Validation error or unsupported file type"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_user(
    db: web::Data<MongoDB>,
    config: web::Data<Config>,
    path: web::Path<String>,
    mut payload: Multipart,
) -> HttpResponse {
    let email = path.into_inner();
    log::info!("✏️ PUT /users/{}", email);

    match update_user_inner(&db, &config, &email, &mut payload).await {
        Ok(user) => {
            log::info!("✅ User updated: {}", email);
            HttpResponse::Ok().json(serde_json::json!({
                "message": "User updated",
                "user": user
            }))
        }
        Err(e) => {
            log::warn!("❌ User update failed: {} - {}", email, e);
            e.to_response()
        }
    }
}

async fn update_user_inner(
    db: &MongoDB,
    config: &Config,
    email: &str,
    payload: &mut Multipart,
) -> Result<User, AppError> {
    let (form, file) = read_form(payload).await?;

    // No new file means the existing reference is preserved.
    let new_file = match file {
        Some(file) => {
            Some(file_service::store(&config.uploads_dir, &file.original_name, &file.data).await?)
        }
        None => None,
    };

    user_service::update_user(db, email, &form, new_file).await
}
