use actix_web::{web, HttpResponse};

use crate::database::MongoDB;
use crate::models::AdminInfo;
use crate::services::admin_service::{self, CreateAdminRequest, LoginRequest};

#[utoipa::path(
    post,
    path = "/create-admin",
    tag = "Admins",
    request_body = CreateAdminRequest,
    responses(
        (status = 201, description = "Admin created", body = AdminInfo),
        (status = 400, description = "Admin already exists"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_admin(
    db: web::Data<MongoDB>,
    request: web::Json<CreateAdminRequest>,
) -> HttpResponse {
    log::info!("🔐 POST /create-admin - email: {}", request.email);

    match admin_service::create_admin(&db, &request).await {
        Ok(admin) => {
            log::info!("✅ Admin created: {}", admin.email);
            HttpResponse::Created().json(serde_json::json!({
                "message": "Admin created successfully",
                "admin": AdminInfo::from(&admin)
            }))
        }
        Err(e) => {
            log::warn!("❌ Admin creation failed: {} - {}", request.email, e);
            e.to_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "Admins",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful, token issued"),
        (status = 400, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn login(db: web::Data<MongoDB>, request: web::Json<LoginRequest>) -> HttpResponse {
    log::info!("🔑 POST /login - email: {}", request.email);

    match admin_service::login(&db, &request).await {
        Ok(token) => {
            log::info!("✅ Login successful: {}", request.email);
            HttpResponse::Ok().json(serde_json::json!({
                "message": "Login successful",
                "token": token
            }))
        }
        Err(e) => {
            log::warn!("❌ Login failed: {} - {}", request.email, e);
            e.to_response()
        }
    }
}
