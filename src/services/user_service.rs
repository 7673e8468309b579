use crate::database::{self, MongoDB};
use crate::models::{Gender, User};
use crate::utils::error::{AppError, FieldError};
use crate::utils::validation;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::options::ReturnDocument;

/// Text fields collected from the multipart body of create and update
/// requests. Everything arrives as strings; validation turns them into a
/// storable record.
#[derive(Debug, Default, Clone, utoipa::ToSchema)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub gender: String,
    pub address: String,
    pub pincode: String,
}

impl UserForm {
    /// Fills a field by its wire name; unknown parts are ignored.
    pub fn set_field(&mut self, name: &str, value: String) {
        match name {
            "name" => self.name = value,
            "email" => self.email = value,
            "phoneNumber" => self.phone_number = value,
            "gender" => self.gender = value,
            "address" => self.address = value,
            "pincode" => self.pincode = value,
            _ => {}
        }
    }

    fn base_errors(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        validation::require("name", &self.name, &mut errors);
        validation::require("phoneNumber", &self.phone_number, &mut errors);
        validation::require("address", &self.address, &mut errors);
        validation::require("pincode", &self.pincode, &mut errors);

        if self.gender.trim().is_empty() {
            errors.push(FieldError {
                field: "gender".to_string(),
                message: "gender is required".to_string(),
            });
        } else if Gender::parse(&self.gender).is_none() {
            errors.push(FieldError {
                field: "gender".to_string(),
                message: "gender must be one of Male, Female, Other".to_string(),
            });
        }

        errors
    }

    /// Validation for creation: all fields plus the email pattern.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = self.base_errors();

        if self.email.trim().is_empty() {
            errors.push(FieldError {
                field: "email".to_string(),
                message: "email is required".to_string(),
            });
        } else if !validation::is_valid_email(&self.email) {
            errors.push(FieldError {
                field: "email".to_string(),
                message: "Please fill a valid email address".to_string(),
            });
        }

        errors
    }

    /// Validation for update: email comes from the path and is immutable,
    /// so only the mutable fields are checked.
    pub fn validate_update(&self) -> Vec<FieldError> {
        self.base_errors()
    }
}

pub async fn create_user(db: &MongoDB, form: &UserForm, filename: String) -> Result<User, AppError> {
    let errors = form.validate();
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let gender = Gender::parse(&form.gender).ok_or_else(|| {
        AppError::Validation(vec![FieldError {
            field: "gender".to_string(),
            message: "gender must be one of Male, Female, Other".to_string(),
        }])
    })?;

    let new_user = User {
        id: None,
        name: form.name.clone(),
        email: form.email.clone(),
        phone_number: form.phone_number.clone(),
        gender,
        address: form.address.clone(),
        pincode: form.pincode.clone(),
        file: Some(filename),
    };

    let collection = db.collection::<User>("users");

    let result = collection.insert_one(&new_user).await.map_err(|e| {
        if database::is_duplicate_key_error(&e) {
            AppError::Conflict("Email already exists".to_string())
        } else {
            AppError::Database(e.to_string())
        }
    })?;

    Ok(User {
        id: result.inserted_id.as_object_id(),
        ..new_user
    })
}

/// All users, unfiltered and unpaginated.
pub async fn list_users(db: &MongoDB) -> Result<Vec<User>, AppError> {
    let collection = db.collection::<User>("users");

    let cursor = collection
        .find(doc! {})
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    cursor
        .try_collect()
        .await
        .map_err(|e| AppError::Database(e.to_string()))
}

/// Removes the record and returns it. The stored file is left behind on
/// purpose; orphaned uploads are never collected.
pub async fn delete_user(db: &MongoDB, email: &str) -> Result<User, AppError> {
    let collection = db.collection::<User>("users");

    collection
        .find_one_and_delete(doc! { "email": email })
        .await
        .map_err(|e| AppError::Database(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

/// Replaces the mutable fields of the record matching `email`. The file
/// reference changes only when a new upload was stored; omitting the file
/// preserves the existing reference.
pub async fn update_user(
    db: &MongoDB,
    email: &str,
    form: &UserForm,
    new_file: Option<String>,
) -> Result<User, AppError> {
    let errors = form.validate_update();
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let gender = Gender::parse(&form.gender).ok_or_else(|| {
        AppError::Validation(vec![FieldError {
            field: "gender".to_string(),
            message: "gender must be one of Male, Female, Other".to_string(),
        }])
    })?;

    let mut set = doc! {
        "name": &form.name,
        "phoneNumber": &form.phone_number,
        "gender": gender.as_str(),
        "address": &form.address,
        "pincode": &form.pincode,
    };
    if let Some(filename) = new_file {
        set.insert("file", filename);
    }

    let collection = db.collection::<User>("users");

    collection
        .find_one_and_update(doc! { "email": email }, doc! { "$set": set })
        .return_document(ReturnDocument::After)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> UserForm {
        UserForm {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone_number: "5551234".to_string(),
            gender: "Female".to_string(),
            address: "1 Main St".to_string(),
            pincode: "560001".to_string(),
        }
    }

    #[test]
    fn valid_form_passes_validation() {
        assert!(valid_form().validate().is_empty());
    }

    #[test]
    fn missing_fields_are_reported_individually() {
        let form = UserForm::default();
        let errors = form.validate();

        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        for expected in ["name", "email", "phoneNumber", "gender", "address", "pincode"] {
            assert!(fields.contains(&expected), "missing error for {}", expected);
        }
    }

    #[test]
    fn bad_email_and_gender_are_rejected() {
        let mut form = valid_form();
        form.email = "not-an-email".to_string();
        form.gender = "female".to_string();

        let errors = form.validate();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"email"));
        assert!(fields.contains(&"gender"));
    }

    #[test]
    fn update_validation_skips_email() {
        let mut form = valid_form();
        form.email = String::new();

        assert!(form.validate_update().is_empty());
    }

    #[test]
    fn set_field_maps_wire_names() {
        let mut form = UserForm::default();
        form.set_field("phoneNumber", "5551234".to_string());
        form.set_field("unknown", "ignored".to_string());

        assert_eq!(form.phone_number, "5551234");
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn user_lifecycle_create_list_update_delete() {
        dotenv::dotenv().ok();

        let uri = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017/admins_data_test".to_string());
        let db = crate::database::MongoDB::new(&uri).await.unwrap();

        let mut form = valid_form();
        form.email = format!(
            "jane-{}@example.com",
            chrono::Utc::now().timestamp_millis()
        );

        // Deleting before creation reports NotFound.
        let missing = delete_user(&db, &form.email).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));

        let created = create_user(&db, &form, "1-photo.jpg".to_string())
            .await
            .unwrap();
        assert_eq!(created.file.as_deref(), Some("1-photo.jpg"));

        // Exactly one record with the new email shows up in the listing.
        let users = list_users(&db).await.unwrap();
        assert_eq!(users.iter().filter(|u| u.email == form.email).count(), 1);

        // A second create with the same email observes the conflict.
        let duplicate = create_user(&db, &form, "2-photo.jpg".to_string()).await;
        assert!(matches!(duplicate, Err(AppError::Conflict(_))));

        // Update without a new file preserves the stored reference.
        let mut updated_form = form.clone();
        updated_form.name = "Jane Updated".to_string();
        let updated = update_user(&db, &form.email, &updated_form, None)
            .await
            .unwrap();
        assert_eq!(updated.name, "Jane Updated");
        assert_eq!(updated.file.as_deref(), Some("1-photo.jpg"));

        let deleted = delete_user(&db, &form.email).await.unwrap();
        assert_eq!(deleted.email, form.email);

        let users = list_users(&db).await.unwrap();
        assert!(users.iter().all(|u| u.email != form.email));
    }
}
