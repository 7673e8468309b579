use crate::database::{self, MongoDB};
use crate::models::Admin;
use crate::utils::error::AppError;
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mongodb::bson::doc;
use serde::{Deserialize, Serialize};

// JWT Claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub email: String,
    pub iat: usize, // issued at
    pub exp: usize, // expiration
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateAdminRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

fn jwt_secret() -> String {
    std::env::var("JWT_SECRET").unwrap_or_else(|_| "default-secret-change-me".to_string())
}

/// Issues an HS256 token carrying the admin email, valid for one hour.
/// There is no refresh mechanism.
pub fn generate_token(email: &str) -> Result<String, AppError> {
    let iat = Utc::now().timestamp() as usize;
    let exp = (Utc::now() + Duration::hours(1)).timestamp() as usize;

    let claims = Claims {
        email: email.to_string(),
        iat,
        exp,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret().as_ref()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))
}

pub fn verify_token(token: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret().as_ref()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::InvalidCredentials)
}

pub async fn create_admin(db: &MongoDB, request: &CreateAdminRequest) -> Result<Admin, AppError> {
    let collection = db.collection::<Admin>("admins");

    let existing = collection
        .find_one(doc! { "email": &request.email })
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    if existing.is_some() {
        return Err(AppError::Conflict("Admin already exists".to_string()));
    }

    let hashed_password = hash(&request.password, DEFAULT_COST)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;

    let new_admin = Admin {
        id: None,
        name: request.name.clone(),
        email: request.email.clone(),
        password: hashed_password,
    };

    // The unique index still backs the check above if two creates race.
    let result = collection.insert_one(&new_admin).await.map_err(|e| {
        if database::is_duplicate_key_error(&e) {
            AppError::Conflict("Admin already exists".to_string())
        } else {
            AppError::Database(e.to_string())
        }
    })?;

    Ok(Admin {
        id: result.inserted_id.as_object_id(),
        ..new_admin
    })
}

/// Returns a signed token on success. Unknown email and wrong password both
/// come back as InvalidCredentials.
pub async fn login(db: &MongoDB, request: &LoginRequest) -> Result<String, AppError> {
    let collection = db.collection::<Admin>("admins");

    let admin = collection
        .find_one(doc! { "email": &request.email })
        .await
        .map_err(|e| AppError::Database(e.to_string()))?
        .ok_or(AppError::InvalidCredentials)?;

    let valid = verify(&request.password, &admin.password)
        .map_err(|e| AppError::Internal(format!("Password verification error: {}", e)))?;

    if !valid {
        return Err(AppError::InvalidCredentials);
    }

    generate_token(&admin.email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trip_preserves_email() {
        let token = generate_token("admin@example.com").unwrap();
        let claims = verify_token(&token).unwrap();

        assert_eq!(claims.email, "admin@example.com");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn tampered_token_is_rejected() {
        let token = generate_token("admin@example.com").unwrap();
        let mut tampered = token.clone();
        tampered.push('x');

        assert!(verify_token(&tampered).is_err());
        assert!(verify_token("not-a-token").is_err());
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn duplicate_admin_creation_is_rejected() {
        dotenv::dotenv().ok();

        let uri = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017/admins_data_test".to_string());
        let db = crate::database::MongoDB::new(&uri).await.unwrap();

        let request = CreateAdminRequest {
            name: "Root".to_string(),
            email: format!("root-{}@example.com", Utc::now().timestamp_millis()),
            password: "hunter2".to_string(),
        };

        let first = create_admin(&db, &request).await;
        assert!(first.is_ok());

        let second = create_admin(&db, &request).await;
        assert!(matches!(second, Err(AppError::Conflict(_))));

        // Valid credentials log in, a wrong password does not.
        let ok = login(
            &db,
            &LoginRequest {
                email: request.email.clone(),
                password: "hunter2".to_string(),
            },
        )
        .await;
        assert!(ok.is_ok());

        let bad = login(
            &db,
            &LoginRequest {
                email: request.email.clone(),
                password: "wrong".to_string(),
            },
        )
        .await;
        assert!(matches!(bad, Err(AppError::InvalidCredentials)));
    }
}
