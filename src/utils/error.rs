use actix_web::HttpResponse;
use serde::Serialize;
use std::fmt;

/// One failed validation check, reported back to the client.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug)]
pub enum AppError {
    /// Duplicate email on admin or user creation.
    Conflict(String),
    /// Login failure. Intentionally the same for unknown email and wrong
    /// password so the response does not reveal which factor failed.
    InvalidCredentials,
    Validation(Vec<FieldError>),
    NotFound(String),
    UnsupportedFileType(String),
    Database(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::InvalidCredentials => write!(f, "Invalid credentials"),
            AppError::Validation(errors) => write!(f, "Validation error ({} fields)", errors.len()),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::UnsupportedFileType(msg) => write!(f, "Unsupported file type: {}", msg),
            AppError::Database(msg) => write!(f, "Database error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// Maps the error to the HTTP response the handlers return. Database and
    /// internal faults are collapsed into a generic 500 body so driver
    /// details never reach the client.
    pub fn to_response(&self) -> HttpResponse {
        match self {
            AppError::Conflict(msg) => HttpResponse::BadRequest().json(serde_json::json!({
                "message": msg
            })),
            AppError::InvalidCredentials => HttpResponse::BadRequest().json(serde_json::json!({
                "message": "Invalid credentials"
            })),
            AppError::Validation(errors) => HttpResponse::BadRequest().json(serde_json::json!({
                "message": "Validation error",
                "errors": errors
            })),
            AppError::NotFound(msg) => HttpResponse::NotFound().json(serde_json::json!({
                "message": msg
            })),
            AppError::UnsupportedFileType(msg) => HttpResponse::BadRequest().json(serde_json::json!({
                "message": msg
            })),
            AppError::Database(_) | AppError::Internal(_) => {
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "message": "Internal server error"
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn conflict_and_validation_map_to_400() {
        assert_eq!(
            AppError::Conflict("Admin already exists".to_string())
                .to_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Validation(vec![]).to_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InvalidCredentials.to_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::UnsupportedFileType("photo.txt".to_string())
                .to_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn not_found_maps_to_404() {
        assert_eq!(
            AppError::NotFound("User not found".to_string())
                .to_response()
                .status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn store_faults_map_to_500() {
        assert_eq!(
            AppError::Database("broken pipe".to_string())
                .to_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Internal("disk full".to_string())
                .to_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
