use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Stored administrator record. The password field always holds a bcrypt
/// hash, never the plaintext.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Admin {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Public view of an Admin. API responses use this instead of the stored
/// record so the password hash never leaves the service.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AdminInfo {
    pub name: String,
    pub email: String,
}

impl From<&Admin> for AdminInfo {
    fn from(admin: &Admin) -> Self {
        Self {
            name: admin.name.clone(),
            email: admin.email.clone(),
        }
    }
}
