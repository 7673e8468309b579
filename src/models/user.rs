use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, utoipa::ToSchema)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn parse(value: &str) -> Option<Gender> {
        match value {
            "Male" => Some(Gender::Male),
            "Female" => Some(Gender::Female),
            "Other" => Some(Gender::Other),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

/// Stored user record. Email is the lookup key for update and delete and is
/// never changed after creation. `file` holds the generated name of the
/// uploaded image under the uploads directory; older records may lack it.
#[derive(Debug, Serialize, Deserialize, Clone, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub gender: Gender,
    pub address: String,
    pub pincode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_parses_exact_labels_only() {
        assert_eq!(Gender::parse("Male"), Some(Gender::Male));
        assert_eq!(Gender::parse("Female"), Some(Gender::Female));
        assert_eq!(Gender::parse("Other"), Some(Gender::Other));
        assert_eq!(Gender::parse("male"), None);
        assert_eq!(Gender::parse(""), None);
    }

    #[test]
    fn user_serializes_with_wire_field_names() {
        let user = User {
            id: None,
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            phone_number: "5551234".to_string(),
            gender: Gender::Female,
            address: "1 Main St".to_string(),
            pincode: "560001".to_string(),
            file: Some("1-photo.jpg".to_string()),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["phoneNumber"], "5551234");
        assert_eq!(json["gender"], "Female");
        assert!(json.get("_id").is_none());
    }
}
