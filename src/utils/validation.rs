use lazy_static::lazy_static;
use regex::Regex;

use crate::utils::error::FieldError;

lazy_static! {
    // Same minimal shape the store used to enforce: something before the @,
    // a domain, and at least one dot after it.
    static ref EMAIL_RE: Regex = Regex::new(r"^.+@.+\..+$").unwrap();
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Pushes a FieldError when a required text field is empty or whitespace.
pub fn require(field: &str, value: &str, errors: &mut Vec<FieldError>) {
    if value.trim().is_empty() {
        errors.push(FieldError {
            field: field.to_string(),
            message: format!("{} is required", field),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("jane@example.com"));
        assert!(is_valid_email("a.b+c@sub.domain.org"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("jane"));
        assert!(!is_valid_email("jane@example"));
        assert!(!is_valid_email("@example.com"));
    }

    #[test]
    fn require_flags_empty_and_whitespace() {
        let mut errors = Vec::new();
        require("name", "Jane", &mut errors);
        assert!(errors.is_empty());

        require("address", "   ", &mut errors);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "address");
    }
}
