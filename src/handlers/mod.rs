pub mod auth;
pub mod course_types;
pub mod diagnostics;
pub mod health;
pub mod progress;
pub mod promo_codes;
pub mod student_media;
pub mod teachers;

use std::collections::HashMap;

use serde_json::Value;
use uuid::Uuid;

use crate::error::ApiError;

/// Parse a path id, mapping malformed input to 400 before the data layer.
pub(crate) fn parse_id(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| ApiError::bad_request(format!("invalid id: {}", id)))
}

/// Require a boolean body field, rejecting absent or mis-typed values.
pub(crate) fn require_bool(body: &Value, field: &str) -> Result<bool, ApiError> {
    match body.get(field) {
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(field_error(field, "must be a boolean")),
        None => Err(field_error(field, "is required")),
    }
}

/// Require a non-empty string body field.
pub(crate) fn require_string(body: &Value, field: &str) -> Result<String, ApiError> {
    match body.get(field) {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        Some(Value::String(_)) => Err(field_error(field, "cannot be empty")),
        Some(_) => Err(field_error(field, "must be a string")),
        None => Err(field_error(field, "is required")),
    }
}

fn field_error(field: &str, problem: &str) -> ApiError {
    let mut field_errors = HashMap::new();
    field_errors.insert(field.to_string(), problem.to_string());
    ApiError::validation(format!("{} {}", field, problem), Some(field_errors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_id_rejects_garbage() {
        assert!(parse_id("not-a-uuid").is_err());
        assert!(parse_id("3f0b0e7c-8c26-4bb0-9f11-0e6b5a2d9a01").is_ok());
    }

    #[test]
    fn require_bool_checks_type() {
        assert!(require_bool(&json!({"is_favorite": true}), "is_favorite").unwrap());
        assert!(require_bool(&json!({"is_favorite": "yes"}), "is_favorite").is_err());
        assert!(require_bool(&json!({}), "is_favorite").is_err());
    }

    #[test]
    fn require_string_checks_content() {
        assert_eq!(
            require_string(&json!({"status": "approved"}), "status").unwrap(),
            "approved"
        );
        assert!(require_string(&json!({"status": ""}), "status").is_err());
        assert!(require_string(&json!({"status": 1}), "status").is_err());
    }
}
