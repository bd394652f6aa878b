use axum::extract::{Path, State};
use serde_json::{json, Map, Value};
use std::collections::HashMap;

use crate::database::SelectQuery;
use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::response::{ApiResponse, ApiResult};
use crate::state::AppState;

use super::parse_id;

/// Field whitelist plus expected types for a promo-code update. Anything
/// else, or a mis-typed value, is rejected before the data layer.
fn field_problem(field: &str, value: &Value) -> Option<&'static str> {
    match field {
        "status" | "notes" => (!value.is_string()).then_some("must be a string"),
        "is_active" => (!value.is_boolean()).then_some("must be a boolean"),
        "usage_count" => (!value.is_number()).then_some("must be a number"),
        _ => Some("cannot be updated"),
    }
}

/// GET /api/promo-codes - list active promo codes, newest first
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Value>> {
    let spec = SelectQuery {
        where_clause: Some(json!({ "is_active": true })),
        order: Some(json!("created_at desc")),
        ..Default::default()
    };

    let records = state.data.select("promo_codes", spec).await?;
    Ok(ApiResponse::success(records))
}

/// PATCH /api/promo-codes/:id - partial update of one promo code
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> ApiResult<Value> {
    let id = parse_id(&id)?;

    let changes = validate_changes(&body)?;

    match state.data.update("promo_codes", id, &changes).await? {
        Some(record) => Ok(ApiResponse::success(record)),
        None => Err(ApiError::not_found(format!("promo code {} not found", id))),
    }
}

fn validate_changes(body: &Value) -> Result<Map<String, Value>, ApiError> {
    let object = body
        .as_object()
        .ok_or_else(|| ApiError::bad_request("request body must be a JSON object"))?;
    if object.is_empty() {
        return Err(ApiError::bad_request("no fields to update"));
    }

    let mut field_errors = HashMap::new();
    for (key, value) in object {
        if let Some(problem) = field_problem(key, value) {
            field_errors.insert(key.clone(), problem.to_string());
        }
    }
    if !field_errors.is_empty() {
        return Err(ApiError::validation(
            "request contains invalid fields",
            Some(field_errors),
        ));
    }

    Ok(object.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_whitelisted_fields() {
        let changes = validate_changes(&json!({"status": "expired", "is_active": false})).unwrap();
        assert_eq!(changes.len(), 2);
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = validate_changes(&json!({"code": "HACKED50"})).unwrap_err();
        assert!(matches!(err, ApiError::Validation { .. }));
    }

    #[test]
    fn rejects_mistyped_values() {
        let err = validate_changes(&json!({"status": 123, "is_active": ["yes"]})).unwrap_err();
        match err {
            ApiError::Validation {
                field_errors: Some(field_errors),
                ..
            } => {
                assert_eq!(field_errors["status"], "must be a string");
                assert_eq!(field_errors["is_active"], "must be a boolean");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn rejects_non_numeric_usage_count() {
        assert!(validate_changes(&json!({"usage_count": "7"})).is_err());
        assert!(validate_changes(&json!({"usage_count": 7})).is_ok());
    }

    #[test]
    fn rejects_empty_and_non_object_bodies() {
        assert!(validate_changes(&json!({})).is_err());
        assert!(validate_changes(&json!(["status"])).is_err());
    }
}
