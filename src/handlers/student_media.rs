use axum::extract::{Path, Query, State};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::database::SelectQuery;
use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::response::{ApiResponse, ApiResult};
use crate::state::AppState;

use super::{parse_id, require_bool, require_string};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub student_id: Option<String>,
    pub media_type: Option<String>,
    pub limit: Option<i32>,
}

/// GET /api/student-media - list media for one student, newest first
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<Value>> {
    let student_id = query
        .student_id
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::bad_request("student_id is required"))?;
    if query.limit.is_some_and(|l| l < 0) {
        return Err(ApiError::bad_request("limit must be non-negative"));
    }

    let mut conditions = Map::new();
    conditions.insert("student_id".to_string(), json!(student_id));
    if let Some(media_type) = query.media_type {
        conditions.insert("media_type".to_string(), json!(media_type));
    }

    let spec = SelectQuery {
        where_clause: Some(Value::Object(conditions)),
        order: Some(json!("created_at desc")),
        limit: query.limit,
        ..Default::default()
    };

    let records = state.data.select("student_media", spec).await?;
    Ok(ApiResponse::success(records))
}

/// PATCH /api/student-media/:id/favorite - set the favorite flag
///
/// Setting the same value twice is a no-op on the stored row; both calls
/// return the updated record.
pub async fn set_favorite(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> ApiResult<Value> {
    let id = parse_id(&id)?;
    let is_favorite = require_bool(&body, "is_favorite")?;

    let mut changes = Map::new();
    changes.insert("is_favorite".to_string(), json!(is_favorite));

    match state.data.update("student_media", id, &changes).await? {
        Some(record) => Ok(ApiResponse::success(record)),
        None => Err(ApiError::not_found(format!("media {} not found", id))),
    }
}

/// PATCH /api/student-media/:id/status - set the review status
pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> ApiResult<Value> {
    let id = parse_id(&id)?;
    let status = require_string(&body, "status")?;

    let mut changes = Map::new();
    changes.insert("status".to_string(), json!(status));

    match state.data.update("student_media", id, &changes).await? {
        Some(record) => Ok(ApiResponse::success(record)),
        None => Err(ApiError::not_found(format!("media {} not found", id))),
    }
}
