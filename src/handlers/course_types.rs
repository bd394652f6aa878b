use axum::extract::{Query, State};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::SelectQuery;
use crate::error::ApiError;
use crate::response::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i32>,
}

/// GET /api/course-types - list active course types in display order
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<Value>> {
    if query.limit.is_some_and(|l| l < 0) {
        return Err(ApiError::bad_request("limit must be non-negative"));
    }

    let spec = SelectQuery {
        where_clause: Some(json!({ "is_active": true })),
        order: Some(json!("sort_order asc, name asc")),
        limit: query.limit,
        ..Default::default()
    };

    let records = state.data.select("course_types", spec).await?;
    Ok(ApiResponse::success(records))
}
