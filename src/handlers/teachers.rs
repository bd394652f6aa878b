use axum::extract::{Query, State};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::SelectQuery;
use crate::response::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Optional status filter, e.g. status=active
    pub status: Option<String>,
}

/// GET /api/teachers - list teachers, optionally filtered by status
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<Value>> {
    let where_clause = query.status.map(|status| json!({ "status": status }));

    let spec = SelectQuery {
        where_clause,
        order: Some(json!("name asc")),
        ..Default::default()
    };

    let records = state.data.select("teachers", spec).await?;
    Ok(ApiResponse::success(records))
}
