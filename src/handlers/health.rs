use axum::extract::State;
use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use serde_json::json;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /health - liveness plus a database ping
///
/// Failures go through `ApiError` so the usual sanitization applies;
/// connection errors answer 503 with a generic message and no details.
pub async fn health(State(state): State<AppState>) -> Response {
    let now = chrono::Utc::now();

    match state.pools.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        )
            .into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
