use axum::extract::State;
use serde_json::{json, Map};

use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::response::{ApiResponse, ApiResult};
use crate::state::AppState;

use super::{parse_id, require_string};

/// POST /api/auth/logout - revoke a session server-side
///
/// Uses the elevated adapter: revocation must succeed regardless of the
/// row-level access the session's own credentials would grant.
pub async fn logout(State(state): State<AppState>, JsonBody(body): JsonBody) -> ApiResult<()> {
    let session_id = require_string(&body, "session_id")?;
    let session_id = parse_id(&session_id)?;

    let mut changes = Map::new();
    changes.insert(
        "revoked_at".to_string(),
        json!(chrono::Utc::now().to_rfc3339()),
    );

    match state
        .elevated
        .update("user_sessions", session_id, &changes)
        .await?
    {
        Some(_) => Ok(ApiResponse::message("signed out")),
        None => Err(ApiError::not_found(format!(
            "session {} not found",
            session_id
        ))),
    }
}
