use serde_json::{json, Value};

use crate::config::{
    ENV_BASE_URL, ENV_DATABASE_ELEVATED_URL, ENV_DATABASE_URL, ENV_WEBHOOK_SECRET, ENV_WEBHOOK_URL,
};
use crate::extract::JsonBody;
use crate::response::{ApiResponse, ApiResult};

const PRESENT: &str = "已設置";
const ABSENT: &str = "未設置";

/// GET /api/diagnostics/env - presence report for expected configuration
///
/// Reports only whether each variable is set, never its value. A missing
/// variable is reported, not an error.
pub async fn env_presence() -> ApiResult<Value> {
    let names = [
        ENV_DATABASE_URL,
        ENV_DATABASE_ELEVATED_URL,
        ENV_WEBHOOK_URL,
        ENV_WEBHOOK_SECRET,
        ENV_BASE_URL,
    ];

    let mut report = serde_json::Map::new();
    for name in names {
        let presence = if std::env::var(name).is_ok() {
            PRESENT
        } else {
            ABSENT
        };
        report.insert(name.to_string(), json!(presence));
    }

    Ok(ApiResponse::success(Value::Object(report)))
}

/// POST /api/diagnostics/echo - connectivity check
///
/// No validation beyond JSON parse success; the response always contains
/// whatever was received.
pub async fn echo(JsonBody(body): JsonBody) -> ApiResult<Value> {
    Ok(ApiResponse::with_message(body, "echo"))
}
