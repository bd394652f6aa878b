use axum::extract::{Query, State};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::SelectQuery;
use crate::error::ApiError;
use crate::response::{ApiResponse, ApiResult};
use crate::seed::{SeedReport, SeedRunner};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct VersionQuery {
    pub tree_id: Option<String>,
}

/// GET /api/version-comparison - template versions for one growth tree,
/// newest first
pub async fn version_comparison(
    State(state): State<AppState>,
    Query(query): Query<VersionQuery>,
) -> ApiResult<Vec<Value>> {
    let tree_id = query
        .tree_id
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::bad_request("缺少必要參數: tree_id"))?;

    let spec = SelectQuery {
        select: Some(vec![
            "id".to_string(),
            "tree_id".to_string(),
            "version".to_string(),
            "created_at".to_string(),
        ]),
        where_clause: Some(json!({ "tree_id": tree_id })),
        order: Some(json!("version desc")),
        ..Default::default()
    };

    let records = state.data.select("progress_templates", spec).await?;
    Ok(ApiResponse::success(records))
}

/// POST /api/init-progress-data - seed the progress dashboard collections
///
/// Runs the full pipeline with the elevated adapter, since seeding writes
/// across tenants. On success a best-effort webhook notification is fired.
pub async fn init_progress_data(State(state): State<AppState>) -> ApiResult<SeedReport> {
    let report = SeedRunner::standard().run(&state.elevated).await?;

    let webhook = state.webhook.clone();
    let inserted = report.total_inserted();
    tokio::spawn(async move {
        webhook
            .notify(
                "progress-data-initialized",
                json!({ "inserted": inserted }),
            )
            .await;
    });

    Ok(ApiResponse::with_message(report, "初始化完成"))
}

/// GET /api/init-progress-data - method advisory
///
/// The mutating action requires POST; this responds 405 with guidance
/// instead of silently succeeding.
pub async fn init_advisory() -> ApiResult<()> {
    Err(ApiError::method_not_allowed(
        "use POST /api/init-progress-data to run initialization",
    ))
}
