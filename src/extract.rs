use axum::async_trait;
use axum::extract::{FromRequest, Request};
use serde_json::Value;

use crate::error::ApiError;

/// JSON body extractor whose parse failures stay inside the response
/// envelope. The stock `Json` rejection answers with plain text; every
/// client-visible failure here must be `{"success": false, ...}`.
pub struct JsonBody(pub Value);

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<Value>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(ApiError::bad_request(format!(
                "invalid JSON body: {}",
                rejection.body_text()
            ))),
        }
    }
}
