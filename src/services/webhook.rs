use serde_json::{json, Value};

use crate::config::IntegrationConfig;

/// Fire-and-forget notifications to the configured messaging webhook.
///
/// Delivery is best effort: failures are logged and never surfaced to the
/// request that triggered them. When no webhook URL is configured, notify
/// is a debug-logged no-op.
#[derive(Clone)]
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: Option<String>,
    secret: Option<String>,
}

impl WebhookNotifier {
    pub fn new(integrations: &IntegrationConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: integrations.webhook_url.clone(),
            secret: integrations.webhook_secret.clone(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.url.is_some()
    }

    pub async fn notify(&self, event: &str, payload: Value) {
        let url = match &self.url {
            Some(url) => url,
            None => {
                tracing::debug!("Webhook not configured, skipping event: {}", event);
                return;
            }
        };

        let body = json!({
            "event": event,
            "payload": payload,
            "sent_at": chrono::Utc::now(),
        });

        let mut request = self.client.post(url).json(&body);
        if let Some(secret) = &self.secret {
            request = request.header("X-Hanami-Signature", secret);
        }

        match request.send().await {
            Ok(resp) if resp.status().is_success() => {
                tracing::debug!("Webhook delivered: {}", event);
            }
            Ok(resp) => {
                tracing::warn!("Webhook rejected ({}): {}", resp.status(), event);
            }
            Err(e) => {
                tracing::warn!("Webhook delivery failed for {}: {}", event, e);
            }
        }
    }
}
