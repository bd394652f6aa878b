use std::sync::Arc;

use crate::config::AppConfig;
use crate::database::{Capability, DataAdapter, PoolManager};
use crate::services::webhook::WebhookNotifier;

/// Process-wide state, constructed once in `main` and injected into every
/// handler through the router. Handlers pick the adapter matching the trust
/// level the operation requires.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub pools: PoolManager,
    /// Tenant-scoped reads and writes.
    pub data: DataAdapter,
    /// Administrative operations that bypass row-level checks.
    pub elevated: DataAdapter,
    pub webhook: WebhookNotifier,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let config = Arc::new(config);
        let pools = PoolManager::new(config.database.clone());
        let data = DataAdapter::new(Capability::Standard, pools.clone(), config.query.max_limit);
        let elevated = DataAdapter::new(Capability::Elevated, pools.clone(), config.query.max_limit);
        let webhook = WebhookNotifier::new(&config.integrations);
        Self {
            config,
            pools,
            data,
            elevated,
            webhook,
        }
    }
}
