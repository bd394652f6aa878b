use sqlx::{postgres::PgPoolOptions, PgPool};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::info;

use crate::config::{DatabaseConfig, ENV_DATABASE_ELEVATED_URL, ENV_DATABASE_URL};

use super::adapter::AdapterError;

/// Trust tier for a data-access call. `Elevated` uses credentials that
/// bypass row-level access checks and is reserved for server-side
/// administrative operations; `Standard` is tenant-scoped.
///
/// The tier is chosen explicitly at the adapter's construction site, never
/// through an implicit global.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Standard,
    Elevated,
}

impl Capability {
    fn connection_url(&self) -> Result<String, AdapterError> {
        match self {
            Capability::Standard => std::env::var(ENV_DATABASE_URL)
                .map_err(|_| AdapterError::ConfigMissing(ENV_DATABASE_URL)),
            // The elevated URL falls back to the standard one so a single-role
            // deployment still works.
            Capability::Elevated => std::env::var(ENV_DATABASE_ELEVATED_URL)
                .or_else(|_| std::env::var(ENV_DATABASE_URL))
                .map_err(|_| AdapterError::ConfigMissing(ENV_DATABASE_URL)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Standard => "standard",
            Capability::Elevated => "elevated",
        }
    }
}

/// Connection pool manager for the two trust tiers. Pools are created
/// lazily on first use and cached for the life of the process.
#[derive(Clone)]
pub struct PoolManager {
    pools: Arc<RwLock<HashMap<Capability, PgPool>>>,
    settings: DatabaseConfig,
}

impl PoolManager {
    pub fn new(settings: DatabaseConfig) -> Self {
        Self {
            pools: Arc::new(RwLock::new(HashMap::new())),
            settings,
        }
    }

    /// Get the pool for a trust tier, creating it on first use.
    pub async fn pool(&self, capability: Capability) -> Result<PgPool, AdapterError> {
        // Fast path: try read lock
        {
            let pools = self.pools.read().await;
            if let Some(pool) = pools.get(&capability) {
                return Ok(pool.clone());
            }
        }

        let connection_url = capability.connection_url()?;
        // Parse to fail early on malformed URLs without ever logging the value
        url::Url::parse(&connection_url).map_err(|_| {
            AdapterError::ConnectionError("database URL is not a valid URL".to_string())
        })?;

        let pool = PgPoolOptions::new()
            .max_connections(self.settings.max_connections)
            .acquire_timeout(Duration::from_secs(self.settings.connect_timeout_secs))
            .connect(&connection_url)
            .await
            .map_err(|e| AdapterError::ConnectionError(e.to_string()))?;

        {
            let mut pools = self.pools.write().await;
            pools.insert(capability, pool.clone());
        }

        info!("Created {} database pool", capability.as_str());
        Ok(pool)
    }

    /// Pings the standard pool to ensure connectivity.
    pub async fn health_check(&self) -> Result<(), AdapterError> {
        let pool = self.pool(Capability::Standard).await?;
        sqlx::query("SELECT 1").execute(&pool).await?;
        Ok(())
    }

    /// Close and drop all pools (e.g., on shutdown).
    pub async fn close_all(&self) {
        let mut pools = self.pools.write().await;
        for (capability, pool) in pools.drain() {
            pool.close().await;
            info!("Closed {} database pool", capability.as_str());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elevated_falls_back_to_standard_url() {
        std::env::remove_var(ENV_DATABASE_ELEVATED_URL);
        std::env::set_var(ENV_DATABASE_URL, "postgres://hanami@localhost:5432/hanami");
        let url = Capability::Elevated.connection_url().unwrap();
        assert!(url.ends_with("/hanami"));
    }

    #[test]
    fn capability_names() {
        assert_eq!(Capability::Standard.as_str(), "standard");
        assert_eq!(Capability::Elevated.as_str(), "elevated");
    }
}
