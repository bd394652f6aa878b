use serde::{Deserialize, Serialize};
use std::env;

/// Environment variable names referenced by the diagnostics surface.
/// Values are never logged or echoed, only presence.
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_DATABASE_ELEVATED_URL: &str = "DATABASE_ELEVATED_URL";
pub const ENV_WEBHOOK_URL: &str = "HANAMI_WEBHOOK_URL";
pub const ENV_WEBHOOK_SECRET: &str = "HANAMI_WEBHOOK_SECRET";
pub const ENV_BASE_URL: &str = "HANAMI_BASE_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub query: QueryConfig,
    pub integrations: IntegrationConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Hard cap applied to any caller-supplied limit.
    pub max_limit: i32,
    pub debug_logging: bool,
}

/// Outbound integration endpoints. All optional; absence disables the
/// integration rather than failing startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegrationConfig {
    pub webhook_url: Option<String>,
    pub webhook_secret: Option<String>,
    pub base_url: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("HANAMI_API_PORT").or_else(|_| env::var("PORT")) {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECT_TIMEOUT_SECS") {
            self.database.connect_timeout_secs =
                v.parse().unwrap_or(self.database.connect_timeout_secs);
        }
        if let Ok(v) = env::var("QUERY_MAX_LIMIT") {
            self.query.max_limit = v.parse().unwrap_or(self.query.max_limit);
        }
        if let Ok(v) = env::var("QUERY_DEBUG_LOGGING") {
            self.query.debug_logging = v.parse().unwrap_or(self.query.debug_logging);
        }

        self.integrations.webhook_url = env::var(ENV_WEBHOOK_URL).ok();
        self.integrations.webhook_secret = env::var(ENV_WEBHOOK_SECRET).ok();
        self.integrations.base_url = env::var(ENV_BASE_URL).ok();

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                port: 3000,
                enable_request_logging: true,
            },
            database: DatabaseConfig {
                max_connections: 10,
                connect_timeout_secs: 30,
            },
            query: QueryConfig {
                max_limit: 1000,
                debug_logging: true,
            },
            integrations: IntegrationConfig {
                webhook_url: None,
                webhook_secret: None,
                base_url: None,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                port: 3000,
                enable_request_logging: true,
            },
            database: DatabaseConfig {
                max_connections: 20,
                connect_timeout_secs: 10,
            },
            query: QueryConfig {
                max_limit: 500,
                debug_logging: false,
            },
            integrations: IntegrationConfig {
                webhook_url: None,
                webhook_secret: None,
                base_url: None,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                port: 3000,
                enable_request_logging: false,
            },
            database: DatabaseConfig {
                max_connections: 50,
                connect_timeout_secs: 5,
            },
            query: QueryConfig {
                max_limit: 100,
                debug_logging: false,
            },
            integrations: IntegrationConfig {
                webhook_url: None,
                webhook_secret: None,
                base_url: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn development_defaults() {
        let config = AppConfig::development();
        assert_eq!(config.query.max_limit, 1000);
        assert!(config.server.enable_request_logging);
    }

    #[test]
    fn production_tightens_limits() {
        let config = AppConfig::production();
        assert_eq!(config.query.max_limit, 100);
        assert!(!config.query.debug_logging);
        assert!(config.database.max_connections > AppConfig::development().database.max_connections);
    }
}
