use std::net::SocketAddr;
use std::path::PathBuf;

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    /// Absent for commands that never touch the database.
    pub database_url: Option<String>,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Optional YAML file overriding the default tier thresholds.
    pub tiers_path: Option<PathBuf>,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub recommendation_default_limit: usize,
    pub recommendation_stale_secs: u64,
    pub recommendation_max_retries: u32,
    pub recommendation_retry_backoff_ms: u64,
    pub serper_api_key: Option<String>,
    pub openrouter_api_key: Option<String>,
    pub contacts_batch_size: usize,
    pub http_timeout_secs: u64,
}

impl AppConfig {
    /// The configured database URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] when `DATABASE_URL` was not set.
    pub fn require_database_url(&self) -> Result<&str, ConfigError> {
        self.database_url
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("tiers_path", &self.tiers_path)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[redacted]"),
            )
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field(
                "recommendation_default_limit",
                &self.recommendation_default_limit,
            )
            .field("recommendation_stale_secs", &self.recommendation_stale_secs)
            .field(
                "recommendation_max_retries",
                &self.recommendation_max_retries,
            )
            .field(
                "recommendation_retry_backoff_ms",
                &self.recommendation_retry_backoff_ms,
            )
            .field(
                "serper_api_key",
                &self.serper_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "openrouter_api_key",
                &self.openrouter_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("contacts_batch_size", &self.contacts_batch_size)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .finish()
    }
}
