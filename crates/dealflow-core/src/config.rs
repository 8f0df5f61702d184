use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if an env var holds an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if an env var holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Parsing and validation are decoupled from the process environment so they
/// can be tested with a plain `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_positive_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        match raw.parse::<usize>() {
            Ok(0) => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be greater than zero".to_string(),
            }),
            Ok(value) => Ok(value),
            Err(e) => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            }),
        }
    };

    // Only the database-backed commands need a URL; they check at connect time.
    let database_url = optional("DATABASE_URL");

    let env = parse_environment(&or_default("DEALFLOW_ENV", "development"))?;

    let bind_addr = parse("DEALFLOW_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("DEALFLOW_LOG_LEVEL", "info");
    let tiers_path = optional("DEALFLOW_TIERS_PATH").map(PathBuf::from);

    let db_max_connections = parse_u32("DEALFLOW_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("DEALFLOW_DB_MIN_CONNECTIONS", "1")?;
    if db_min_connections > db_max_connections {
        return Err(ConfigError::InvalidEnvVar {
            var: "DEALFLOW_DB_MIN_CONNECTIONS".to_string(),
            reason: format!(
                "min connections ({db_min_connections}) exceeds max connections ({db_max_connections})"
            ),
        });
    }
    let db_acquire_timeout_secs = parse_u64("DEALFLOW_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let recommendation_default_limit =
        parse_positive_usize("DEALFLOW_RECOMMENDATION_LIMIT", "25")?;
    let recommendation_stale_secs = parse_u64("DEALFLOW_RECOMMENDATION_STALE_SECS", "14400")?;
    let recommendation_max_retries = parse_u32("DEALFLOW_RECOMMENDATION_MAX_RETRIES", "1")?;
    let recommendation_retry_backoff_ms =
        parse_u64("DEALFLOW_RECOMMENDATION_RETRY_BACKOFF_MS", "500")?;

    let serper_api_key = optional("SERPER_API_KEY");
    let openrouter_api_key = optional("OPENROUTER_API_KEY");
    let contacts_batch_size = parse_positive_usize("DEALFLOW_CONTACTS_BATCH_SIZE", "14")?;
    let http_timeout_secs = parse_u64("DEALFLOW_HTTP_TIMEOUT_SECS", "30")?;

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        tiers_path,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        recommendation_default_limit,
        recommendation_stale_secs,
        recommendation_max_retries,
        recommendation_retry_backoff_ms,
        serper_api_key,
        openrouter_api_key,
        contacts_batch_size,
        http_timeout_secs,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "DEALFLOW_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
