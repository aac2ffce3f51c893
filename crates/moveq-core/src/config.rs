use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Default Distance Matrix JSON endpoint.
pub const DEFAULT_MAPS_BASE_URL: &str = "https://maps.googleapis.com/maps/api/distancematrix/json";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it from a
/// `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
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

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let database_url = require("DATABASE_URL")?;
    let env = parse_environment(&or_default("MOVEQ_ENV", "development"))?;

    let bind_addr = parse_addr("MOVEQ_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("MOVEQ_LOG_LEVEL", "info");

    // An empty key is treated the same as a missing one.
    let maps_api_key = lookup("MOVEQ_MAPS_API_KEY")
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty());
    let maps_base_url = or_default("MOVEQ_MAPS_BASE_URL", DEFAULT_MAPS_BASE_URL);
    let maps_timeout_secs = parse_u64("MOVEQ_MAPS_TIMEOUT_SECS", "10")?;
    if maps_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "MOVEQ_MAPS_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    let db_max_connections = parse_u32("MOVEQ_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("MOVEQ_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("MOVEQ_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let rate_limit_per_minute = parse_usize("MOVEQ_RATE_LIMIT_PER_MINUTE", "120")?;

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        maps_api_key,
        maps_base_url,
        maps_timeout_secs,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        rate_limit_per_minute,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "MOVEQ_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
