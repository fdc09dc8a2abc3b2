use std::str::FromStr;

use crate::app_config::{AppConfig, Environment};
use crate::scoring::MAX_TRENDING_WINDOW_HOURS;
use crate::ConfigError;

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
/// plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let database_url = require("DATABASE_URL")?;

    let env = parse_environment(&or_default("AGORA_ENV", "development"))?;

    let bind_addr = parse_var(&or_default, "AGORA_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("AGORA_LOG_LEVEL", "info");

    let db_max_connections = parse_var(&or_default, "AGORA_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_var(&or_default, "AGORA_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_var(&or_default, "AGORA_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let trending_window_hours: u32 = parse_var(&or_default, "AGORA_TRENDING_WINDOW_HOURS", "24")?;
    let trending_top_n = parse_var(&or_default, "AGORA_TRENDING_TOP_N", "5")?;
    let search_limit = parse_var(&or_default, "AGORA_SEARCH_LIMIT", "10")?;
    let feed_limit = parse_var(&or_default, "AGORA_FEED_LIMIT", "20")?;
    let rate_limit_per_minute = parse_var(&or_default, "AGORA_RATE_LIMIT_PER_MINUTE", "120")?;

    if !(1..=MAX_TRENDING_WINDOW_HOURS).contains(&trending_window_hours) {
        return Err(ConfigError::InvalidEnvVar {
            var: "AGORA_TRENDING_WINDOW_HOURS".to_string(),
            reason: format!("must be between 1 and {MAX_TRENDING_WINDOW_HOURS}"),
        });
    }

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        trending_window_hours,
        trending_top_n,
        search_limit,
        feed_limit,
        rate_limit_per_minute,
    })
}

fn parse_var<T, D>(or_default: D, var: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    D: Fn(&str, &str) -> String,
{
    or_default(var, default)
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvironment`] for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvironment(other.to_string())),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
