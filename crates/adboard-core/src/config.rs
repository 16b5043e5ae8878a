use crate::app_config::{AppConfig, Environment, LocalConfig};
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

/// Load only the session-side settings. Unlike [`load_app_config`], this
/// does not need a backend URL.
///
/// # Errors
///
/// Returns `ConfigError` if a present value is invalid.
pub fn load_local_config() -> Result<LocalConfig, ConfigError> {
    dotenvy::dotenv().ok();
    build_local_config(&|key: &str| std::env::var(key))
}

fn build_local_config<F>(lookup: &F) -> Result<LocalConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let log_level = or_default("ADBOARD_LOG_LEVEL", "info");
    let storage_path = std::path::PathBuf::from(or_default(
        "ADBOARD_STORAGE_PATH",
        "./.adboard/session.json",
    ));

    let sign_in_path = or_default("ADBOARD_SIGN_IN_PATH", "/login");
    if !sign_in_path.starts_with('/') {
        return Err(ConfigError::InvalidEnvVar {
            var: "ADBOARD_SIGN_IN_PATH".to_string(),
            reason: "must be an absolute route starting with '/'".to_string(),
        });
    }

    Ok(LocalConfig {
        log_level,
        storage_path,
        sign_in_path,
    })
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

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let api_base_url = require("ADBOARD_API_BASE_URL")?;
    if !(api_base_url.starts_with("http://") || api_base_url.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "ADBOARD_API_BASE_URL".to_string(),
            reason: format!("expected an http(s) URL, got \"{api_base_url}\""),
        });
    }

    let env = parse_environment(&or_default("ADBOARD_ENV", "development"))?;
    let LocalConfig {
        log_level,
        storage_path,
        sign_in_path,
    } = build_local_config(&lookup)?;
    let request_timeout_secs = parse_u64("ADBOARD_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("ADBOARD_USER_AGENT", "adboard/0.1 (analytics-dashboard)");

    let expiry_redirect_delay_ms = parse_u64("ADBOARD_EXPIRY_REDIRECT_DELAY_MS", "2000")?;
    let resync_grace_ms = parse_u64("ADBOARD_RESYNC_GRACE_MS", "5000")?;

    Ok(AppConfig {
        api_base_url,
        env,
        log_level,
        storage_path,
        request_timeout_secs,
        user_agent,
        sign_in_path,
        expiry_redirect_delay_ms,
        resync_grace_ms,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "ADBOARD_ENV".to_string(),
            reason: format!("expected development, test, or production; got \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
