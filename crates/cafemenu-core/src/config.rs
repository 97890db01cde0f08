use crate::app_config::{AppConfig, FEED_URL_VAR};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is invalid.
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
/// Returns `ConfigError` if a value is invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Builds the configuration from an env-var lookup so it can be tested with
/// a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
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

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim().parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_i64 = |var: &str, default: &str| -> Result<i64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim().parse::<i64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let feed_url = optional(FEED_URL_VAR);
    let cors_proxy = match lookup("CAFEMENU_CORS_PROXY") {
        Ok(value) => Some(value.trim().to_string()).filter(|v| !v.is_empty()),
        Err(_) => Some("https://corsproxy.io/?".to_string()),
    };
    let backend_url = or_default("CAFEMENU_BACKEND_URL", "http://localhost:10000");

    let request_timeout_secs = parse_u64("CAFEMENU_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "CAFEMENU_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let user_agent = or_default("CAFEMENU_USER_AGENT", "cafemenu/0.1 (storefront)");
    let storage_path = PathBuf::from(or_default(
        "CAFEMENU_STORAGE_PATH",
        "./cafemenu-storage.json",
    ));

    let user_id = parse_i64("CAFEMENU_USER_ID", "0")?;
    let user_name = optional("CAFEMENU_USER_NAME");
    let log_level = or_default("CAFEMENU_LOG_LEVEL", "info");

    Ok(AppConfig {
        feed_url,
        cors_proxy,
        backend_url,
        request_timeout_secs,
        user_agent,
        storage_path,
        user_id,
        user_name,
        log_level,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
