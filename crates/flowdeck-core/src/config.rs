use crate::app_config::AppConfig;
use crate::ConfigError;

const DEFAULT_LOG_LEVEL: &str = "info";

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

/// Log filter used when `RUST_LOG` is unset: `FLOWDECK_LOG_LEVEL`, or `info`.
///
/// Kept out of [`AppConfig`] so logging can start before (and without) the
/// license settings being present.
#[must_use]
pub fn log_level_from_env() -> String {
    resolve_log_level(|key| std::env::var(key))
}

fn resolve_log_level<F>(lookup: F) -> String
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    lookup("FLOWDECK_LOG_LEVEL")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}

/// Ensures `url` ends with exactly one `/`.
#[must_use]
pub fn normalize_base_url(url: &str) -> String {
    format!("{}/", url.trim_end_matches('/'))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
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

    let parse_url = |var: &str, default: &str| -> Result<String, ConfigError> {
        let normalized = normalize_base_url(&or_default(var, default));
        reqwest::Url::parse(&normalized).map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })?;
        Ok(normalized)
    };

    let instance_id = require("FLOWDECK_INSTANCE_ID")?;
    let webhook_base_url = parse_url("FLOWDECK_WEBHOOK_URL", "http://localhost:5678/")?;
    let license_server_url =
        parse_url("FLOWDECK_LICENSE_SERVER_URL", "https://license.flowdeck.dev/")?;
    let license_timeout_secs = parse_u64("FLOWDECK_LICENSE_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("FLOWDECK_USER_AGENT", "flowdeck/0.1 (license-client)");

    Ok(AppConfig {
        instance_id,
        webhook_base_url,
        license_server_url,
        license_timeout_secs,
        user_agent,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
