use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with all required env vars populated.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("FLOWDECK_INSTANCE_ID", "instance-123");
    m
}

#[test]
fn build_app_config_fails_without_instance_id() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "FLOWDECK_INSTANCE_ID"),
        "expected MissingEnvVar(FLOWDECK_INSTANCE_ID), got: {result:?}"
    );
}

#[test]
fn build_app_config_treats_blank_instance_id_as_missing() {
    let mut map = HashMap::new();
    map.insert("FLOWDECK_INSTANCE_ID", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::MissingEnvVar(_))));
}

#[test]
fn build_app_config_applies_defaults() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).expect("config should build");
    assert_eq!(cfg.instance_id, "instance-123");
    assert_eq!(cfg.webhook_base_url, "http://localhost:5678/");
    assert_eq!(cfg.license_server_url, "https://license.flowdeck.dev/");
    assert_eq!(cfg.license_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "flowdeck/0.1 (license-client)");
}

#[test]
fn build_app_config_normalizes_webhook_url() {
    let mut map = full_env();
    map.insert("FLOWDECK_WEBHOOK_URL", "https://hooks.example.com//");
    let cfg = build_app_config(lookup_from_map(&map)).expect("config should build");
    assert_eq!(cfg.webhook_base_url, "https://hooks.example.com/");
}

#[test]
fn build_app_config_rejects_invalid_license_server_url() {
    let mut map = full_env();
    map.insert("FLOWDECK_LICENSE_SERVER_URL", "not a url");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "FLOWDECK_LICENSE_SERVER_URL"),
        "expected InvalidEnvVar(FLOWDECK_LICENSE_SERVER_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_non_numeric_timeout() {
    let mut map = full_env();
    map.insert("FLOWDECK_LICENSE_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(
        result,
        Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "FLOWDECK_LICENSE_TIMEOUT_SECS"
    ));
}

#[test]
fn debug_output_redacts_instance_id() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).expect("config should build");
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("instance-123"));
    assert!(rendered.contains("[redacted]"));
}

#[test]
fn normalize_base_url_collapses_trailing_slashes() {
    assert_eq!(normalize_base_url("http://a.test"), "http://a.test/");
    assert_eq!(normalize_base_url("http://a.test///"), "http://a.test/");
}

#[test]
fn unrelated_env_vars_do_not_affect_config() {
    let mut map = full_env();
    map.insert("FLOWDECK_ENV", "staging");
    assert!(build_app_config(lookup_from_map(&map)).is_ok());
}

#[test]
fn log_level_defaults_to_info() {
    let map: HashMap<&str, &str> = HashMap::new();
    assert_eq!(resolve_log_level(lookup_from_map(&map)), "info");
}

#[test]
fn log_level_reads_flowdeck_log_level() {
    let mut map = HashMap::new();
    map.insert("FLOWDECK_LOG_LEVEL", "flowdeck_license=debug");
    assert_eq!(
        resolve_log_level(lookup_from_map(&map)),
        "flowdeck_license=debug"
    );
}

#[test]
fn blank_log_level_falls_back_to_info() {
    let mut map = HashMap::new();
    map.insert("FLOWDECK_LOG_LEVEL", " ");
    assert_eq!(resolve_log_level(lookup_from_map(&map)), "info");
}
