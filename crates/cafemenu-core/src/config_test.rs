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

/// Returns a map with the feed configured, as most commands need it.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert(
        "CAFEMENU_FEED_URL",
        "https://docs.google.com/spreadsheets/d/e/abc/pub?output=csv",
    );
    m
}

#[test]
fn build_app_config_defaults() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.feed_url.is_none());
    assert_eq!(cfg.cors_proxy.as_deref(), Some("https://corsproxy.io/?"));
    assert_eq!(cfg.backend_url, "http://localhost:10000");
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "cafemenu/0.1 (storefront)");
    assert_eq!(
        cfg.storage_path,
        std::path::PathBuf::from("./cafemenu-storage.json")
    );
    assert_eq!(cfg.user_id, 0);
    assert!(cfg.user_name.is_none());
    assert_eq!(cfg.log_level, "info");
}

#[test]
fn missing_feed_url_is_reported_on_demand() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let err = cfg.require_feed_url().unwrap_err();
    assert!(
        matches!(err, ConfigError::MissingEnvVar(ref v) if v == "CAFEMENU_FEED_URL"),
        "expected MissingEnvVar(CAFEMENU_FEED_URL), got: {err:?}"
    );
}

#[test]
fn blank_feed_url_counts_as_missing() {
    let mut map = full_env();
    map.insert("CAFEMENU_FEED_URL", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.require_feed_url().is_err());
}

#[test]
fn feed_url_is_read() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(
        cfg.require_feed_url().unwrap(),
        "https://docs.google.com/spreadsheets/d/e/abc/pub?output=csv"
    );
}

#[test]
fn empty_cors_proxy_disables_relay() {
    let mut map = full_env();
    map.insert("CAFEMENU_CORS_PROXY", "");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.cors_proxy.is_none());
}

#[test]
fn request_timeout_override() {
    let mut map = full_env();
    map.insert("CAFEMENU_REQUEST_TIMEOUT_SECS", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, 5);
}

#[test]
fn request_timeout_invalid() {
    let mut map = full_env();
    map.insert("CAFEMENU_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CAFEMENU_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(CAFEMENU_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn request_timeout_zero_is_rejected() {
    let mut map = full_env();
    map.insert("CAFEMENU_REQUEST_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::InvalidEnvVar { .. })));
}

#[test]
fn user_identity_override() {
    let mut map = full_env();
    map.insert("CAFEMENU_USER_ID", "123456789");
    map.insert("CAFEMENU_USER_NAME", "Dana");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.user_id, 123_456_789);
    assert_eq!(cfg.user_name.as_deref(), Some("Dana"));
}

#[test]
fn user_id_invalid() {
    let mut map = full_env();
    map.insert("CAFEMENU_USER_ID", "abc");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CAFEMENU_USER_ID"),
        "expected InvalidEnvVar(CAFEMENU_USER_ID), got: {result:?}"
    );
}

#[test]
fn debug_redacts_feed_url() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(rendered.contains("[redacted]"));
    assert!(!rendered.contains("docs.google.com"));
}
