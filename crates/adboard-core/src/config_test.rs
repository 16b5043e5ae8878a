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

/// Returns a map with all required env vars populated with valid defaults.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("ADBOARD_API_BASE_URL", "https://api.example.test");
    m
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "ADBOARD_ENV"));
}

#[test]
fn build_app_config_fails_without_base_url() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "ADBOARD_API_BASE_URL"),
        "expected MissingEnvVar(ADBOARD_API_BASE_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_non_http_base_url() {
    let mut map = full_env();
    map.insert("ADBOARD_API_BASE_URL", "ftp://api.example.test");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ADBOARD_API_BASE_URL"),
        "expected InvalidEnvVar(ADBOARD_API_BASE_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_succeeds_with_all_required_vars() {
    let map = full_env();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.api_base_url, "https://api.example.test");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(
        cfg.storage_path,
        std::path::PathBuf::from("./.adboard/session.json")
    );
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "adboard/0.1 (analytics-dashboard)");
    assert_eq!(cfg.sign_in_path, "/login");
    assert_eq!(cfg.expiry_redirect_delay_ms, 2000);
    assert_eq!(cfg.resync_grace_ms, 5000);
}

#[test]
fn request_timeout_override() {
    let mut map = full_env();
    map.insert("ADBOARD_REQUEST_TIMEOUT_SECS", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, 5);
}

#[test]
fn request_timeout_invalid() {
    let mut map = full_env();
    map.insert("ADBOARD_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ADBOARD_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(ADBOARD_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn resync_grace_override() {
    let mut map = full_env();
    map.insert("ADBOARD_RESYNC_GRACE_MS", "250");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.resync_grace_ms, 250);
}

#[test]
fn expiry_redirect_delay_invalid() {
    let mut map = full_env();
    map.insert("ADBOARD_EXPIRY_REDIRECT_DELAY_MS", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ADBOARD_EXPIRY_REDIRECT_DELAY_MS"),
        "expected InvalidEnvVar(ADBOARD_EXPIRY_REDIRECT_DELAY_MS), got: {result:?}"
    );
}

#[test]
fn sign_in_path_must_be_absolute() {
    let mut map = full_env();
    map.insert("ADBOARD_SIGN_IN_PATH", "login");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ADBOARD_SIGN_IN_PATH"),
        "expected InvalidEnvVar(ADBOARD_SIGN_IN_PATH), got: {result:?}"
    );
}

#[test]
fn storage_path_override() {
    let mut map = full_env();
    map.insert("ADBOARD_STORAGE_PATH", "/tmp/adboard.json");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.storage_path, std::path::PathBuf::from("/tmp/adboard.json"));
}

#[test]
fn local_config_needs_no_base_url() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("ADBOARD_STORAGE_PATH", "/tmp/adboard.json");
    let local = build_local_config(&lookup_from_map(&map)).unwrap();
    assert_eq!(local.storage_path, std::path::PathBuf::from("/tmp/adboard.json"));
    assert_eq!(local.sign_in_path, "/login");
    assert_eq!(local.log_level, "info");
}

#[test]
fn local_config_matches_full_config() {
    let mut map = full_env();
    map.insert("ADBOARD_SIGN_IN_PATH", "/auth/sign-in");
    let local = build_local_config(&lookup_from_map(&map)).unwrap();
    let full = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(full.local(), local);
}
