use std::collections::HashMap;
use std::env::VarError;
use std::path::PathBuf;

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
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "SDIX_ENV"));
}

#[test]
fn build_app_config_uses_defaults_on_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let config = build_app_config(lookup_from_map(&map)).expect("defaults are valid");

    assert_eq!(config.env, Environment::Development);
    assert_eq!(config.bind_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(config.log_level, "info");
    assert!(config.rules_path.is_none());
    assert_eq!(config.redirect_delay_ms, 3000);
    assert!(config.analytics_enabled);
    assert_eq!(config.rate_limit_per_minute, 120);
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("SDIX_ENV", "production");
    map.insert("SDIX_BIND_ADDR", "127.0.0.1:8080");
    map.insert("SDIX_LOG_LEVEL", "debug");
    map.insert("SDIX_RULES_PATH", "./config/rules.yaml");
    map.insert("SDIX_REDIRECT_DELAY_MS", "1500");
    map.insert("SDIX_ANALYTICS", "off");
    map.insert("SDIX_RATE_LIMIT_PER_MIN", "30");

    let config = build_app_config(lookup_from_map(&map)).expect("overrides are valid");

    assert_eq!(config.env, Environment::Production);
    assert_eq!(config.bind_addr.port(), 8080);
    assert_eq!(config.log_level, "debug");
    assert_eq!(
        config.rules_path,
        Some(PathBuf::from("./config/rules.yaml"))
    );
    assert_eq!(config.redirect_delay_ms, 1500);
    assert!(!config.analytics_enabled);
    assert_eq!(config.rate_limit_per_minute, 30);
}

#[test]
fn blank_rules_path_falls_back_to_builtin() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("SDIX_RULES_PATH", "   ");
    let config = build_app_config(lookup_from_map(&map)).expect("valid");
    assert!(config.rules_path.is_none());
}

#[test]
fn build_app_config_rejects_bad_bind_addr() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("SDIX_BIND_ADDR", "not-an-address");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SDIX_BIND_ADDR"),
        "expected InvalidEnvVar(SDIX_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_non_numeric_delay() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("SDIX_REDIRECT_DELAY_MS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SDIX_REDIRECT_DELAY_MS"),
        "expected InvalidEnvVar(SDIX_REDIRECT_DELAY_MS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_unknown_boolean() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("SDIX_ANALYTICS", "maybe");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SDIX_ANALYTICS"),
        "expected InvalidEnvVar(SDIX_ANALYTICS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_rate_limit() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("SDIX_RATE_LIMIT_PER_MIN", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SDIX_RATE_LIMIT_PER_MIN"),
        "expected InvalidEnvVar(SDIX_RATE_LIMIT_PER_MIN), got: {result:?}"
    );
}

#[test]
fn parse_bool_accepts_common_spellings() {
    for raw in ["1", "true", "TRUE", "yes", "on"] {
        assert!(parse_bool("X", raw).unwrap(), "{raw} should be true");
    }
    for raw in ["0", "false", "No", "off"] {
        assert!(!parse_bool("X", raw).unwrap(), "{raw} should be false");
    }
}
