//! Shared configuration and rule-catalog types for SDIX.
//!
//! Everything here is loaded once at start-up and treated as immutable
//! afterwards. The matcher itself lives in `sdix-intent`.

pub mod app_config;
pub mod config;
pub mod error;
pub mod rules;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use rules::{load_rules, parse_rules, IntentRuleConfig, RulesFile, TermGroupConfig};
