//! YAML rule catalog for the intent matcher.
//!
//! A catalog describes one intent: its label, score threshold, the safety page
//! it points at, and the ordered term groups that feed the score. Only the
//! structural checks live here; the matcher crate warns about synonyms that
//! are not in normalized form.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermGroupConfig {
    pub key: String,
    pub synonyms: Vec<String>,
    pub weight: u32,
    /// Counts toward the "subject present" precondition.
    #[serde(default)]
    pub trigger: bool,
    /// Counts toward the "risk present" precondition.
    #[serde(default)]
    pub risk: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentRuleConfig {
    pub label: String,
    pub min_score: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_path: Option<String>,
    pub groups: Vec<TermGroupConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesFile {
    pub intent: IntentRuleConfig,
}

/// Load and validate a rule catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_rules(path: &Path) -> Result<RulesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::RulesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_rules(&content)
}

/// Parse and validate a rule catalog from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the text is not valid YAML or fails validation.
pub fn parse_rules(content: &str) -> Result<RulesFile, ConfigError> {
    let rules_file: RulesFile = serde_yaml::from_str(content)?;
    validate_rules(&rules_file.intent)?;
    Ok(rules_file)
}

fn validate_rules(rule: &IntentRuleConfig) -> Result<(), ConfigError> {
    if rule.label.trim().is_empty() {
        return Err(ConfigError::Validation(
            "intent label must be non-empty".to_string(),
        ));
    }

    if rule.groups.is_empty() {
        return Err(ConfigError::Validation(format!(
            "intent '{}' has no term groups",
            rule.label
        )));
    }

    if let Some(path) = &rule.safety_path {
        if !path.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "safety_path '{path}' must be an absolute site path"
            )));
        }
    }

    let mut seen_keys = HashSet::new();
    for group in &rule.groups {
        if group.key.trim().is_empty() {
            return Err(ConfigError::Validation(
                "term group key must be non-empty".to_string(),
            ));
        }

        if !seen_keys.insert(group.key.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate term group key: '{}'",
                group.key
            )));
        }

        if group.synonyms.is_empty() {
            return Err(ConfigError::Validation(format!(
                "term group '{}' has no synonyms",
                group.key
            )));
        }

        let mut seen_synonyms = HashSet::new();
        for synonym in &group.synonyms {
            if synonym.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "term group '{}' contains an empty synonym",
                    group.key
                )));
            }
            if !seen_synonyms.insert(synonym.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "term group '{}' repeats synonym '{synonym}'",
                    group.key
                )));
            }
        }
    }

    if !rule.groups.iter().any(|g| g.trigger) {
        return Err(ConfigError::Validation(format!(
            "intent '{}' needs at least one trigger group",
            rule.label
        )));
    }

    if !rule.groups.iter().any(|g| g.risk) {
        return Err(ConfigError::Validation(format!(
            "intent '{}' needs at least one risk group",
            rule.label
        )));
    }

    Ok(())
}

#[cfg(test)]
#[path = "rules_test.rs"]
mod tests;
