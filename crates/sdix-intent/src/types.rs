use sdix_core::{ConfigError, IntentRuleConfig, TermGroupConfig};
use serde::{Deserialize, Serialize};

use crate::normalize::normalize_text;

/// A named cluster of interchangeable search-term spellings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermGroup {
    pub key: String,
    /// Lowercase phrases in declaration order.
    pub synonyms: Vec<String>,
    pub weight: u32,
    /// A hit satisfies the "subject present" precondition.
    pub trigger: bool,
    /// A hit satisfies the "risk present" precondition.
    pub risk: bool,
}

/// Everything needed to classify one intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntentRule {
    pub label: String,
    /// Inclusive score threshold.
    pub min_score: u32,
    /// Site page describing the caution, offered to the user on a match.
    pub safety_path: Option<String>,
    /// Evaluated in this order; the order also fixes the order of `matched`.
    pub groups: Vec<TermGroup>,
}

/// Outcome of classifying one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub intent: Option<String>,
    /// Sum of the weights of every group with at least one hit.
    pub score: u32,
    /// Matched synonyms (not group keys), group order then declaration order.
    pub matched: Vec<String>,
}

impl MatchResult {
    /// The result for absent or empty input.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            intent: None,
            score: 0,
            matched: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_match(&self) -> bool {
        self.intent.is_some()
    }
}

impl From<TermGroupConfig> for TermGroup {
    fn from(config: TermGroupConfig) -> Self {
        Self {
            key: config.key,
            synonyms: config.synonyms,
            weight: config.weight,
            trigger: config.trigger,
            risk: config.risk,
        }
    }
}

impl TryFrom<IntentRuleConfig> for IntentRule {
    type Error = ConfigError;

    /// Convert a validated catalog entry into a runtime rule.
    ///
    /// A synonym that changes under normalization can never be found in a
    /// normalized query. It is kept so the catalog round-trips, but logged.
    fn try_from(config: IntentRuleConfig) -> Result<Self, Self::Error> {
        if config.groups.is_empty() {
            return Err(ConfigError::Validation(format!(
                "intent '{}' has no term groups",
                config.label
            )));
        }

        for synonym in unreachable_synonyms(&config) {
            tracing::warn!(
                intent = %config.label,
                synonym = %synonym,
                "synonym is not in normalized form and can never match"
            );
        }

        Ok(Self {
            label: config.label,
            min_score: config.min_score,
            safety_path: config.safety_path,
            groups: config.groups.into_iter().map(TermGroup::from).collect(),
        })
    }
}

/// Synonyms of `config` that differ from their own normalized form.
#[must_use]
pub fn unreachable_synonyms(config: &IntentRuleConfig) -> Vec<&str> {
    config
        .groups
        .iter()
        .flat_map(|g| g.synonyms.iter())
        .filter(|s| normalize_text(s) != **s)
        .map(String::as_str)
        .collect()
}

impl From<&IntentRule> for IntentRuleConfig {
    fn from(rule: &IntentRule) -> Self {
        Self {
            label: rule.label.clone(),
            min_score: rule.min_score,
            safety_path: rule.safety_path.clone(),
            groups: rule
                .groups
                .iter()
                .map(|g| TermGroupConfig {
                    key: g.key.clone(),
                    synonyms: g.synonyms.clone(),
                    weight: g.weight,
                    trigger: g.trigger,
                    risk: g.risk,
                })
                .collect(),
        }
    }
}
