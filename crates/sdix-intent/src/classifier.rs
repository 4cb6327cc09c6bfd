//! Scoring and threshold gating.

use std::path::Path;
use std::sync::LazyLock;

use sdix_core::ConfigError;

use crate::builtin::builtin_rule;
use crate::matcher::find_matches;
use crate::normalize::normalize_text;
use crate::types::{IntentRule, MatchResult};

static BUILTIN: LazyLock<IntentMatcher> = LazyLock::new(|| IntentMatcher::new(builtin_rule()));

/// Classifies queries against one immutable [`IntentRule`].
#[derive(Debug, Clone)]
pub struct IntentMatcher {
    rule: IntentRule,
}

impl IntentMatcher {
    #[must_use]
    pub fn new(rule: IntentRule) -> Self {
        Self { rule }
    }

    /// The process-wide matcher for the reference rule.
    #[must_use]
    pub fn builtin() -> &'static IntentMatcher {
        &BUILTIN
    }

    #[must_use]
    pub fn rule(&self) -> &IntentRule {
        &self.rule
    }

    /// Score `input` and decide whether it expresses this rule's intent.
    ///
    /// `None` short-circuits to [`MatchResult::empty`] without normalizing.
    /// The label is emitted only when `score >= min_score` and at least one
    /// trigger group and one risk group matched.
    #[must_use]
    pub fn classify(&self, input: Option<&str>) -> MatchResult {
        let Some(input) = input else {
            return MatchResult::empty();
        };

        let normalized = normalize_text(input);
        let mut matched: Vec<String> = Vec::new();
        let mut score = 0_u32;
        let mut has_trigger = false;
        let mut has_risk = false;

        for group in &self.rule.groups {
            let hits = find_matches(&normalized, &group.synonyms);
            if hits.is_empty() {
                continue;
            }

            tracing::trace!(group = %group.key, hits = ?hits, "term group matched");
            matched.extend(hits.into_iter().map(str::to_owned));
            score = score.saturating_add(group.weight);
            has_trigger |= group.trigger;
            has_risk |= group.risk;
        }

        let intent = (score >= self.rule.min_score && has_trigger && has_risk)
            .then(|| self.rule.label.clone());

        tracing::debug!(
            intent = intent.as_deref().unwrap_or("none"),
            score,
            matched = matched.len(),
            "classified query"
        );

        MatchResult {
            intent,
            score,
            matched,
        }
    }
}

/// Classify `input` against the built-in reference rule.
#[must_use]
pub fn match_intent(input: Option<&str>) -> MatchResult {
    IntentMatcher::builtin().classify(input)
}

/// Build a matcher from an optional YAML catalog, falling back to the
/// built-in rule when `path` is `None`.
///
/// # Errors
///
/// Returns [`ConfigError`] if the catalog cannot be read, parsed or validated.
pub fn load_matcher(path: Option<&Path>) -> Result<IntentMatcher, ConfigError> {
    let Some(path) = path else {
        return Ok(IntentMatcher::builtin().clone());
    };

    let rules_file = sdix_core::load_rules(path)?;
    let rule = IntentRule::try_from(rules_file.intent)?;
    tracing::info!(
        path = %path.display(),
        intent = %rule.label,
        groups = rule.groups.len(),
        "loaded intent rule catalog"
    );
    Ok(IntentMatcher::new(rule))
}

#[cfg(test)]
#[path = "classifier_test.rs"]
mod tests;
