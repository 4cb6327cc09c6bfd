//! Match analytics, emitted as structured log records.

use serde::Serialize;

use crate::types::MatchResult;

/// Summary of a fired match. Carries counts only, never the query text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntentEvent {
    pub intent: String,
    pub score: u32,
    pub matched_count: usize,
}

impl IntentEvent {
    /// Build an event for `result`, or `None` when no intent fired.
    #[must_use]
    pub fn from_result(result: &MatchResult) -> Option<Self> {
        result.intent.as_ref().map(|intent| Self {
            intent: intent.clone(),
            score: result.score,
            matched_count: result.matched.len(),
        })
    }

    /// Emit under the `sdix::analytics` target so it can be routed separately.
    pub fn emit(&self) {
        tracing::info!(
            target: "sdix::analytics",
            intent = %self.intent,
            score = self.score,
            matched_count = self.matched_count,
            "intent matched"
        );
    }
}
