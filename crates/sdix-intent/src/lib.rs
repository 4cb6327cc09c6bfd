//! Search-intent matcher for supplement safety cautions.
//!
//! Normalizes a free-text query, looks for each term group's synonyms as
//! substrings, sums the weights of the groups that hit, and emits the intent
//! label only when the score clears the threshold and both a subject
//! ("trigger") group and a risk group matched.

pub mod analytics;
pub mod builtin;
pub mod classifier;
pub mod matcher;
pub mod normalize;
pub mod types;

pub use analytics::IntentEvent;
pub use builtin::{builtin_rule, EPO_SEIZURE_CAUTION, EPO_SEIZURE_SAFETY_PATH, MIN_SCORE_THRESHOLD};
pub use classifier::{load_matcher, match_intent, IntentMatcher};
pub use matcher::find_matches;
pub use normalize::normalize_text;
pub use types::{IntentRule, MatchResult, TermGroup};
