//! The reference evening-primrose-oil / seizure caution rule.
//!
//! Synonyms, weights and the threshold are fixed: downstream consumers assert
//! exact scores (e.g. `"epo seizure"` scores exactly 8).

use crate::types::{IntentRule, TermGroup};

/// Label emitted when a query asks about EPO/GLA and seizure risk.
pub const EPO_SEIZURE_CAUTION: &str = "epo_seizure_caution";

/// Inclusive minimum score for [`EPO_SEIZURE_CAUTION`].
pub const MIN_SCORE_THRESHOLD: u32 = 8;

pub const EPO_SEIZURE_SAFETY_PATH: &str = "/evening-primrose-seizure-risk";

struct GroupSpec {
    key: &'static str,
    synonyms: &'static [&'static str],
    weight: u32,
    trigger: bool,
    risk: bool,
}

const TERM_GROUPS: &[GroupSpec] = &[
    GroupSpec {
        key: "epo",
        synonyms: &["evening primrose oil", "primrose oil", "epo"],
        weight: 4,
        trigger: true,
        risk: false,
    },
    GroupSpec {
        key: "gla",
        // The hyphenated spelling never survives normalization; it stays for parity.
        synonyms: &["gamma linolenic acid", "gamma-linolenic acid", "gla"],
        weight: 3,
        trigger: true,
        risk: false,
    },
    GroupSpec {
        key: "seizure",
        synonyms: &["seizure", "seizures", "convulsion", "convulsions"],
        weight: 4,
        trigger: false,
        risk: true,
    },
    GroupSpec {
        key: "epilepsy",
        synonyms: &["epilepsy", "epileptic"],
        weight: 4,
        trigger: false,
        risk: true,
    },
    GroupSpec {
        key: "phenothiazine",
        synonyms: &["phenothiazine", "phenothiazines"],
        weight: 4,
        trigger: false,
        risk: false,
    },
    GroupSpec {
        key: "antipsychotic",
        synonyms: &[
            "antipsychotic",
            "antipsychotics",
            "neuroleptic",
            "neuroleptics",
        ],
        weight: 3,
        trigger: false,
        risk: false,
    },
    GroupSpec {
        key: "seizure-threshold",
        synonyms: &["seizure threshold", "lower seizure threshold", "threshold"],
        weight: 3,
        trigger: false,
        risk: true,
    },
];

/// Build the reference rule.
#[must_use]
pub fn builtin_rule() -> IntentRule {
    IntentRule {
        label: EPO_SEIZURE_CAUTION.to_string(),
        min_score: MIN_SCORE_THRESHOLD,
        safety_path: Some(EPO_SEIZURE_SAFETY_PATH.to_string()),
        groups: TERM_GROUPS
            .iter()
            .map(|spec| TermGroup {
                key: spec.key.to_string(),
                synonyms: spec.synonyms.iter().map(|s| (*s).to_string()).collect(),
                weight: spec.weight,
                trigger: spec.trigger,
                risk: spec.risk,
            })
            .collect(),
    }
}
