//! Query canonicalization applied before any synonym lookup.

use std::sync::LazyLock;

use regex::Regex;

/// Anything that is not an ASCII word character or whitespace.
static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\s]").expect("valid non-word regex"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Lower-case `input`, turn punctuation and symbols into spaces, and collapse
/// whitespace runs into a single ASCII space.
///
/// Trimming happens last, so `normalize_text(normalize_text(x)) ==
/// normalize_text(x)`. Empty, whitespace-only and punctuation-only input all
/// normalize to `""`.
#[must_use]
pub fn normalize_text(input: &str) -> String {
    let lowered = input.to_lowercase();
    let spaced = NON_WORD.replace_all(&lowered, " ");
    let collapsed = WHITESPACE_RUN.replace_all(&spaced, " ");
    collapsed.trim().to_string()
}
