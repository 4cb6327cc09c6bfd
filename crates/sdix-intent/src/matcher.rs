//! Synonym lookup against normalized text.

/// Return every synonym that occurs in `normalized`, in declaration order.
///
/// This is plain substring containment, not word-boundary matching: `"epo"`
/// also hits inside `"repository"`. Each synonym is reported at most once no
/// matter how often it occurs.
#[must_use]
pub fn find_matches<'a>(normalized: &str, synonyms: &'a [String]) -> Vec<&'a str> {
    let mut matches: Vec<&'a str> = Vec::new();
    for synonym in synonyms {
        let synonym = synonym.as_str();
        if normalized.contains(synonym) && !matches.contains(&synonym) {
            matches.push(synonym);
        }
    }
    matches
}
