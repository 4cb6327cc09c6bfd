//! Line-oriented batch classification.

use std::borrow::Cow;
use std::io::{BufRead, Write};

use sdix_intent::{IntentEvent, IntentMatcher, MatchResult};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct BatchLine<'a> {
    query: &'a str,
    #[serde(flatten)]
    result: MatchResult,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct BatchSummary {
    pub total: usize,
    pub matched: usize,
}

/// Classify every line of `input`, writing one JSON object per line to `out`.
///
/// Blank lines are classified like any other query (an empty query yields the
/// empty result), so output lines stay aligned with input lines. Bytes that
/// are not valid UTF-8 are replaced with U+FFFD and the line is still
/// classified. Match events are emitted only when `analytics` is set.
///
/// # Errors
///
/// Returns an error if reading input or writing output fails.
pub(crate) fn run_batch<R: BufRead, W: Write>(
    matcher: &IntentMatcher,
    mut input: R,
    out: &mut W,
    analytics: bool,
) -> anyhow::Result<BatchSummary> {
    let mut summary = BatchSummary::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }

        let line = String::from_utf8_lossy(&buf);
        if matches!(line, Cow::Owned(_)) {
            tracing::warn!(line = summary.total + 1, "replaced invalid UTF-8 in query");
        }
        let query = line.trim_end_matches('\n').trim_end_matches('\r');
        let result = matcher.classify(Some(query));

        summary.total += 1;
        if let Some(event) = IntentEvent::from_result(&result) {
            summary.matched += 1;
            if analytics {
                event.emit();
            }
        }

        serde_json::to_writer(&mut *out, &BatchLine { query, result })?;
        writeln!(out)?;
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str) -> (BatchSummary, Vec<serde_json::Value>) {
        run_bytes(input.as_bytes())
    }

    fn run_bytes(input: &[u8]) -> (BatchSummary, Vec<serde_json::Value>) {
        let mut out = Vec::new();
        let summary = run_batch(IntentMatcher::builtin(), input, &mut out, true).expect("batch");
        let lines = String::from_utf8(out)
            .expect("utf8")
            .lines()
            .map(|l| serde_json::from_str(l).expect("json line"))
            .collect();
        (summary, lines)
    }

    #[test]
    fn empty_input_produces_no_lines() {
        let (summary, lines) = run("");
        assert_eq!(summary, BatchSummary::default());
        assert!(lines.is_empty());
    }

    #[test]
    fn one_output_line_per_query() {
        let (summary, lines) = run("epo seizure\nseizure medication\n\nGLA benefits\n");
        assert_eq!(
            summary,
            BatchSummary {
                total: 4,
                matched: 1
            }
        );
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0]["query"], "epo seizure");
        assert_eq!(lines[0]["intent"], "epo_seizure_caution");
        assert_eq!(lines[0]["score"], 8);
        assert!(lines[1]["intent"].is_null());
        assert_eq!(lines[2]["query"], "");
        assert_eq!(lines[2]["score"], 0);
        assert_eq!(lines[3]["score"], 3);
    }

    #[test]
    fn crlf_line_endings_are_stripped() {
        let (_, lines) = run("primrose oil convulsions\r\n");
        assert_eq!(lines[0]["query"], "primrose oil convulsions");
        assert_eq!(
            lines[0]["matched"],
            serde_json::json!(["primrose oil", "convulsion", "convulsions"])
        );
    }

    #[test]
    fn invalid_utf8_line_is_classified_and_keeps_alignment() {
        let (summary, lines) = run_bytes(b"epo seizure\n\xff\xfe bad\nprimrose oil convulsions\n");
        assert_eq!(
            summary,
            BatchSummary {
                total: 3,
                matched: 2
            }
        );
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1]["query"], "\u{FFFD}\u{FFFD} bad");
        assert_eq!(lines[1]["score"], 0);
        assert_eq!(lines[2]["intent"], "epo_seizure_caution");
    }

    #[test]
    fn last_line_without_newline_is_classified() {
        let (summary, lines) = run("seizure medication\nepo seizure");
        assert_eq!(summary.total, 2);
        assert_eq!(lines[1]["query"], "epo seizure");
        assert_eq!(lines[1]["intent"], "epo_seizure_caution");
    }

    #[test]
    fn disabled_analytics_still_counts_matches() {
        let mut out = Vec::new();
        let summary = run_batch(
            IntentMatcher::builtin(),
            "epo seizure\n".as_bytes(),
            &mut out,
            false,
        )
        .expect("batch");
        assert_eq!(summary.matched, 1);
        assert!(!out.is_empty());
    }
}
