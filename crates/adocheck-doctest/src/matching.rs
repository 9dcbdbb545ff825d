//! Expected-output comparison

use regex::Regex;
use std::sync::LazyLock;

/// An expected-output line that matches any run of zero or more lines.
pub const WILDCARD: &str = "...";

static BETWEEN_TAGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r">\s+<").expect("tag gap pattern is valid"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Strip trailing whitespace from each line and drop trailing blank lines.
pub fn normalize_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    let mut normalized: Vec<&str> = lines.into_iter().map(str::trim_end).collect();
    while normalized.last().is_some_and(|line| line.is_empty()) {
        normalized.pop();
    }
    normalized
}

/// Match actual output against expected lines, honouring [`WILDCARD`] lines.
///
/// ```rust
/// use adocheck_doctest::matching::output_matches;
///
/// assert!(output_matches(&["total 3", "...", "end"], &["total 3", "a", "b", "end"]));
/// assert!(output_matches(&["..."], &[]));
/// assert!(!output_matches(&["a"], &["b"]));
/// ```
#[must_use]
pub fn output_matches(expected: &[&str], actual: &[&str]) -> bool {
    // below[j]: expected[i + 1..] matches actual[j..]
    let mut below = vec![false; actual.len() + 1];
    below[actual.len()] = true;

    for want in expected.iter().rev() {
        let mut row = vec![false; actual.len() + 1];
        for j in (0..=actual.len()).rev() {
            row[j] = if want.trim() == WILDCARD {
                below[j] || (j < actual.len() && row[j + 1])
            } else {
                j < actual.len() && *want == actual[j] && below[j + 1]
            };
        }
        below = row;
    }

    below[0]
}

/// Render a mismatch as two indented listings.
#[must_use]
pub fn describe_mismatch(expected: &[&str], actual: &[&str]) -> String {
    let listing = |lines: &[&str]| -> String {
        if lines.is_empty() {
            return "    (no output)".to_string();
        }
        lines
            .iter()
            .map(|line| format!("    | {line}"))
            .collect::<Vec<_>>()
            .join("\n")
    };
    format!(
        "  expected:\n{}\n  actual:\n{}",
        listing(expected),
        listing(actual)
    )
}

/// Collapse insignificant whitespace in HTML for comparison.
#[must_use]
pub fn normalize_html(html: &str) -> String {
    let tight = BETWEEN_TAGS.replace_all(html.trim(), "><");
    WHITESPACE_RUN.replace_all(&tight, " ").into_owned()
}
