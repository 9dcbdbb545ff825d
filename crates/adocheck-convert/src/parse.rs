//! Parsing of processor stderr into diagnostics
//!
//! The processor logs one message per line as `<program>: <LEVEL>: <message>`,
//! for example `asciidoctor: WARNING: guide.adoc: line 12: unterminated listing block`.
//! An unexpected exception is reported as `<program>: FAILED: <message>`.

use regex::Regex;
use std::sync::LazyLock;

use adocheck_utils::Severity;

static LOG_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<program>[A-Za-z0-9_.-]+): (?P<level>[A-Z]+): (?P<message>.*)$")
        .expect("log line pattern is valid")
});

/// One classified stderr line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessorLine {
    Diagnostic { severity: Severity, message: String },
    /// The processor raised and gave up on the document
    Failed { message: String },
}

/// Classify a single stderr line.
///
/// Returns `None` for anything that is not a log record (backtraces, blank
/// lines, unknown levels).
#[must_use]
pub fn parse_line(line: &str) -> Option<ProcessorLine> {
    let caps = LOG_LINE.captures(line.trim_end())?;
    let level = &caps["level"];
    let message = caps["message"].trim().to_string();

    if level == "FAILED" {
        return Some(ProcessorLine::Failed { message });
    }

    level
        .parse::<Severity>()
        .ok()
        .map(|severity| ProcessorLine::Diagnostic { severity, message })
}
