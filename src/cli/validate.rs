//! `adoc-validate`: one conversion, fail on any warning

use std::io::Write;
use std::path::Path;

use adocheck_config::Config;
use adocheck_convert::{ConvertOptions, Converter};
use adocheck_utils::logging::document_span;
use adocheck_utils::{ExitCode, MemoryLogger, Severity};

/// Usage line printed when no file is given.
pub(crate) const USAGE: &str = "Usage: adoc-validate <file>";

/// Convert `file` and report what the processor logged.
///
/// The processor itself runs with `--failure-level WARN`; the logger is still
/// checked for `Warn` and above so every finding gets printed.
pub(crate) fn execute(
    file: &Path,
    converter: &dyn Converter,
    config: &Config,
    stderr: &mut dyn Write,
) -> ExitCode {
    let _span = document_span("adoc-validate", &file.display().to_string()).entered();
    let options = ConvertOptions::for_validation(&config.backend);
    let mut logger = MemoryLogger::new();

    match converter.convert(file, &options, &mut logger) {
        Ok(conversion) => {
            tracing::debug!(
                records = logger.len(),
                failure_level_reached = conversion.failure_level_reached,
                "conversion finished"
            );
        }
        Err(err) => {
            tracing::debug!(error = ?err, "conversion raised");
            let _ = writeln!(stderr, "FATAL: {}", err.fatal_message());
            return ExitCode::FAILURE;
        }
    }

    let mut findings = logger.at_or_above(Severity::Warn).peekable();
    if findings.peek().is_none() {
        return ExitCode::SUCCESS;
    }

    for diagnostic in findings {
        let _ = writeln!(stderr, "{diagnostic}");
    }
    ExitCode::FAILURE
}
