//! `adoc-doctest`: one marker per file, exit status from the failure count

use std::io::Write;
use std::path::PathBuf;

use adocheck_doctest::Doctester;
use adocheck_utils::ExitCode;
use adocheck_utils::logging::document_span;

pub(crate) fn execute(files: &[PathBuf], tester: &Doctester<'_>, stdout: &mut dyn Write) -> ExitCode {
    let mut failures = 0usize;

    for file in files {
        let shown = file.display().to_string();
        let _span = document_span("adoc-doctest", &shown).entered();
        let _ = writeln!(stdout, "\n📄 Testing file: {shown}");

        match tester.test_file(file) {
            Ok(report) => {
                tracing::debug!(examples = report.examples, "file passed");
                let _ = writeln!(stdout, "✅ OK");
            }
            Err(err) => {
                failures += 1;
                let _ = writeln!(stdout, "❌ FAILED: {err}");
            }
        }
    }

    tracing::debug!(files = files.len(), failures, "doctest run finished");
    ExitCode::from_failure_count(failures)
}
