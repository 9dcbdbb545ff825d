use std::path::{Path, PathBuf};
use std::time::Duration;

use adocheck_config::Config;
use adocheck_convert::{ConvertOptions, Converter};
use adocheck_runner::{CommandSpec, ProcessRunner};
use adocheck_utils::TracingSink;

use crate::error::{DoctestError, ExampleFailure};
use crate::extract::extract_examples;
use crate::matching::{describe_mismatch, normalize_html, normalize_lines, output_matches};
use crate::model::{ConsoleStep, Example, ExampleKind};

/// Stderr lines kept when a command exits non-zero.
const STDERR_TAIL_LINES: usize = 3;

/// Summary of a file whose examples all passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    /// Examples checked; zero when the file has none
    pub examples: usize,
}

/// Runs the examples of one file at a time.
///
/// Console commands go through `runner` with the document's directory as
/// working directory; render examples go through `converter`.
pub struct Doctester<'a> {
    converter: &'a dyn Converter,
    runner: &'a dyn ProcessRunner,
    console_languages: Vec<String>,
    command_timeout: Duration,
    render_options: ConvertOptions,
}

impl<'a> Doctester<'a> {
    pub fn new(converter: &'a dyn Converter, runner: &'a dyn ProcessRunner, config: &Config) -> Self {
        Self {
            converter,
            runner,
            console_languages: config.doctest.console_languages.clone(),
            command_timeout: config.doctest.timeout(),
            render_options: ConvertOptions::from_backend_config(&config.backend).embedded(true),
        }
    }

    /// Check every example in `path`.
    pub fn test_file(&self, path: &Path) -> Result<FileReport, DoctestError> {
        let source = std::fs::read_to_string(path).map_err(|e| DoctestError::Unreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let base_dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let examples = extract_examples(&source, &self.console_languages);
        tracing::debug!(count = examples.len(), "extracted examples");

        let failures: Vec<ExampleFailure> = examples
            .iter()
            .filter_map(|example| {
                let _span = tracing::debug_span!("example", line = example.line).entered();
                self.run_example(example, &base_dir)
                    .err()
                    .map(|reason| ExampleFailure {
                        line: example.line,
                        title: example.title.clone(),
                        reason,
                    })
            })
            .collect();

        if failures.is_empty() {
            Ok(FileReport {
                path: path.to_path_buf(),
                examples: examples.len(),
            })
        } else {
            Err(DoctestError::ExamplesFailed {
                path: path.display().to_string(),
                total: examples.len(),
                failures,
            })
        }
    }

    fn run_example(&self, example: &Example, base_dir: &Path) -> Result<(), String> {
        match &example.kind {
            // A transcript stops at its first failing step; later steps usually depend on it.
            ExampleKind::Console { steps } => steps
                .iter()
                .try_for_each(|step| self.run_step(step, base_dir)),
            ExampleKind::Render {
                asciidoc,
                expected_html,
            } => self.render(example, asciidoc, expected_html),
        }
    }

    fn run_step(&self, step: &ConsoleStep, base_dir: &Path) -> Result<(), String> {
        let at = |detail: String| format!("line {}: `{}` {detail}", step.line, step.command);

        let words = shell_words::split(&step.command)
            .map_err(|e| at(format!("could not be parsed: {e}")))?;
        let cmd = CommandSpec::from_argv(words)
            .ok_or_else(|| format!("line {}: empty command", step.line))?
            .cwd(base_dir);

        tracing::debug!(command = %cmd, "running example command");
        let output = self
            .runner
            .run(&cmd, self.command_timeout)
            .map_err(|e| at(format!("failed: {e}")))?;

        if !output.success() {
            let status = output
                .exit_code
                .map_or_else(|| "a signal".to_string(), |code| format!("exit code {code}"));
            let stderr = output.stderr_string();
            let tail: Vec<&str> = normalize_lines(stderr.lines());
            let skip = tail.len().saturating_sub(STDERR_TAIL_LINES);
            let detail = if tail.is_empty() {
                format!("exited with {status}")
            } else {
                format!("exited with {status}: {}", tail[skip..].join(" / "))
            };
            return Err(at(detail));
        }

        let stdout = output.stdout_string();
        let actual = normalize_lines(stdout.lines());
        let expected = normalize_lines(step.expected.iter().map(String::as_str));

        if output_matches(&expected, &actual) {
            Ok(())
        } else {
            Err(at(format!(
                "printed unexpected output\n{}",
                describe_mismatch(&expected, &actual)
            )))
        }
    }

    fn render(&self, example: &Example, asciidoc: &str, expected_html: &str) -> Result<(), String> {
        let mut sink = TracingSink::new(format!("render example at line {}", example.line));
        let conversion = self
            .converter
            .convert_str(asciidoc, &self.render_options, &mut sink)
            .map_err(|e| format!("conversion failed: {}", e.fatal_message()))?;

        let expected = normalize_html(expected_html);
        let actual = normalize_html(&conversion.output);
        if expected == actual {
            Ok(())
        } else {
            Err(format!(
                "rendered HTML differs\n    expected: {expected}\n    actual:   {actual}"
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adocheck_convert::{Conversion, ConvertError};
    use adocheck_runner::{ProcessOutput, RunnerError};
    use adocheck_utils::DiagnosticSink;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    /// Answers commands from a table keyed by the rendered argv.
    #[derive(Default)]
    struct Scripted {
        answers: HashMap<String, ProcessOutput>,
        calls: RefCell<Vec<(String, Option<PathBuf>)>>,
    }

    impl Scripted {
        fn answer(mut self, argv: &str, stdout: &str, exit_code: i32) -> Self {
            self.answers.insert(
                argv.to_string(),
                ProcessOutput::new(stdout.as_bytes().to_vec(), b"boom\n".to_vec(), Some(exit_code)),
            );
            self
        }
    }

    impl ProcessRunner for Scripted {
        fn run(&self, cmd: &CommandSpec, _timeout: Duration) -> Result<ProcessOutput, RunnerError> {
            let argv = cmd.to_string();
            self.calls.borrow_mut().push((argv.clone(), cmd.cwd.clone()));
            self.answers
                .get(&argv)
                .cloned()
                .ok_or_else(|| RunnerError::SpawnFailed {
                    program: cmd.program_name(),
                    reason: "No such file or directory (os error 2)".to_string(),
                })
        }
    }

    /// Renders `*x*` as `<p><strong>x</strong></p>`, anything else verbatim in `<p>`.
    struct FakeConverter;

    impl Converter for FakeConverter {
        fn convert(
            &self,
            input: &Path,
            options: &ConvertOptions,
            _sink: &mut dyn DiagnosticSink,
        ) -> Result<Conversion, ConvertError> {
            assert!(options.embedded);
            let source = fs::read_to_string(input).map_err(|e| ConvertError::Staging {
                reason: e.to_string(),
            })?;
            let body = source.trim();
            let html = match body.strip_prefix('*').and_then(|b| b.strip_suffix('*')) {
                Some(inner) => format!("<div class=\"paragraph\">\n<p><strong>{inner}</strong></p>\n</div>"),
                None => format!("<div class=\"paragraph\">\n<p>{body}</p>\n</div>"),
            };
            Ok(Conversion {
                output: html,
                failure_level_reached: false,
            })
        }
    }

    fn write_doc(dir: &TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_file_without_examples_passes() {
        let dir = TempDir::new().unwrap();
        let path = write_doc(&dir, "plain.adoc", "= Title\n\nJust prose.\n");
        let runner = Scripted::default();
        let tester = Doctester::new(&FakeConverter, &runner, &Config::default());

        let report = tester.test_file(&path).unwrap();
        assert_eq!(report.examples, 0);
        assert!(runner.calls.borrow().is_empty());
    }

    #[test]
    fn test_unreadable_file_fails() {
        let dir = TempDir::new().unwrap();
        let runner = Scripted::default();
        let tester = Doctester::new(&FakeConverter, &runner, &Config::default());

        let err = tester.test_file(&dir.path().join("absent.adoc")).unwrap_err();
        assert!(matches!(err, DoctestError::Unreadable { .. }));
    }

    #[test]
    fn test_console_example_passes_and_runs_in_document_directory() {
        let dir = TempDir::new().unwrap();
        let path = write_doc(
            &dir,
            "guide.adoc",
            "[source,console]\n----\n$ greet --name 'Ada Lovelace'\nHello, Ada Lovelace!   \n\n----\n",
        );
        let runner = Scripted::default().answer("greet --name Ada Lovelace", "Hello, Ada Lovelace!\n", 0);
        let tester = Doctester::new(&FakeConverter, &runner, &Config::default());

        let report = tester.test_file(&path).unwrap();
        assert_eq!(report.examples, 1);

        let calls = runner.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1.as_deref(), Some(dir.path()));
    }

    #[test]
    fn test_wildcard_in_transcript() {
        let dir = TempDir::new().unwrap();
        let path = write_doc(
            &dir,
            "guide.adoc",
            "[source,console]\n----\n$ list\nfirst\n...\nlast\n----\n",
        );
        let runner = Scripted::default().answer("list", "first\n2\n3\n4\nlast\n", 0);
        let tester = Doctester::new(&FakeConverter, &runner, &Config::default());

        assert!(tester.test_file(&path).is_ok());
    }

    #[test]
    fn test_output_mismatch_reports_line() {
        let dir = TempDir::new().unwrap();
        let path = write_doc(
            &dir,
            "guide.adoc",
            "Intro.\n\n.Version\n[source,console]\n----\n$ tool --version\ntool 1.0\n----\n",
        );
        let runner = Scripted::default().answer("tool --version", "tool 2.0\n", 0);
        let tester = Doctester::new(&FakeConverter, &runner, &Config::default());

        let err = tester.test_file(&path).unwrap_err();
        let failures = err.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].line, 5);
        assert_eq!(failures[0].title.as_deref(), Some("Version"));
        assert!(failures[0].reason.starts_with("line 6: `tool --version` printed unexpected output"));
        assert!(failures[0].reason.contains("| tool 2.0"));
    }

    #[test]
    fn test_nonzero_exit_fails_and_stops_transcript() {
        let dir = TempDir::new().unwrap();
        let path = write_doc(
            &dir,
            "guide.adoc",
            "[source,console]\n----\n$ build\n$ run\nok\n----\n",
        );
        let runner = Scripted::default().answer("build", "", 2).answer("run", "ok\n", 0);
        let tester = Doctester::new(&FakeConverter, &runner, &Config::default());

        let err = tester.test_file(&path).unwrap_err();
        assert_eq!(err.failures()[0].reason, "line 3: `build` exited with exit code 2: boom");
        assert_eq!(runner.calls.borrow().len(), 1);
    }

    #[test]
    fn test_missing_program_fails() {
        let dir = TempDir::new().unwrap();
        let path = write_doc(&dir, "guide.adoc", "[source,console]\n----\n$ nope\n----\n");
        let runner = Scripted::default();
        let tester = Doctester::new(&FakeConverter, &runner, &Config::default());

        let err = tester.test_file(&path).unwrap_err();
        assert!(err.failures()[0].reason.contains("failed: Failed to spawn 'nope'"));
    }

    #[test]
    fn test_unbalanced_quotes_fail() {
        let dir = TempDir::new().unwrap();
        let path = write_doc(&dir, "guide.adoc", "[source,console]\n----\n$ echo 'open\n----\n");
        let runner = Scripted::default();
        let tester = Doctester::new(&FakeConverter, &runner, &Config::default());

        let err = tester.test_file(&path).unwrap_err();
        assert!(err.failures()[0].reason.contains("could not be parsed"));
        assert!(runner.calls.borrow().is_empty());
    }

    #[test]
    fn test_skipped_examples_are_not_run() {
        let dir = TempDir::new().unwrap();
        let path = write_doc(
            &dir,
            "guide.adoc",
            "[source%skip,console]\n----\n$ deploy --prod\n----\n",
        );
        let runner = Scripted::default();
        let tester = Doctester::new(&FakeConverter, &runner, &Config::default());

        let report = tester.test_file(&path).unwrap();
        assert_eq!(report.examples, 0);
        assert!(runner.calls.borrow().is_empty());
    }

    #[test]
    fn test_render_examples() {
        let dir = TempDir::new().unwrap();
        let path = write_doc(
            &dir,
            "render.adoc",
            "[source,asciidoc]\n----\n*bold*\n----\n\n[source,html]\n----\n<div class=\"paragraph\">\n  <p><strong>bold</strong></p>\n</div>\n----\n\n\
             .Plain\n[source,asciidoc]\n----\nplain\n----\n[source,html]\n----\n<p>plain</p>\n----\n",
        );
        let runner = Scripted::default();
        let tester = Doctester::new(&FakeConverter, &runner, &Config::default());

        let err = tester.test_file(&path).unwrap_err();
        match &err {
            DoctestError::ExamplesFailed { total, failures, .. } => {
                assert_eq!(*total, 2);
                assert_eq!(failures.len(), 1);
                assert_eq!(failures[0].title.as_deref(), Some("Plain"));
                assert!(failures[0].reason.starts_with("rendered HTML differs"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_relative_path_uses_current_directory() {
        let runner = Scripted::default();
        let tester = Doctester::new(&FakeConverter, &runner, &Config::default());
        let err = tester.test_file(Path::new("definitely-missing.adoc")).unwrap_err();
        assert!(err.to_string().contains("definitely-missing.adoc"));
    }
}
