//! Asciidoctor command-line converter
//!
//! Each conversion spawns the processor once, argv-only, writing the rendered
//! document to stdout (`--out-file -`). Log records on stderr are parsed and
//! forwarded to the caller's sink.

use std::path::{Path, PathBuf};

use adocheck_config::BackendConfig;
use adocheck_runner::{CommandSpec, NativeRunner, ProcessRunner};
use adocheck_utils::{DiagnosticSink, Severity};

use crate::error::ConvertError;
use crate::options::ConvertOptions;
use crate::parse::{ProcessorLine, parse_line};
use crate::{Conversion, Converter};

/// Lines of unparsed stderr kept for an abnormal-exit report.
const STDERR_TAIL_LINES: usize = 5;

/// Converter backed by the `asciidoctor` executable.
#[derive(Debug, Clone)]
pub struct AsciidoctorConverter<R = NativeRunner> {
    program: PathBuf,
    runner: R,
}

impl AsciidoctorConverter<NativeRunner> {
    /// Resolve the configured processor and confirm it answers `--version`.
    ///
    /// Any failure is reported as [`ConvertError::BackendUnavailable`] so the
    /// tools can stop before touching a document.
    pub fn locate(config: &BackendConfig) -> Result<Self, ConvertError> {
        Self::locate_with(config, NativeRunner::new())
    }
}

impl<R: ProcessRunner> AsciidoctorConverter<R> {
    /// Wrap an already-resolved program without probing it.
    pub fn with_runner(program: impl Into<PathBuf>, runner: R) -> Self {
        Self {
            program: program.into(),
            runner,
        }
    }

    /// [`AsciidoctorConverter::locate`] with an explicit runner.
    pub fn locate_with(config: &BackendConfig, runner: R) -> Result<Self, ConvertError> {
        let program = resolve_program(&config.program)?;
        let converter = Self::with_runner(program, runner);
        let version = converter.probe(config)?;
        tracing::debug!(
            program = %converter.program.display(),
            version = %version,
            "located AsciiDoc processor"
        );
        Ok(converter)
    }

    /// Run `<program> --version` and return the first line of its output.
    pub fn probe(&self, config: &BackendConfig) -> Result<String, ConvertError> {
        let cmd = CommandSpec::new(self.program.as_os_str()).arg("--version");
        let unavailable = |reason: String| ConvertError::BackendUnavailable {
            program: config.program.clone(),
            reason,
        };

        let output = self
            .runner
            .run(&cmd, config.timeout())
            .map_err(|e| unavailable(e.to_string()))?;

        if !output.success() {
            return Err(unavailable(format!(
                "{cmd} exited with {}",
                describe_status(output.exit_code)
            )));
        }

        let stdout = output.stdout_string();
        Ok(stdout.lines().next().unwrap_or_default().trim().to_string())
    }

    /// Build the argv for converting `input`.
    #[must_use]
    pub fn command(&self, input: &Path, options: &ConvertOptions) -> CommandSpec {
        let mut cmd = CommandSpec::new(self.program.as_os_str())
            .arg("--safe-mode")
            .arg(options.safe_mode.as_arg());

        if let Some(level) = options.failure_level {
            cmd = cmd.arg("--failure-level").arg(level.failure_level_arg());
        }

        cmd = cmd.arg("--backend").arg(&options.backend);

        if options.embedded {
            cmd = cmd.arg("--embedded");
        }

        for (name, value) in &options.attributes {
            let attribute = if value.is_empty() {
                name.clone()
            } else {
                format!("{name}={value}")
            };
            cmd = cmd.arg("-a").arg(attribute);
        }

        cmd.arg("--out-file").arg("-").arg(input.as_os_str())
    }
}

impl<R: ProcessRunner> Converter for AsciidoctorConverter<R> {
    fn convert(
        &self,
        input: &Path,
        options: &ConvertOptions,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Conversion, ConvertError> {
        if !input.is_file() {
            return Err(ConvertError::InputNotFound {
                path: input.display().to_string(),
            });
        }

        let cmd = self.command(input, options);
        let output = self.runner.run(&cmd, options.timeout)?;
        let stderr = output.stderr_string();

        let mut worst: Option<Severity> = None;
        let mut failure: Option<String> = None;
        let mut unparsed: Vec<&str> = Vec::new();

        for line in stderr.lines() {
            match parse_line(line) {
                Some(ProcessorLine::Diagnostic { severity, message }) => {
                    sink.record(severity, &message);
                    worst = worst.max(Some(severity));
                }
                Some(ProcessorLine::Failed { message }) => {
                    if failure.is_none() {
                        failure = Some(message);
                    }
                }
                None if line.trim().is_empty() => {}
                None => {
                    tracing::debug!(line, "unrecognized processor output");
                    unparsed.push(line.trim());
                }
            }
        }

        if let Some(message) = failure {
            return Err(ConvertError::Exception { message });
        }

        let failure_level_reached = match (options.failure_level, worst) {
            (Some(level), Some(worst)) => worst >= level,
            _ => false,
        };

        if !output.success() && !failure_level_reached {
            let skip = unparsed.len().saturating_sub(STDERR_TAIL_LINES);
            return Err(ConvertError::AbnormalExit {
                status: describe_status(output.exit_code),
                stderr_tail: unparsed[skip..].join("\n"),
            });
        }

        Ok(Conversion {
            output: output.stdout_string(),
            failure_level_reached,
        })
    }
}

fn resolve_program(program: &str) -> Result<PathBuf, ConvertError> {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return if candidate.is_file() {
            Ok(candidate.to_path_buf())
        } else {
            Err(ConvertError::BackendUnavailable {
                program: program.to_string(),
                reason: format!("{} does not exist", candidate.display()),
            })
        };
    }

    which::which(program).map_err(|e| ConvertError::BackendUnavailable {
        program: program.to_string(),
        reason: format!("not found on PATH ({e})"),
    })
}

fn describe_status(exit_code: Option<i32>) -> String {
    match exit_code {
        Some(code) => format!("exit code {code}"),
        None => "a signal".to_string(),
    }
}
