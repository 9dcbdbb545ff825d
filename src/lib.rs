//! adocheck - AsciiDoc validation and doctests backed by Asciidoctor
//!
//! Two binaries share this library:
//!
//! - `adoc-validate <file>` converts one document in secure mode and fails on
//!   any diagnostic at `WARNING` or above
//! - `adoc-doctest [file...]` runs the console and render examples embedded in
//!   documents and reports each file as passed or failed
//!
//! Conversion is delegated to the `asciidoctor` executable. Its location,
//! backend, attributes and timeouts come from `.adocheck/config.toml`:
//!
//! ```toml
//! [backend]
//! program = "asciidoctor"
//! timeout_secs = 120
//!
//! [doctest]
//! include = "docs/**/*.adoc"
//! exclude = ["**/drafts/**"]
//! ```
//!
//! The binaries only call [`cli::run_validate`] or [`cli::run_doctest`] and map
//! the returned [`ExitCode`] to the process exit status.

pub mod cli;
pub mod error;
pub mod selector;

pub use adocheck_config::{CliArgs, Config, ConfigSource};
pub use adocheck_convert::{AsciidoctorConverter, ConvertOptions, Converter, SafeMode};
pub use adocheck_doctest::{Doctester, FileReport};
pub use adocheck_utils::{Diagnostic, DiagnosticSink, ExitCode, MemoryLogger, Severity};
pub use error::AdocheckError;
