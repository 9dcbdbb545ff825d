//! Foundation types shared by the adocheck crates
//!
//! - [`types`]: severity levels and diagnostic records
//! - [`sink`]: the injected diagnostic sink and its in-memory / tracing implementations
//! - [`error`]: configuration errors and the user-facing error reporting trait
//! - [`exit_codes`]: process exit codes
//! - [`logging`]: tracing subscriber setup

pub mod error;
pub mod exit_codes;
pub mod logging;
pub mod sink;
pub mod types;

pub use exit_codes::ExitCode;
pub use sink::{DiagnosticSink, MemoryLogger, TracingSink};
pub use types::{Diagnostic, Severity};
