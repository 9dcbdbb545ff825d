//! AsciiDoc conversion through an external processor
//!
//! The [`Converter`] trait is the seam between the tools and the processor.
//! Diagnostics are never printed here: every processor message is handed to the
//! caller's [`DiagnosticSink`] and the caller decides what failed.

pub mod asciidoctor;
pub mod error;
pub mod options;
pub mod parse;

use std::io::Write;
use std::path::Path;

use adocheck_utils::DiagnosticSink;

pub use asciidoctor::AsciidoctorConverter;
pub use error::ConvertError;
pub use options::{ConvertOptions, SafeMode};

/// Result of a conversion that did not raise.
#[derive(Debug, Clone, Default)]
pub struct Conversion {
    /// Rendered document
    pub output: String,
    /// True when diagnostics at or above the failure level were recorded
    pub failure_level_reached: bool,
}

/// Converts AsciiDoc, reporting diagnostics through a sink.
pub trait Converter {
    /// Convert the document at `input`.
    ///
    /// Returns `Err` only for unexpected failures (processor crash, spawn
    /// failure, timeout, unreadable input). Warnings and errors inside the
    /// document arrive through `sink`.
    fn convert(
        &self,
        input: &Path,
        options: &ConvertOptions,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Conversion, ConvertError>;

    /// Convert an in-memory snippet by staging it in a temporary `.adoc` file.
    fn convert_str(
        &self,
        source: &str,
        options: &ConvertOptions,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Conversion, ConvertError> {
        let mut staged = tempfile::Builder::new()
            .prefix("adocheck-")
            .suffix(".adoc")
            .tempfile()
            .map_err(|e| ConvertError::Staging {
                reason: e.to_string(),
            })?;
        staged
            .write_all(source.as_bytes())
            .and_then(|()| staged.flush())
            .map_err(|e| ConvertError::Staging {
                reason: e.to_string(),
            })?;
        self.convert(staged.path(), options, sink)
    }
}
