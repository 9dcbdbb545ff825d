//! Doctests for AsciiDoc documentation
//!
//! Examples embedded in a document are extracted and checked:
//!
//! - console transcripts (`[source,console]`) are run command by command and
//!   their stdout compared with the transcript
//! - render examples (`[source,asciidoc]` directly followed by
//!   `[source,html]`) are converted and compared with the expected HTML
//!
//! [`Doctester::test_file`] is the per-file entry point used by `adoc-doctest`.

pub mod error;
pub mod extract;
pub mod matching;
pub mod model;
pub mod tester;

pub use error::{DoctestError, ExampleFailure};
pub use extract::{extract_blocks, extract_examples};
pub use model::{Block, ConsoleStep, Example, ExampleKind};
pub use tester::{Doctester, FileReport};
