//! Command-line interface for the adocheck binaries
//!
//! ## Module Structure
//!
//! - `args`: argument definitions for both tools (clap)
//! - `run`: entry points, argument/config/backend setup, error output
//! - `validate`: the `adoc-validate` check over one document
//! - `doctest`: the `adoc-doctest` loop over selected documents

pub mod args;
mod doctest;
mod run;
mod validate;

pub use args::{CommonArgs, DoctestCli, ValidateCli};
pub use run::{run_doctest, run_doctest_from, run_validate, run_validate_from};
