//! Configuration for adocheck
//!
//! Hierarchical configuration with discovery and precedence: CLI > file > defaults.
//! The file is `.adocheck/config.toml`, found by walking upward from the working
//! directory, with optional `[backend]` and `[doctest]` sections.

mod config;

pub use config::*;
