//! Process execution for the external AsciiDoc processor and doctest commands
//!
//! # Security Model
//!
//! All process execution goes through [`CommandSpec`] to ensure argv-style invocation.
//! Commands taken from documentation are split into discrete arguments before they
//! reach this crate, so no shell ever interprets them.

pub mod command_spec;
pub mod error;
pub mod native;
pub mod process;

pub use command_spec::CommandSpec;
pub use error::RunnerError;
pub use native::NativeRunner;
pub use process::{ProcessOutput, ProcessRunner};
