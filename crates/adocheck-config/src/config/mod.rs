mod discovery;
mod model;
mod validation;

pub use model::*;

/// Name of the directory holding the configuration file.
pub const CONFIG_DIR: &str = ".adocheck";

/// Name of the configuration file inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.toml";
