//! CLI argument definitions
//!
//! Both tools share `--config` and `--verbose`. Positional arguments are
//! optional at the clap level so a missing file can be reported with the
//! tool's own usage line and exit code.

use clap::{Args, Parser};
use std::path::PathBuf;

use adocheck_config::CliArgs;

/// Flags shared by both tools.
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Path to configuration file (overrides discovery of .adocheck/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommonArgs {
    #[must_use]
    pub fn to_cli_args(&self) -> CliArgs {
        CliArgs {
            config_path: self.config.clone(),
            verbose: self.verbose,
        }
    }
}

/// adoc-validate - fail on any AsciiDoc conversion warning
#[derive(Parser, Debug)]
#[command(name = "adoc-validate")]
#[command(about = "Convert an AsciiDoc file in secure mode and fail on any warning or error")]
#[command(long_about = r#"
Converts one AsciiDoc file with Asciidoctor in secure safe mode, treating
warnings as failures. Every diagnostic at WARNING or above is printed to
stderr and the exit status is 1. A clean document exits 0 silently.

EXAMPLES:
  adoc-validate docs/guide.adoc
  adoc-validate --config ci/adocheck.toml README.adoc

CONFIGURATION:
  Configuration is loaded with precedence: CLI flags > config file > defaults
  Config file is discovered by searching upward from CWD for .adocheck/config.toml
"#)]
#[command(version)]
pub struct ValidateCli {
    /// AsciiDoc file to validate
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// adoc-doctest - run the examples embedded in AsciiDoc files
#[derive(Parser, Debug)]
#[command(name = "adoc-doctest")]
#[command(about = "Run console and render examples embedded in AsciiDoc files")]
#[command(long_about = r#"
Checks the examples embedded in AsciiDoc files:

  [source,console] blocks   commands after "$ " are run and their stdout is
                            compared with the lines that follow ("..." matches
                            any number of lines)
  [source,asciidoc] + [source,html]
                            the AsciiDoc is rendered and compared with the HTML

Blocks marked %skip or options=skip are ignored. With no FILE arguments every
file matching the configured include glob (default **/*.adoc) under the current
directory is tested.

EXAMPLES:
  adoc-doctest
  adoc-doctest README.adoc docs/install.adoc
"#)]
#[command(version)]
pub struct DoctestCli {
    /// AsciiDoc files to test (default: every file matching the include glob)
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}
