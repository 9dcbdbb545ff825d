//! CLI entry points
//!
//! Each `run_*` function handles ALL output including errors and returns
//! `Result<(), ExitCode>`; the binaries only map the code to the process exit.

use std::ffi::OsString;
use std::path::PathBuf;

use camino::Utf8Path;
use clap::Parser;
use clap::error::ErrorKind;

use adocheck_config::Config;
use adocheck_convert::AsciidoctorConverter;
use adocheck_doctest::Doctester;
use adocheck_runner::NativeRunner;
use adocheck_utils::ExitCode;
use adocheck_utils::logging::init_tracing;

use super::args::{CommonArgs, DoctestCli, ValidateCli};
use super::{doctest, validate};
use crate::error::AdocheckError;
use crate::selector::DocumentSelector;

/// Entry point for `adoc-validate`.
pub fn run_validate() -> Result<(), ExitCode> {
    run_validate_from(std::env::args_os())
}

/// Entry point for `adoc-doctest`.
pub fn run_doctest() -> Result<(), ExitCode> {
    run_doctest_from(std::env::args_os())
}

/// `adoc-validate` with an explicit argv (first element is the program name).
pub fn run_validate_from<I, T>(args: I) -> Result<(), ExitCode>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let Some(cli) = parse_args::<ValidateCli, _, _>(args)? else {
        return Ok(());
    };
    init_logging(&cli.common);

    let Some(file) = cli.file else {
        eprintln!("{}", validate::USAGE);
        return Err(ExitCode::FAILURE);
    };

    let config = load_config(&cli.common)?;
    let converter = locate_backend(&config)?;

    finish(validate::execute(
        &file,
        &converter,
        &config,
        &mut std::io::stderr().lock(),
    ))
}

/// `adoc-doctest` with an explicit argv (first element is the program name).
pub fn run_doctest_from<I, T>(args: I) -> Result<(), ExitCode>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let Some(cli) = parse_args::<DoctestCli, _, _>(args)? else {
        return Ok(());
    };
    init_logging(&cli.common);

    let config = load_config(&cli.common)?;
    let converter = locate_backend(&config)?;

    let files = if cli.files.is_empty() {
        select_default_files(&config)?
    } else {
        cli.files
    };

    let runner = NativeRunner::new();
    let tester = Doctester::new(&converter, &runner, &config);
    finish(doctest::execute(
        &files,
        &tester,
        &mut std::io::stdout().lock(),
    ))
}

/// Parse argv; `Ok(None)` when clap printed help or version.
fn parse_args<C, I, T>(args: I) -> Result<Option<C>, ExitCode>
where
    C: Parser,
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match C::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) => {
            let _ = err.print();
            match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => Ok(None),
                _ => Err(ExitCode::FAILURE),
            }
        }
    }
}

fn init_logging(common: &CommonArgs) {
    if let Err(e) = init_tracing(common.verbose) {
        eprintln!("Warning: logging disabled: {e}");
    }
}

fn report(err: &AdocheckError) -> ExitCode {
    eprintln!("{}", err.display_for_user());
    err.to_exit_code()
}

fn load_config(common: &CommonArgs) -> Result<Config, ExitCode> {
    let config = Config::discover(&common.to_cli_args())
        .map_err(|e| report(&AdocheckError::from(e)))?;

    if config.verbose {
        let mut keys: Vec<_> = config.source_attribution.iter().collect();
        keys.sort_by(|a, b| a.0.cmp(b.0));
        for (key, source) in keys {
            tracing::debug!(key = %key, source = %source, "configuration value");
        }
    }

    Ok(config)
}

fn locate_backend(config: &Config) -> Result<AsciidoctorConverter, ExitCode> {
    AsciidoctorConverter::locate(&config.backend).map_err(|e| report(&AdocheckError::from(e)))
}

fn select_default_files(config: &Config) -> Result<Vec<PathBuf>, ExitCode> {
    let selector =
        DocumentSelector::from_config(&config.doctest).map_err(|e| report(&AdocheckError::from(e)))?;
    let files = selector
        .select_files(Utf8Path::new("."))
        .map_err(|e| report(&e))?;
    Ok(files.into_iter().map(PathBuf::from).collect())
}

fn finish(code: ExitCode) -> Result<(), ExitCode> {
    if code.is_success() { Ok(()) } else { Err(code) }
}
