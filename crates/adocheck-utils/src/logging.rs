//! Logging setup for the adocheck binaries
//!
//! Events go to stderr through `tracing-subscriber`. The default filter is
//! `warn` so a clean run stays silent; `RUST_LOG` overrides it.

use std::io::IsTerminal;
use tracing::{Level, span};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str =
    "adocheck=debug,adocheck_convert=debug,adocheck_doctest=debug,adocheck_runner=debug,adocheck_config=debug,warn";

/// Check if colored output should be used.
///
/// Returns true only if stderr is a terminal and `NO_COLOR` is not set.
fn use_color() -> bool {
    std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

fn default_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(if verbose { VERBOSE_FILTER } else { "warn" }))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Initialize the tracing subscriber.
///
/// Verbose mode shows targets and span close events; the default is a compact
/// single-line format without targets.
pub fn init_tracing(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(use_color())
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_line_number(false)
        .with_file(false);

    if verbose {
        tracing_subscriber::registry()
            .with(default_filter(true))
            .with(
                layer
                    .with_target(true)
                    .with_span_events(fmt::format::FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(default_filter(false))
            .with(layer.with_target(false).compact())
            .try_init()?;
    }

    Ok(())
}

/// Span covering the processing of one document.
pub fn document_span(tool: &'static str, path: &str) -> tracing::Span {
    span!(Level::INFO, "document", tool, path = %path)
}
