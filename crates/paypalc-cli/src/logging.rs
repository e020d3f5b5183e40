//! Tracing subscriber setup driven by the verbosity flags.

use anyhow::{Context, Result};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Installs the global subscriber. Logs go to stderr so stdout stays
/// reserved for `--list-events` output.
pub fn initialize_logging(verbose: bool, quiet: bool) -> Result<()> {
    let level = if verbose {
        Level::DEBUG
    } else if quiet {
        Level::ERROR
    } else {
        Level::WARN
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install tracing subscriber")
}
