//! Log subscriber installation.

use tracing_subscriber::EnvFilter;

use crate::error::CliError;

/// Install a stderr `fmt` subscriber.
///
/// `--verbose` forces `debug`; otherwise `RUST_LOG` applies, falling back to
/// `warn`.
pub fn init(is_verbose: bool) -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(filter(is_verbose))
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| CliError::Logging(err.to_string()))
}

fn filter(is_verbose: bool) -> EnvFilter {
    if is_verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}
