//! Error types for the `bootconf` binary.

use std::sync::Arc;

use bootconf::BootError;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors surfaced by the `bootconf` binary.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Resolve(#[from] Arc<BootError>),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write output: {0}")]
    Output(#[source] std::io::Error),

    #[error("failed to serialize configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to install log subscriber: {0}")]
    Logging(String),
}
