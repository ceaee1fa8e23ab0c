// src/error.rs
use pathnorm_jpath::JPathError;
use thiserror::Error;

/// Errors surfaced by the command-line front end.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Cannot normalize '{expression}': {source}")]
    Normalize {
        expression: String,
        #[source]
        source: JPathError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),
}
