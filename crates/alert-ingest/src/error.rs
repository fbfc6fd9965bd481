//! Decode Error Types

use std::path::PathBuf;
use thiserror::Error;

/// Errors while reading or decoding an alert document
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Source could not be read
    #[error("unable to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source is not a valid alert document
    #[error("unable to parse alerts: {0}")]
    Json(#[from] serde_json::Error),
}
