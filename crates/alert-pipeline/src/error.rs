//! Pipeline Error Types

use alert_ingest::DecodeError;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Invalid scan configuration, detected before any alert is read
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// Window bound is not an RFC 3339 timestamp
    #[error("unable to parse {field} time {value:?}: {source}")]
    InvalidTimestamp {
        field: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Window ends before it starts
    #[error("scan filter ends earlier ({end}) than it starts ({start}), please check the input")]
    InvertedWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// Configuration sources could not be read or merged
    #[error("unable to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

/// Any fatal condition that aborts a scan
#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}
