//! Alert Sources

use alert_core::{Alert, Severity};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::DecodeError;

/// On-disk document shape
#[derive(Debug, Deserialize)]
struct AlertDocument {
    alerts: Vec<Alert>,
}

/// Anything that can yield a batch of alerts
pub trait AlertSource {
    /// Load the full batch; failures abort the scan before filtering
    fn load_alerts(&self) -> Result<Vec<Alert>, DecodeError>;
}

/// JSON document on the local filesystem
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    /// Create a source reading from `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AlertSource for JsonFileSource {
    fn load_alerts(&self) -> Result<Vec<Alert>, DecodeError> {
        load_alerts(&self.path)
    }
}

impl AlertSource for Vec<Alert> {
    fn load_alerts(&self) -> Result<Vec<Alert>, DecodeError> {
        Ok(self.clone())
    }
}

/// Read and decode the alert document at `path`
pub fn load_alerts(path: impl AsRef<Path>) -> Result<Vec<Alert>, DecodeError> {
    let path = path.as_ref();
    debug!("Reading alerts from {}", path.display());

    let data = std::fs::read(path).map_err(|source| DecodeError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let alerts = decode_alerts(&data)?;
    info!("Loaded {} alerts from {}", alerts.len(), path.display());
    Ok(alerts)
}

/// Decode an alert document from raw bytes
pub fn decode_alerts(data: &[u8]) -> Result<Vec<Alert>, DecodeError> {
    let document: AlertDocument = serde_json::from_slice(data)?;

    let unknown = document
        .alerts
        .iter()
        .filter(|a| !Severity::is_known_label(&a.severity))
        .count();
    if unknown > 0 {
        warn!("{} alerts have unrecognized severity labels, treating as debug", unknown);
    }

    Ok(document.alerts)
}
