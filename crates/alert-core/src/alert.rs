//! Alert record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::severity::severity_weight;

/// A single reported anomaly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// Opaque unique identifier
    pub id: String,
    /// When the alert fired
    pub timestamp: DateTime<Utc>,
    /// Service the alert belongs to
    pub service: String,
    /// Sub-part of the service; the grouping key
    pub component: String,
    /// Severity label (critical, warning, info, debug or anything else)
    pub severity: String,
    /// Metric name, informational only
    #[serde(default)]
    pub metric: String,
    /// Observed value
    pub value: i64,
    /// Threshold the value is compared against (may be zero)
    pub threshold: i64,
    /// Free-text description, informational only
    #[serde(default)]
    pub description: String,
}

impl Alert {
    /// Numeric severity weight of this alert
    pub fn severity_weight(&self) -> u32 {
        severity_weight(&self.severity)
    }
}
