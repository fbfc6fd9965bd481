//! Alert Scan Pipeline
//!
//! Wires configuration, decoding, filtering, scoring, and grouping into a
//! single batch run. All fatal conditions (bad configuration, unreadable
//! input) surface before the filter stage; the stages themselves cannot fail.

mod error;
mod pipeline;
mod settings;
mod summary;

pub use error::{ConfigurationError, ScanError};
pub use pipeline::{run_scan, scan_source, AlertPipeline, ScanResult};
pub use settings::{ScanConfig, ScanOverrides, ScanPlan};
pub use summary::{AlertPriority, ComponentCount, ScanSummary};

pub use alert_core::{Alert, NegativeDeviation, Severity};
pub use alert_ingest::{AlertSource, DecodeError, JsonFileSource};
