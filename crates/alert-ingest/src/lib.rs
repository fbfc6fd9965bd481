//! Alert Ingestion
//!
//! Decodes alert documents (a JSON object with a top-level `alerts` array)
//! into [`Alert`] records.

mod error;
mod source;

pub use error::DecodeError;
pub use source::{decode_alerts, load_alerts, AlertSource, JsonFileSource};

pub use alert_core::Alert;
