//! Alert Scoring Core
//!
//! Pure, in-memory building blocks for batch alert analysis:
//! - Severity classification (label to weight)
//! - Deviation of an observed value from its threshold
//! - Weighted priority scoring
//! - Service, severity, and time-window filtering
//! - Grouping by affected component

mod alert;
mod deviation;
mod filter;
mod group;
mod priority;
mod severity;

pub use alert::Alert;
pub use deviation::deviation_percent;
pub use filter::AlertFilter;
pub use group::{group_by_component, AlertGroups};
pub use priority::{priority, NegativeDeviation, PriorityScorer, ScoredAlert};
pub use severity::{severity_weight, Severity};
