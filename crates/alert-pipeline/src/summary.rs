//! Scan Summary

use serde::Serialize;

/// Number of surviving alerts for one component
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentCount {
    pub component: String,
    pub count: usize,
}

/// Priority assigned to one surviving alert
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertPriority {
    pub id: String,
    pub component: String,
    pub priority: f64,
}

/// Plain-data result of a scan, free of formatting concerns
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanSummary {
    /// Alerts surviving the filter
    pub total: usize,
    /// Per-component counts, sorted by component name
    pub components: Vec<ComponentCount>,
    /// Highest priority first; `None` when scoring was not requested
    pub priorities: Option<Vec<AlertPriority>>,
}

impl ScanSummary {
    /// Count for a single component, zero if absent
    pub fn count_for(&self, component: &str) -> usize {
        self.components
            .iter()
            .find(|c| c.component == component)
            .map_or(0, |c| c.count)
    }
}
