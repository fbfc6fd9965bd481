//! Service, Severity, and Time-Window Filtering

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::alert::Alert;

/// Predicates an alert must satisfy to survive a scan
///
/// The window bounds are inclusive. Callers are expected to have checked
/// `start <= end` before building the filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertFilter {
    /// Exact, case-sensitive service match; `None` accepts every service
    pub service: Option<String>,
    /// Minimum severity weight
    pub min_severity_weight: u32,
    /// Earliest accepted timestamp
    pub start: Option<DateTime<Utc>>,
    /// Latest accepted timestamp
    pub end: Option<DateTime<Utc>>,
}

impl AlertFilter {
    /// Create a filter that accepts everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to a single service; an empty name means no restriction
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        let service = service.into();
        self.service = if service.is_empty() { None } else { Some(service) };
        self
    }

    /// Require at least the given severity weight
    pub fn with_min_severity_weight(mut self, weight: u32) -> Self {
        self.min_severity_weight = weight;
        self
    }

    /// Restrict to the inclusive window `[start, end]`
    pub fn with_window(mut self, start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    /// Check a single alert against every predicate
    pub fn matches(&self, alert: &Alert) -> bool {
        if let Some(service) = &self.service {
            if alert.service != *service {
                debug!("Alert {} skipped: service {} != {}", alert.id, alert.service, service);
                return false;
            }
        }

        let weight = alert.severity_weight();
        if weight < self.min_severity_weight {
            debug!(
                "Alert {} skipped: severity weight {} < {}",
                alert.id, weight, self.min_severity_weight
            );
            return false;
        }

        if let Some(start) = self.start {
            if alert.timestamp < start {
                debug!("Alert {} skipped: fired before {}", alert.id, start);
                return false;
            }
        }

        if let Some(end) = self.end {
            if alert.timestamp > end {
                debug!("Alert {} skipped: fired after {}", alert.id, end);
                return false;
            }
        }

        true
    }

    /// Keep the matching alerts, preserving input order
    ///
    /// Accepts owned slices (`alerts.iter()`) as well as the output of a
    /// previous call (`filtered.iter().copied()`).
    pub fn apply<'a, I>(&self, alerts: I) -> Vec<&'a Alert>
    where
        I: IntoIterator<Item = &'a Alert>,
    {
        alerts.into_iter().filter(|alert| self.matches(alert)).collect()
    }
}
