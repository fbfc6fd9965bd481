//! Severity classification

use std::fmt;

/// Alert severity class
///
/// Ordered from least to most severe, so `Severity::Debug < Severity::Critical`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    #[default]
    Debug,
    Info,
    Warning,
    Critical,
}

impl Severity {
    /// Classify a severity label
    ///
    /// Total over all strings: empty, unknown, or `debug` labels map to `Debug`.
    /// Matching is exact and case-sensitive.
    pub fn from_label(label: &str) -> Self {
        match label {
            "critical" => Severity::Critical,
            "warning" => Severity::Warning,
            "info" => Severity::Info,
            _ => Severity::Debug,
        }
    }

    /// Numeric weight used for filtering and scoring
    pub const fn weight(self) -> u32 {
        match self {
            Severity::Critical => 10,
            Severity::Warning => 5,
            Severity::Info => 1,
            Severity::Debug => 0,
        }
    }

    /// Canonical label
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Warning => "warning",
            Severity::Info => "info",
            Severity::Debug => "debug",
        }
    }

    /// Whether `label` is one of the recognized labels
    pub fn is_known_label(label: &str) -> bool {
        matches!(label, "critical" | "warning" | "info" | "debug")
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a severity label to its weight: critical 10, warning 5, info 1, anything else 0
pub fn severity_weight(label: &str) -> u32 {
    Severity::from_label(label).weight()
}
