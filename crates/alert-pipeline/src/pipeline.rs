//! Pipeline Orchestrator

use alert_core::{
    group_by_component, Alert, AlertFilter, AlertGroups, PriorityScorer, ScoredAlert,
};
use alert_ingest::{AlertSource, JsonFileSource};
use tracing::{debug, info};

use crate::error::ScanError;
use crate::settings::{ScanConfig, ScanPlan};
use crate::summary::{AlertPriority, ComponentCount, ScanSummary};

/// Filter, optionally score, then group a batch of alerts
#[derive(Debug, Clone, Default)]
pub struct AlertPipeline {
    filter: AlertFilter,
    scorer: Option<PriorityScorer>,
}

/// Output of one pipeline run, borrowing from the input batch
#[derive(Debug, Clone)]
pub struct ScanResult<'a> {
    /// Surviving alerts in input order
    pub alerts: Vec<&'a Alert>,
    /// Surviving alerts by component
    pub groups: AlertGroups<'a>,
    /// Priorities, highest first, when a scorer is configured
    pub scores: Option<Vec<ScoredAlert<'a>>>,
}

impl AlertPipeline {
    /// Create a pipeline from its stages
    pub fn new(filter: AlertFilter, scorer: Option<PriorityScorer>) -> Self {
        Self { filter, scorer }
    }

    /// Create a pipeline from a validated plan
    pub fn from_plan(plan: &ScanPlan) -> Self {
        Self::new(plan.filter.clone(), plan.scorer)
    }

    /// Run the batch through every stage
    pub fn run<'a>(&self, alerts: &'a [Alert]) -> ScanResult<'a> {
        let kept = self.filter.apply(alerts);
        debug!("{} of {} alerts passed the filter", kept.len(), alerts.len());

        let scores = self.scorer.map(|scorer| scorer.score_alerts(&kept));
        let groups = group_by_component(kept.iter().copied());

        ScanResult {
            alerts: kept,
            groups,
            scores,
        }
    }
}

impl ScanResult<'_> {
    /// Plain-data summary of this result
    pub fn summary(&self) -> ScanSummary {
        let mut components: Vec<ComponentCount> = self
            .groups
            .iter()
            .map(|(component, alerts)| ComponentCount {
                component: component.to_string(),
                count: alerts.len(),
            })
            .collect();
        components.sort_by(|a, b| a.component.cmp(&b.component));

        let priorities = self.scores.as_ref().map(|scores| {
            scores
                .iter()
                .map(|s| AlertPriority {
                    id: s.alert.id.clone(),
                    component: s.alert.component.clone(),
                    priority: s.priority,
                })
                .collect()
        });

        ScanSummary {
            total: self.alerts.len(),
            components,
            priorities,
        }
    }
}

/// Load a batch from `source` and run it through the plan's pipeline
pub fn scan_source<S: AlertSource>(source: &S, plan: &ScanPlan) -> Result<ScanSummary, ScanError> {
    let alerts = source.load_alerts()?;
    let summary = AlertPipeline::from_plan(plan).run(&alerts).summary();
    info!(
        "Scan complete: {} alerts across {} components",
        summary.total,
        summary.components.len()
    );
    Ok(summary)
}

/// Validate `config`, read its alert file, and summarize the scan
pub fn run_scan(config: &ScanConfig) -> Result<ScanSummary, ScanError> {
    let plan = config.validate()?;
    debug!("Scanning {}", plan.file.display());
    scan_source(&JsonFileSource::new(&plan.file), &plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alert_core::{severity_weight, NegativeDeviation};
    use chrono::{DateTime, TimeZone, Utc};
    use std::path::PathBuf;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 10, minute, 0).unwrap()
    }

    fn alert(
        id: &str,
        service: &str,
        component: &str,
        severity: &str,
        minute: u32,
        value: i64,
        threshold: i64,
    ) -> Alert {
        Alert {
            id: id.to_string(),
            timestamp: at(minute),
            service: service.to_string(),
            component: component.to_string(),
            severity: severity.to_string(),
            metric: "errors".to_string(),
            value,
            threshold,
            description: String::new(),
        }
    }

    fn batch() -> Vec<Alert> {
        vec![
            alert("1", "api", "db", "critical", 0, 150, 100),
            alert("2", "api", "cache", "info", 5, 10, 100),
            alert("3", "api", "db", "warning", 10, 5, 0),
            alert("4", "web", "cdn", "critical", 15, 300, 100),
            alert("5", "api", "queue", "debug", 20, 1, 1),
        ]
    }

    #[test]
    fn test_min_severity_scenario() {
        let alerts = vec![
            alert("1", "api", "db", "critical", 0, 150, 100),
            alert("2", "api", "cache", "info", 5, 10, 100),
        ];
        let filter = AlertFilter::new().with_min_severity_weight(severity_weight("warning"));
        let result = AlertPipeline::new(filter, None).run(&alerts);

        assert_eq!(result.alerts, vec![&alerts[0]]);
        assert_eq!(result.groups.len(), 1);
        assert_eq!(result.groups["db"], vec![&alerts[0]]);

        let summary = result.summary();
        assert_eq!(summary.total, 1);
        assert_eq!(summary.count_for("db"), 1);
        assert_eq!(summary.priorities, None);
    }

    #[test]
    fn test_summary_counts_sorted() {
        let alerts = batch();
        let summary = AlertPipeline::default().run(&alerts).summary();

        assert_eq!(summary.total, 5);
        let names: Vec<&str> = summary.components.iter().map(|c| c.component.as_str()).collect();
        assert_eq!(names, vec!["cache", "cdn", "db", "queue"]);
        assert_eq!(summary.count_for("db"), 2);
        assert_eq!(summary.count_for("missing"), 0);
    }

    #[test]
    fn test_scoring_enabled() {
        let alerts = batch();
        let filter = AlertFilter::new().with_service("api").with_min_severity_weight(5);
        let pipeline = AlertPipeline::new(filter, Some(PriorityScorer::default()));
        let summary = pipeline.run(&alerts).summary();

        let priorities = summary.priorities.unwrap();
        let ids: Vec<&str> = priorities.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);

        // Alert 3: warning, zero threshold, one component (db) in api
        let expected = 0.4 * 0.5 + 0.4 * 0.0 + 0.2 * 0.1;
        assert!((priorities[1].priority - expected).abs() < 1e-9);
    }

    #[test]
    fn test_empty_batch() {
        let alerts: Vec<Alert> = Vec::new();
        let pipeline = AlertPipeline::new(AlertFilter::new(), Some(PriorityScorer::default()));
        let result = pipeline.run(&alerts);

        assert!(result.alerts.is_empty());
        assert!(result.groups.is_empty());
        assert_eq!(result.scores.as_deref(), Some(&[][..]));
        assert_eq!(result.summary().total, 0);
    }

    #[test]
    fn test_scan_source_in_memory() {
        let plan = ScanConfig {
            start: Some("2024-03-01T10:05:00Z".to_string()),
            end: Some("2024-03-01T10:15:00Z".to_string()),
            score: true,
            negative_deviation: NegativeDeviation::Clamp,
            ..Default::default()
        }
        .validate()
        .unwrap();

        let summary = scan_source(&batch(), &plan).unwrap();
        assert_eq!(summary.total, 3);
        for p in summary.priorities.unwrap() {
            assert!((0.0..=1.0).contains(&p.priority));
        }
    }

    #[test]
    fn test_run_scan_inverted_window_aborts_before_reading() {
        let config = ScanConfig {
            file: PathBuf::from("/nonexistent/alerts.json"),
            start: Some("2024-03-02T00:00:00Z".to_string()),
            end: Some("2024-03-01T00:00:00Z".to_string()),
            ..Default::default()
        };
        assert!(matches!(run_scan(&config), Err(ScanError::Configuration(_))));
    }

    #[test]
    fn test_run_scan_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = ScanConfig {
            file: dir.path().join("alerts.json"),
            ..Default::default()
        };
        assert!(matches!(run_scan(&config), Err(ScanError::Decode(_))));
    }

    #[test]
    fn test_run_scan_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alerts.json");
        std::fs::write(
            &path,
            r#"{"alerts": [
                {"id": "a", "timestamp": "2024-03-01T10:00:00Z", "service": "api",
                 "component": "db", "severity": "critical", "value": 150, "threshold": 100},
                {"id": "b", "timestamp": "2024-03-01T11:00:00Z", "service": "api",
                 "component": "cache", "severity": "info", "value": 10, "threshold": 100}
            ]}"#,
        )
        .unwrap();

        let config = ScanConfig {
            file: path,
            min_severity: "warning".to_string(),
            ..Default::default()
        };
        let summary = run_scan(&config).unwrap();
        assert_eq!(summary.total, 1);
        assert_eq!(
            summary.components,
            vec![ComponentCount {
                component: "db".to_string(),
                count: 1
            }]
        );
    }
}
