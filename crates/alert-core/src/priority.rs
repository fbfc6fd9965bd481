//! Weighted Priority Scoring

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::alert::Alert;
use crate::deviation::deviation_percent;

/// Weight of the normalized severity term
const SEVERITY_WEIGHT: f64 = 0.4;
/// Weight of the capped deviation term
const DEVIATION_WEIGHT: f64 = 0.4;
/// Weight of the affected-components term
const COMPONENTS_WEIGHT: f64 = 0.2;
/// Severity weight that normalizes to 1.0
const MAX_SEVERITY_WEIGHT: f64 = 10.0;
/// Affected component count at which the components term saturates
const COMPONENTS_SATURATION: f64 = 10.0;

/// Priority of a single alert
///
/// `0.4 * severity/10 + 0.4 * min(deviation/100, 1) + 0.2 * min(components/10, 1)`.
///
/// The deviation term is capped above but not floored, so a value well below
/// its threshold contributes negatively and the result may drop under zero.
/// Use [`PriorityScorer`] with a [`NegativeDeviation`] policy to bound it.
pub fn priority(
    severity_weight: u32,
    value: i64,
    threshold: i64,
    affected_components: usize,
) -> f64 {
    let (severity_score, deviation_score, components_score) =
        terms(severity_weight, value, threshold, affected_components);

    SEVERITY_WEIGHT * severity_score
        + DEVIATION_WEIGHT * deviation_score
        + COMPONENTS_WEIGHT * components_score
}

fn terms(
    severity_weight: u32,
    value: i64,
    threshold: i64,
    affected_components: usize,
) -> (f64, f64, f64) {
    let deviation = deviation_percent(value, threshold);
    let severity_score = f64::from(severity_weight) / MAX_SEVERITY_WEIGHT;
    let components_score = (affected_components as f64 / COMPONENTS_SATURATION).min(1.0);
    let deviation_score = (deviation / 100.0).min(1.0);
    (severity_score, deviation_score, components_score)
}

/// How a below-threshold value affects the priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NegativeDeviation {
    /// Negative deviation lowers the score, possibly below zero
    #[default]
    Keep,
    /// Deviation term floored at zero before weighting
    Floor,
    /// Final priority clamped to [0, 1]
    Clamp,
}

/// An alert paired with its priority for one scoring run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredAlert<'a> {
    pub alert: &'a Alert,
    pub priority: f64,
    /// Distinct components affected within the alert's service
    pub affected_components: usize,
}

/// Scores alerts with a configurable negative-deviation policy
#[derive(Debug, Clone, Copy, Default)]
pub struct PriorityScorer {
    policy: NegativeDeviation,
}

impl PriorityScorer {
    /// Create a scorer with the given policy
    pub fn new(policy: NegativeDeviation) -> Self {
        Self { policy }
    }

    /// Active policy
    pub fn policy(&self) -> NegativeDeviation {
        self.policy
    }

    /// Score raw inputs under this scorer's policy
    pub fn score(
        &self,
        severity_weight: u32,
        value: i64,
        threshold: i64,
        affected_components: usize,
    ) -> f64 {
        match self.policy {
            NegativeDeviation::Keep => {
                priority(severity_weight, value, threshold, affected_components)
            }
            NegativeDeviation::Floor => {
                let (severity_score, deviation_score, components_score) =
                    terms(severity_weight, value, threshold, affected_components);
                SEVERITY_WEIGHT * severity_score
                    + DEVIATION_WEIGHT * deviation_score.max(0.0)
                    + COMPONENTS_WEIGHT * components_score
            }
            NegativeDeviation::Clamp => {
                priority(severity_weight, value, threshold, affected_components).clamp(0.0, 1.0)
            }
        }
    }

    /// Score every alert in the batch
    ///
    /// An alert's affected-component count is the number of distinct
    /// components among the batch's alerts of the same service. Results are
    /// ordered by descending priority; equal priorities keep input order.
    pub fn score_alerts<'a>(&self, alerts: &[&'a Alert]) -> Vec<ScoredAlert<'a>> {
        let mut components_by_service: HashMap<&str, HashSet<&str>> = HashMap::new();
        for alert in alerts {
            components_by_service
                .entry(alert.service.as_str())
                .or_default()
                .insert(alert.component.as_str());
        }

        let mut scored: Vec<ScoredAlert<'a>> = alerts
            .iter()
            .map(|&alert| {
                let affected_components = components_by_service
                    .get(alert.service.as_str())
                    .map_or(0, HashSet::len);
                let priority = self.score(
                    alert.severity_weight(),
                    alert.value,
                    alert.threshold,
                    affected_components,
                );
                debug!("Scored alert {}: priority {:.3}", alert.id, priority);
                ScoredAlert {
                    alert,
                    priority,
                    affected_components,
                }
            })
            .collect();

        // Stable sort keeps input order among ties
        scored.sort_by(|a, b| b.priority.total_cmp(&a.priority));
        scored
    }
}
