//! Scan Configuration

use alert_core::{severity_weight, AlertFilter, NegativeDeviation, PriorityScorer, Severity};
use chrono::{DateTime, Utc};
use config::{Config, Environment, File, Map};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::ConfigurationError;

/// Default configuration file looked up in the working directory
const DEFAULT_CONFIG_FILE: &str = "alertscan";

/// Prefix for environment overrides, e.g. `ALERTSCAN_MIN_SEVERITY`
const ENV_PREFIX: &str = "ALERTSCAN";

/// Scan configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Alert document to scan
    pub file: PathBuf,
    /// Service to keep (empty keeps all)
    pub service: String,
    /// Minimum severity label
    pub min_severity: String,
    /// Inclusive window start (RFC 3339)
    pub start: Option<String>,
    /// Inclusive window end (RFC 3339)
    pub end: Option<String>,
    /// Compute per-alert priorities
    pub score: bool,
    /// Treatment of below-threshold values when scoring
    pub negative_deviation: NegativeDeviation,
    /// Verbose diagnostics
    pub verbose: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("alerts.json"),
            service: String::new(),
            min_severity: Severity::Debug.as_str().to_string(),
            start: None,
            end: None,
            score: false,
            negative_deviation: NegativeDeviation::Keep,
            verbose: false,
        }
    }
}

/// Values supplied on the command line; `None` leaves lower layers in effect
#[derive(Debug, Clone, Default)]
pub struct ScanOverrides {
    pub file: Option<PathBuf>,
    pub service: Option<String>,
    pub min_severity: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub score: Option<bool>,
    pub negative_deviation: Option<String>,
    pub verbose: Option<bool>,
}

/// Validated configuration, ready to drive a pipeline
#[derive(Debug, Clone)]
pub struct ScanPlan {
    pub file: PathBuf,
    pub filter: AlertFilter,
    pub scorer: Option<PriorityScorer>,
}

impl ScanConfig {
    /// Load configuration from layered sources
    ///
    /// Precedence, lowest first: built-in defaults, the config file
    /// (`config_file` if given, else an optional `alertscan.toml`),
    /// `ALERTSCAN_*` environment variables, then `overrides`.
    pub fn load(
        config_file: Option<&Path>,
        overrides: ScanOverrides,
    ) -> Result<Self, ConfigurationError> {
        Self::load_with_env(config_file, overrides, None)
    }

    /// Same as [`ScanConfig::load`], reading environment variables from
    /// `env` instead of the process environment when given
    fn load_with_env(
        config_file: Option<&Path>,
        overrides: ScanOverrides,
        env: Option<Map<String, String>>,
    ) -> Result<Self, ConfigurationError> {
        let file_source = match config_file {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        // Values stay strings; numeric-looking service names must not be reparsed
        let env_source = Environment::with_prefix(ENV_PREFIX).source(env);

        let config = Config::builder()
            .add_source(file_source)
            .add_source(env_source)
            .set_override_option("file", overrides.file.map(|p| p.display().to_string()))?
            .set_override_option("service", overrides.service)?
            .set_override_option("min_severity", overrides.min_severity)?
            .set_override_option("start", overrides.start)?
            .set_override_option("end", overrides.end)?
            .set_override_option("score", overrides.score)?
            .set_override_option("negative_deviation", overrides.negative_deviation)?
            .set_override_option("verbose", overrides.verbose)?
            .build()?;

        let scan: ScanConfig = config.try_deserialize()?;
        debug!("Loaded scan configuration: {:?}", scan);
        Ok(scan)
    }

    /// Parse and cross-check the configuration
    pub fn validate(&self) -> Result<ScanPlan, ConfigurationError> {
        let start = parse_bound("start", self.start.as_deref())?;
        let end = parse_bound("end", self.end.as_deref())?;

        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(ConfigurationError::InvertedWindow { start, end });
            }
        }

        if !Severity::is_known_label(&self.min_severity) {
            warn!(
                "Unrecognized minimum severity {:?}, accepting all severities",
                self.min_severity
            );
        }

        let filter = AlertFilter::new()
            .with_service(self.service.clone())
            .with_min_severity_weight(severity_weight(&self.min_severity))
            .with_window(start, end);

        Ok(ScanPlan {
            file: self.file.clone(),
            filter,
            scorer: self.score.then(|| PriorityScorer::new(self.negative_deviation)),
        })
    }
}

fn parse_bound(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<DateTime<Utc>>, ConfigurationError> {
    match value {
        None | Some("") => Ok(None),
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|t| Some(t.with_timezone(&Utc)))
            .map_err(|source| ConfigurationError::InvalidTimestamp {
                field,
                value: raw.to_string(),
                source,
            }),
    }
}
