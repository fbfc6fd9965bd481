//! Alertscan - Main Entry Point
//!
//! Filters a batch of alerts by service, severity, and time window, then
//! reports how many survive per component (and, with `--score`, their
//! priorities).

mod logging;

use alert_pipeline::{run_scan, ScanConfig, ScanOverrides, ScanSummary};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "alertscan")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Filter, score, and group alerts by component", long_about = None)]
struct Cli {
    /// Path to alerts file [default: alerts.json]
    #[arg(long)]
    file: Option<PathBuf>,

    /// Filter time start (RFC 3339)
    #[arg(long)]
    start: Option<String>,

    /// Filter time end (RFC 3339)
    #[arg(long)]
    end: Option<String>,

    /// Filter service name (empty means no filter)
    #[arg(long)]
    service: Option<String>,

    /// Minimal alert severity (critical|warning|info|debug) [default: debug]
    #[arg(long)]
    severity: Option<String>,

    /// Compute a priority score for every surviving alert
    #[arg(long)]
    score: bool,

    /// How below-threshold values affect priority (keep|floor|clamp)
    #[arg(long)]
    negative_deviation: Option<String>,

    /// Configuration file (TOML, JSON, or YAML)
    #[arg(long, env = "ALERTSCAN_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long)]
    debug: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn overrides(&self) -> ScanOverrides {
        ScanOverrides {
            file: self.file.clone(),
            service: self.service.clone(),
            min_severity: self.severity.clone(),
            start: self.start.clone(),
            end: self.end.clone(),
            score: self.score.then_some(true),
            negative_deviation: self.negative_deviation.clone(),
            verbose: self.debug.then_some(true),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Configuration decides the log level, so load it before logging starts
    let config = ScanConfig::load(cli.config.as_deref(), cli.overrides())
        .context("Failed to load configuration");
    logging::init_logging(verbose_logging(&cli, config.as_ref().ok()), cli.json);

    info!("Starting alertscan v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = config.and_then(|config| run(&config)) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

/// DEBUG logging when `--debug` is passed or any config layer sets `verbose`
fn verbose_logging(cli: &Cli, config: Option<&ScanConfig>) -> bool {
    cli.debug || config.is_some_and(|c| c.verbose)
}

fn run(config: &ScanConfig) -> Result<()> {
    if config.verbose {
        info!("File path: {}", config.file.display());
        info!(
            "Parsing alerts from {} to {}",
            config.start.as_deref().unwrap_or("-"),
            config.end.as_deref().unwrap_or("-")
        );
        info!("Severity filter: {}", config.min_severity);
        if !config.service.is_empty() {
            info!("Service filter: {}", config.service);
        }
    }

    let summary = run_scan(config).context("Scan aborted")?;
    report(&summary);
    Ok(())
}

fn report(summary: &ScanSummary) {
    info!("Found {} alerts", summary.total);

    info!("Alerts by component:");
    for c in &summary.components {
        info!("[{}] {} alerts", c.component, c.count);
    }

    if let Some(priorities) = &summary.priorities {
        info!("Alerts by priority:");
        for p in priorities {
            info!("{:.3} {} [{}]", p.priority, p.id, p.component);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_become_overrides() {
        let cli = Cli::parse_from([
            "alertscan",
            "--file",
            "batch.json",
            "--severity",
            "warning",
            "--start",
            "2024-03-01T00:00:00Z",
            "--debug",
        ]);
        let overrides = cli.overrides();

        assert_eq!(overrides.file, Some(PathBuf::from("batch.json")));
        assert_eq!(overrides.min_severity.as_deref(), Some("warning"));
        assert_eq!(overrides.start.as_deref(), Some("2024-03-01T00:00:00Z"));
        assert_eq!(overrides.end, None);
        assert_eq!(overrides.verbose, Some(true));
        // Absent boolean flags leave lower layers in effect
        assert_eq!(overrides.score, None);
    }

    #[test]
    fn test_verbose_config_enables_debug_logging() {
        let cli = Cli::parse_from(["alertscan"]);
        assert!(!verbose_logging(&cli, None));
        assert!(!verbose_logging(&cli, Some(&ScanConfig::default())));

        let config = ScanConfig {
            verbose: true,
            ..Default::default()
        };
        assert!(verbose_logging(&cli, Some(&config)));

        let cli = Cli::parse_from(["alertscan", "--debug"]);
        assert!(verbose_logging(&cli, None));
    }
}
