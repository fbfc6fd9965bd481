//! Logging setup

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber
///
/// `RUST_LOG` takes precedence; otherwise INFO, or DEBUG when `verbose`.
pub fn init_logging(verbose: bool, json: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr);

    // Ignore the error if a subscriber is already installed
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
