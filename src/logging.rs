//! Tracing subscriber setup.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set: `debug` when verbose, otherwise
/// the configured level.
#[must_use]
pub fn default_filter(configured_level: &str, verbose: bool) -> String {
    if verbose {
        "debug".to_string()
    } else {
        configured_level.to_ascii_lowercase()
    }
}

/// Installs the global subscriber. Logs go to stderr so stdout stays clean
/// for command output. Calling this twice is harmless.
pub fn init(configured_level: &str, verbose: bool) {
    let filter = default_filter(configured_level, verbose);
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
