//! Logging setup for binaries.
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the embedding program. [`init_logging`] is the one the bundled CLI
//! uses.

use tracing_subscriber::EnvFilter;

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Installs a global `fmt` subscriber writing to stderr.
///
/// The filter comes from `RUST_LOG`, falling back to `default_directive`.
/// Returns `false` if a global subscriber was already set.
pub fn init_logging(format: LogFormat, default_directive: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    match format {
        LogFormat::Text => builder.try_init().is_ok(),
        LogFormat::Json => builder.json().try_init().is_ok(),
    }
}
