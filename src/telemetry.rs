//! Telemetry - structured logging initialization.
//!
//! Installs the global tracing subscriber from `LogConfig`. Safe to call
//! more than once; later calls keep the first subscriber.

use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

/// Initialize the tracing subscriber.
///
/// The filter comes from `config.level`, overridable at runtime through
/// `RUST_LOG`.
pub fn init(config: &LogConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if config.json {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .try_init();
    } else {
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    }
}
