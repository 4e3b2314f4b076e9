#![forbid(unsafe_code)]

use crate::config::{AppConfig, DEFAULT_LOG_FILTER};
use tracing_subscriber::EnvFilter;

/// Installs the fmt subscriber once; later calls are no-ops.
pub fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
