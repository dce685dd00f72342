//! Logging setup

use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber
///
/// `RUST_LOG` controls the filter; defaults to `info`.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
