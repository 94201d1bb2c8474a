//! Logging bootstrap.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_FILTER: &str = "cat_breeds_api=info,tower_http=info";

/// Installs the global `tracing` subscriber, filtered by `RUST_LOG`.
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
