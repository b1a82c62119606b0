//! Tracing subscriber setup.
//!
//! Strategies only emit `tracing` events; this installs a formatter so they
//! show up on stderr.

use std::sync::OnceLock;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static INIT: OnceLock<()> = OnceLock::new();

const DEFAULT_FILTER: &str = "enclosure_solver=info,enclosure_benchmark=info";

/// Installs the global subscriber.
///
/// Safe to call multiple times - only the first call has effect. `RUST_LOG`
/// overrides the default filter. If another subscriber is already installed
/// it is left in place.
pub fn init() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
        tracing::info!(event = "logging_ready");
    }
}
