//! Logging setup for the `dk` binary.
//!
//! Events go to stderr so that stdout only carries formatted output.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::shared::env_var::EnvVars;

const DEFAULT_FILTER: &str = "warn";

/// Builds the filter from DATEKIT_LOG, falling back to `warn` when unset or invalid.
pub fn filter_from(env: &EnvVars) -> EnvFilter {
    env.log
        .as_deref()
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. Safe to call more than once; later calls are ignored.
pub fn init(env: &EnvVars) {
    let filter = filter_from(env);
    let registry = tracing_subscriber::registry().with(filter);

    let result = if env.json_logs() {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            )
            .try_init()
    };

    if result.is_ok() {
        tracing::debug!(json = env.json_logs(), "Logging initialized");
    }
}
