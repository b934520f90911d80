//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

/// Builds the filter: `RUST_LOG` wins, then the configured directive, then
/// plain `info` if the directive does not parse.
#[must_use]
pub fn env_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        config.filter.parse::<EnvFilter>().unwrap_or_else(|e| {
            eprintln!(
                "WARN: log filter '{}' is invalid ({e}); falling back to 'info'",
                config.filter
            );
            EnvFilter::new("info")
        })
    })
}

/// Installs the global subscriber. Fails if one is already installed.
pub fn init_tracing(
    config: &LogConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_target(true);

    if config.json {
        subscriber.json().try_init()
    } else {
        subscriber.try_init()
    }
}
