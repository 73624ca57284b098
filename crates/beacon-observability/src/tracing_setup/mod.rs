//! Tracing setup: one fmt subscriber, filtered by `BEACON_LOG`.

pub mod events;

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use beacon_core::config::ObservabilityConfig;

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV_VAR: &str = "BEACON_LOG";

static INIT: Once = Once::new();

/// Install the global subscriber. Later calls are no-ops.
///
/// `BEACON_LOG` wins over `config.log_level`. Output goes to stderr so
/// command output on stdout stays machine-readable.
pub fn init_tracing(config: &ObservabilityConfig) {
    INIT.call_once(|| {
        let filter = build_filter(std::env::var(LOG_ENV_VAR).ok().as_deref(), &config.log_level);
        let registry = tracing_subscriber::registry().with(filter);
        let result = if config.json {
            registry
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_writer(std::io::stderr),
                )
                .try_init()
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_writer(std::io::stderr),
                )
                .try_init()
        };
        if let Err(e) = result {
            eprintln!("tracing already initialized: {e}");
        }
    });
}

/// Filter from the environment directive, else the configured level, else `info`.
pub fn build_filter(env_directive: Option<&str>, configured: &str) -> EnvFilter {
    env_directive
        .and_then(|d| EnvFilter::try_new(d).ok())
        .or_else(|| EnvFilter::try_new(configured).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}
