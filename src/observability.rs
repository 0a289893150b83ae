//! `tracing` subscriber setup for binaries and tests embedding the engine.
//!
//! The library only emits events; installing a subscriber is the host
//! process's call. [`init_tracing`] is a convenience for hosts without their
//! own setup. Repeated calls are no-ops.

use tracing_subscriber::EnvFilter;

/// Where formatted events go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// Captured per test by libtest
    TestWriter,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Filter applied when `RUST_LOG` is unset
    pub default_filter: String,
    pub target: LogTarget,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            default_filter: "product_scraper=info".to_string(),
            target: LogTarget::Stderr,
        }
    }
}

/// Install a global fmt subscriber. Returns `false` if one was already set.
pub fn init_tracing(config: &LogConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match config.target {
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init().is_ok(),
        LogTarget::TestWriter => builder.with_test_writer().try_init().is_ok(),
    }
}
