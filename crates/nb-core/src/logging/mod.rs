//! Structured logging setup.
//!
//! The inference code only emits `tracing` events; installing a subscriber is
//! left to the embedding application. These helpers install one that writes
//! to stderr as human-readable lines or JSONL.
//!
//! `RUST_LOG`, when set, replaces the configured level filter.

pub mod config;

pub use config::{LogConfig, LogFormat, LogLevel};

use std::io::IsTerminal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, EnvFilter};

fn build_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.filter_directive()))
}

/// Install the global subscriber.
///
/// Fails if a global subscriber is already set.
pub fn try_init_logging(config: &LogConfig) -> Result<(), TryInitError> {
    let filter = build_filter(config);

    match config.format {
        LogFormat::Human => {
            let use_ansi = std::io::stderr().is_terminal();
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(use_ansi);

            if config.timestamps {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt_layer)
                    .try_init()
            } else {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt_layer.without_time())
                    .try_init()
            }
        }
        LogFormat::Jsonl => {
            let json_layer = fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(false);
            tracing_subscriber::registry()
                .with(filter)
                .with(json_layer)
                .try_init()
        }
    }
}

/// Install the global subscriber, keeping an existing one if already set.
///
/// Returns whether this call installed it.
pub fn init_logging(config: &LogConfig) -> bool {
    try_init_logging(config).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_harmless() {
        let config = LogConfig::default().with_level(LogLevel::Off);
        let _ = init_logging(&config);
        // A subscriber is installed now, whether by this test or another one.
        assert!(!init_logging(&config));
        assert!(try_init_logging(&config.with_format(LogFormat::Jsonl)).is_err());
    }
}
