//! Structured logging for burst-detect.
//!
//! - stdout is reserved for detection results
//! - stderr receives all log output (human or JSON lines)

pub mod config;

pub use config::{LogConfig, LogFormat, LogLevel};

use std::io::IsTerminal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Directive used when `RUST_LOG` is not set.
pub fn default_directive(config: &LogConfig) -> String {
    format!("burst_core={0},burst_detect={0}", config.level)
}

/// Filter for `config`: its `RUST_LOG` directive when that is still in
/// force and parses, otherwise the crate-level default.
pub fn build_filter(config: &LogConfig) -> EnvFilter {
    config
        .env_directive
        .as_deref()
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(default_directive(config)))
}

/// Initialize the logging subsystem.
///
/// Must be called once at startup before any logging occurs. A later call
/// leaves the first subscriber in place.
pub fn init_logging(config: &LogConfig) {
    let filter = build_filter(config);

    let registry = tracing_subscriber::registry().with(filter);
    let result = match config.format {
        LogFormat::Human => {
            let use_ansi = std::io::stderr().is_terminal();
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(use_ansi);

            if config.timestamps {
                registry.with(fmt_layer).try_init()
            } else {
                registry.with(fmt_layer.without_time()).try_init()
            }
        }
        LogFormat::Jsonl => registry
            .with(
                fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_current_span(true)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    if result.is_err() {
        tracing::debug!("logging already initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_directive_targets_crates() {
        let config = LogConfig::default().with_level(LogLevel::Debug);
        assert_eq!(default_directive(&config), "burst_core=debug,burst_detect=debug");
        assert_eq!(
            default_directive(&LogConfig::default()),
            "burst_core=warn,burst_detect=warn"
        );
    }

    #[test]
    fn explicit_level_wins_over_rust_log() {
        let quiet = LogConfig {
            env_directive: Some("burst_core=trace".to_string()),
            ..LogConfig::default()
        }
        .with_level(LogLevel::Off);
        let filter = build_filter(&quiet).to_string();
        assert!(filter.contains("burst_core=off"), "{filter}");
        assert!(filter.contains("burst_detect=off"), "{filter}");
        assert!(!filter.contains("trace"), "{filter}");

        let from_env = LogConfig {
            env_directive: Some("burst_core=trace".to_string()),
            ..LogConfig::default()
        };
        assert!(build_filter(&from_env).to_string().contains("burst_core=trace"));
    }

    #[test]
    fn init_twice_is_harmless() {
        let config = LogConfig::default().with_level(LogLevel::Off);
        init_logging(&config);
        init_logging(&config.with_format(LogFormat::Jsonl));
    }
}
