//! Logging configuration.
//!
//! Supports configuration via:
//! - Environment variables (BURST_LOG, RUST_LOG, BURST_LOG_FORMAT,
//!   BURST_LOG_TIMESTAMPS)
//! - CLI flags (-v, -q, --log-format)

use serde::{Deserialize, Serialize};

/// Log output format.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable console format (default).
    #[default]
    Human,
    /// Machine-parseable JSON lines.
    Jsonl,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" | "console" | "pretty" => Ok(LogFormat::Human),
            "jsonl" | "json" => Ok(LogFormat::Jsonl),
            _ => Err(format!("unknown log format: {}", s)),
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Human => write!(f, "human"),
            LogFormat::Jsonl => write!(f, "jsonl"),
        }
    }
}

/// Log level filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Most verbose.
    Trace,
    /// Debug information (per-decode parameters, ladder sizes).
    Debug,
    /// Run summaries.
    Info,
    /// Warnings only (default).
    #[default]
    Warn,
    /// Errors only.
    Error,
    /// Completely silent.
    Off,
}

impl LogLevel {
    /// Level selected by repeated `-v` flags or `-q`; None when neither is
    /// given.
    pub fn from_verbosity(verbose: u8, quiet: bool) -> Option<Self> {
        if quiet {
            return Some(LogLevel::Off);
        }
        match verbose {
            0 => None,
            1 => Some(LogLevel::Info),
            2 => Some(LogLevel::Debug),
            _ => Some(LogLevel::Trace),
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "off" | "none" | "quiet" => Ok(LogLevel::Off),
            _ => Err(format!("unknown log level: {}", s)),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
            LogLevel::Off => write!(f, "off"),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Output format.
    pub format: LogFormat,
    /// Minimum log level.
    pub level: LogLevel,
    /// Whether to include timestamps in human output.
    pub timestamps: bool,
    /// Raw `RUST_LOG` directive, kept only when it decides the level.
    pub env_directive: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            format: LogFormat::Human,
            level: LogLevel::Warn,
            timestamps: true,
            env_directive: None,
        }
    }
}

impl LogConfig {
    /// Create config from environment and CLI overrides.
    pub fn from_env(cli_level: Option<LogLevel>, cli_format: Option<LogFormat>) -> Self {
        Self::from_vars(
            |name| std::env::var(name).ok(),
            cli_level,
            cli_format,
        )
    }

    /// Resolve against an arbitrary variable lookup.
    fn from_vars(
        var: impl Fn(&str) -> Option<String>,
        cli_level: Option<LogLevel>,
        cli_format: Option<LogFormat>,
    ) -> Self {
        let mut config = LogConfig::default();

        // BURST_LOG takes precedence over RUST_LOG
        if let Some(val) = var("BURST_LOG") {
            if let Ok(level) = val.parse::<LogLevel>() {
                config.level = level;
            }
        } else if let Some(val) = var("RUST_LOG") {
            // Coarse match; the full directive still reaches EnvFilter
            config.env_directive = Some(val.clone());
            if val.contains("trace") {
                config.level = LogLevel::Trace;
            } else if val.contains("debug") {
                config.level = LogLevel::Debug;
            } else if val.contains("info") {
                config.level = LogLevel::Info;
            } else if val.contains("error") {
                config.level = LogLevel::Error;
            }
        }

        if let Some(val) = var("BURST_LOG_FORMAT") {
            if let Ok(format) = val.parse::<LogFormat>() {
                config.format = format;
            }
        }

        if let Some(val) = var("BURST_LOG_TIMESTAMPS") {
            config.timestamps = !matches!(val.to_lowercase().as_str(), "0" | "false" | "off");
        }

        // CLI overrides take final precedence
        if let Some(level) = cli_level {
            config = config.with_level(level);
        }
        if let Some(format) = cli_format {
            config = config.with_format(format);
        }

        config
    }

    /// Set log format.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set log level. An explicit level replaces any `RUST_LOG` directive.
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self.env_directive = None;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!("human".parse::<LogFormat>().unwrap(), LogFormat::Human);
        assert_eq!("jsonl".parse::<LogFormat>().unwrap(), LogFormat::Jsonl);
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Jsonl);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_log_level_parse() {
        assert_eq!("trace".parse::<LogLevel>().unwrap(), LogLevel::Trace);
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!("quiet".parse::<LogLevel>().unwrap(), LogLevel::Off);
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_verbosity_flags() {
        assert_eq!(LogLevel::from_verbosity(0, false), None);
        assert_eq!(LogLevel::from_verbosity(1, false), Some(LogLevel::Info));
        assert_eq!(LogLevel::from_verbosity(2, false), Some(LogLevel::Debug));
        assert_eq!(LogLevel::from_verbosity(5, false), Some(LogLevel::Trace));
        assert_eq!(LogLevel::from_verbosity(3, true), Some(LogLevel::Off));
    }

    #[test]
    fn test_env_resolution() {
        let config = LogConfig::from_vars(vars(&[]), None, None);
        assert_eq!(config.level, LogLevel::Warn);
        assert_eq!(config.format, LogFormat::Human);

        let config = LogConfig::from_vars(
            vars(&[("BURST_LOG", "debug"), ("RUST_LOG", "error"), ("BURST_LOG_FORMAT", "jsonl")]),
            None,
            None,
        );
        assert_eq!(config.level, LogLevel::Debug);
        assert_eq!(config.format, LogFormat::Jsonl);

        let config = LogConfig::from_vars(vars(&[("RUST_LOG", "burst_core=info")]), None, None);
        assert_eq!(config.level, LogLevel::Info);
        assert_eq!(config.env_directive.as_deref(), Some("burst_core=info"));

        let config = LogConfig::from_vars(
            vars(&[("BURST_LOG", "info"), ("RUST_LOG", "burst_core=trace")]),
            None,
            None,
        );
        assert_eq!(config.env_directive, None);
    }

    #[test]
    fn test_cli_level_replaces_rust_log() {
        let config = LogConfig::from_vars(
            vars(&[("RUST_LOG", "burst_core=debug")]),
            LogLevel::from_verbosity(0, true),
            None,
        );
        assert_eq!(config.level, LogLevel::Off);
        assert_eq!(config.env_directive, None);

        let config = LogConfig::from_vars(vars(&[("RUST_LOG", "debug")]), None, None);
        assert_eq!(config.env_directive.as_deref(), Some("debug"));
    }

    #[test]
    fn test_timestamps_env() {
        assert!(LogConfig::from_vars(vars(&[]), None, None).timestamps);
        let config = LogConfig::from_vars(vars(&[("BURST_LOG_TIMESTAMPS", "0")]), None, None);
        assert!(!config.timestamps);
        let config = LogConfig::from_vars(vars(&[("BURST_LOG_TIMESTAMPS", "1")]), None, None);
        assert!(config.timestamps);
    }

    #[test]
    fn test_cli_overrides_env() {
        let config = LogConfig::from_vars(
            vars(&[("BURST_LOG", "trace"), ("BURST_LOG_FORMAT", "jsonl")]),
            Some(LogLevel::Error),
            Some(LogFormat::Human),
        );
        assert_eq!(config.level, LogLevel::Error);
        assert_eq!(config.format, LogFormat::Human);
    }

    #[test]
    fn test_log_config_builder() {
        let config = LogConfig::default()
            .with_format(LogFormat::Jsonl)
            .with_level(LogLevel::Debug);

        assert_eq!(config.format, LogFormat::Jsonl);
        assert_eq!(config.level, LogLevel::Debug);
        assert!(config.timestamps);
    }
}
