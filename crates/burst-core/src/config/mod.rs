//! Configuration loading and validation for burst-detect.
//!
//! This module handles:
//! - Loading detector.json (decoder defaults)
//! - Config resolution order (CLI > env > XDG > defaults)
//! - Semantic validation (scale, penalty, trellis ladder size)

pub mod validate;

pub use validate::ValidationError;
use validate::validate_detector_config;

use crate::decode::{max_value, Algorithm, DecodeParams, StartPrior};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Default XDG config directory name.
const CONFIG_DIR_NAME: &str = "burst_detect";

/// Config file name inside the config directory.
const CONFIG_FILE_NAME: &str = "detector.json";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "BURST_DETECT_CONFIG";

/// Errors that can occur during config loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Invalid JSON in config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Semantic validation failed: {0}")]
    ValidationError(#[from] ValidationError),

    #[error("I/O error reading {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Decoder defaults read from detector.json.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DetectorConfig {
    /// Geometric scale base of the rate ladder.
    pub scale: f64,
    /// Transition penalty.
    pub penalty: f64,
    /// Ladder size for the trellis decoder.
    pub trellis_states: usize,
    /// Start prior override; each decoder has its own default.
    pub start_prior: Option<StartPrior>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            scale: 2.0,
            penalty: 1.0,
            trellis_states: max_value::DEFAULT_STATES,
            start_prior: None,
        }
    }
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConfigOverrides {
    pub scale: Option<f64>,
    pub penalty: Option<f64>,
    pub trellis_states: Option<usize>,
    pub start_prior: Option<StartPrior>,
}

impl DetectorConfig {
    /// Apply overrides. The result is not re-validated; the decoder checks
    /// its parameters.
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(scale) = overrides.scale {
            self.scale = scale;
        }
        if let Some(penalty) = overrides.penalty {
            self.penalty = penalty;
        }
        if let Some(states) = overrides.trellis_states {
            self.trellis_states = states;
        }
        if overrides.start_prior.is_some() {
            self.start_prior = overrides.start_prior;
        }
        self
    }

    /// Decoder parameters for `algorithm`.
    pub fn decode_params(&self, algorithm: Algorithm) -> DecodeParams {
        DecodeParams {
            algorithm,
            scale: self.scale,
            penalty: self.penalty,
            trellis_states: self.trellis_states,
            start: self.start_prior,
        }
    }
}

/// Resolved configuration with provenance information.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub detector: DetectorConfig,
    /// Path of the loaded file (None if using defaults).
    pub path: Option<PathBuf>,
}

/// Configuration resolution options.
#[derive(Debug, Default)]
pub struct ConfigOptions {
    /// Explicit config file (highest priority; must exist).
    pub config_path: Option<PathBuf>,
    /// Explicit config directory, used instead of the XDG location.
    pub config_dir: Option<PathBuf>,
}

/// Load configuration with the standard resolution order.
///
/// Resolution order (highest to lowest priority):
/// 1. Explicit config file (via ConfigOptions)
/// 2. Environment variable (BURST_DETECT_CONFIG)
/// 3. detector.json in the config directory, if present
/// 4. Built-in defaults
pub fn load_config(options: &ConfigOptions) -> Result<ResolvedConfig, ConfigError> {
    let explicit = options
        .config_path
        .clone()
        .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from));

    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::NotFound { path });
            }
            Some(path)
        }
        None => {
            let candidate = resolve_config_dir(options).join(CONFIG_FILE_NAME);
            candidate.exists().then_some(candidate)
        }
    };

    let detector = match &path {
        Some(path) => load_detector_from_file(path)?,
        None => DetectorConfig::default(),
    };
    validate_detector_config(&detector)?;

    debug!(path = ?path, ?detector, "resolved detector config");
    Ok(ResolvedConfig { detector, path })
}

/// Resolve the config directory.
fn resolve_config_dir(options: &ConfigOptions) -> PathBuf {
    if let Some(dir) = &options.config_dir {
        return dir.clone();
    }

    let xdg_config = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config")
        });

    xdg_config.join(CONFIG_DIR_NAME)
}

/// Load the detector config from a specific file.
fn load_detector_from_file(path: &Path) -> Result<DetectorConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_detector_config(&content).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Parse detector.json content. Missing fields take their defaults.
pub fn parse_detector_config(content: &str) -> Result<DetectorConfig, serde_json::Error> {
    serde_json::from_str(content)
}
