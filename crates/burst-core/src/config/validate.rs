//! Semantic validation for detector configuration.

use super::DetectorConfig;
use crate::decode::MAX_STATES;
use thiserror::Error;

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Configuration validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl ValidationError {
    fn invalid(field: &str, message: impl Into<String>) -> Self {
        ValidationError::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Validate a detector configuration semantically.
///
/// A point-mass start prior is checked against the ladder by the decoder,
/// since the viterbi ladder size depends on the data.
pub fn validate_detector_config(config: &DetectorConfig) -> ValidationResult<()> {
    if !config.scale.is_finite() || config.scale <= 1.0 {
        return Err(ValidationError::invalid(
            "scale",
            format!("must be finite and > 1, got {}", config.scale),
        ));
    }

    if !config.penalty.is_finite() || config.penalty < 0.0 {
        return Err(ValidationError::invalid(
            "penalty",
            format!("must be finite and >= 0, got {}", config.penalty),
        ));
    }

    if config.trellis_states == 0 || config.trellis_states > MAX_STATES {
        return Err(ValidationError::invalid(
            "trellis_states",
            format!("must be in 1..={}, got {}", MAX_STATES, config.trellis_states),
        ));
    }

    Ok(())
}
