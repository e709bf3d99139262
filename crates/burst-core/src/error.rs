//! Error types for gap loading and decoding.

use crate::exit_codes::ExitCode;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for burst detection operations.
pub type Result<T> = std::result::Result<T, BurstError>;

/// Errors that can occur while loading gaps or decoding a state path.
#[derive(Error, Debug)]
pub enum BurstError {
    /// The gap sequence cannot define a decode.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A decoder parameter is out of range.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter { name: &'static str, message: String },

    /// A token in the gap source is not a number.
    #[error("parse error: token {index} ({token:?}) is not a number: {source}")]
    Parse {
        index: usize,
        token: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    /// The gap source could not be read.
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BurstError {
    /// Shorthand for an [`BurstError::InvalidInput`] with a formatted message.
    pub fn invalid(msg: impl Into<String>) -> Self {
        BurstError::InvalidInput(msg.into())
    }

    /// Shorthand for an [`BurstError::InvalidParameter`].
    pub fn parameter(name: &'static str, message: impl Into<String>) -> Self {
        BurstError::InvalidParameter {
            name,
            message: message.into(),
        }
    }

    /// Exit code reported by the CLI for this error.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            BurstError::InvalidInput(_) => ExitCode::InvalidInput,
            BurstError::InvalidParameter { .. } => ExitCode::ArgsError,
            BurstError::Parse { .. } => ExitCode::ParseError,
            BurstError::Io { .. } => ExitCode::IoError,
        }
    }
}
