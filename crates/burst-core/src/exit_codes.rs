//! Exit codes for the burst-detect CLI.
//!
//! Exit codes communicate the outcome without requiring output parsing.
//!
//! Exit code ranges:
//! - 0: Success
//! - 10-19: User/input errors (recoverable by fixing arguments or input)
//! - 20-29: Internal errors
//!
//! Usage errors detected by the argument parser itself exit with status 2.

/// Exit codes for burst-detect.
///
/// These codes are a stable contract for automation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success: decode completed and results were written
    Clean = 0,

    // ========================================================================
    // User / Input Errors (10-19)
    // ========================================================================
    /// Invalid decoder parameters (scale, penalty, state count, start prior)
    ArgsError = 10,

    /// Gap sequence cannot be decoded (no positive gap, degenerate minimum, ...)
    InvalidInput = 11,

    /// Gap source contains a non-numeric token
    ParseError = 12,

    /// Configuration file missing, malformed, or semantically invalid
    ConfigError = 13,

    // ========================================================================
    // Internal Errors (20-29)
    // ========================================================================
    /// Internal error (bug - please report)
    InternalError = 20,

    /// I/O error
    IoError = 21,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the error code name as a string constant (for JSON output).
    pub fn code_name(&self) -> &'static str {
        match self {
            ExitCode::Clean => "OK_CLEAN",
            ExitCode::ArgsError => "ERR_ARGS",
            ExitCode::InvalidInput => "ERR_INVALID_INPUT",
            ExitCode::ParseError => "ERR_PARSE",
            ExitCode::ConfigError => "ERR_CONFIG",
            ExitCode::InternalError => "ERR_INTERNAL",
            ExitCode::IoError => "ERR_IO",
        }
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code_name(), self.as_i32())
    }
}
