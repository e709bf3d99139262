//! Burst detection core library.
//!
//! This library decodes a hidden rate state behind a sequence of inter-event
//! gaps and reports the bursty intervals:
//! - Gap sequence loading
//! - Rate state spaces and the two state-path decoders
//! - Segment reporting and burst classification
//! - Configuration, logging and exit codes for the CLI
//!
//! The binary entry point is in `main.rs`.

pub mod config;
pub mod decode;
pub mod detect;
pub mod error;
pub mod exit_codes;
pub mod gaps;
pub mod logging;
pub mod output;
pub mod report;

#[cfg(test)]
mod test_utils;

pub use decode::{Algorithm, BurstDecoder, DecodeParams, Decoding, StartPrior};
pub use detect::detect_bursts;
pub use error::{BurstError, Result};
pub use gaps::{parse_gaps, read_gaps, GapSequence};
pub use report::{BurstReport, Segment, StateSwitch};
