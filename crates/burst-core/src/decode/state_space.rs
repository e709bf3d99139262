//! Geometric rate state spaces.

use crate::error::{BurstError, Result};
use crate::gaps::GapSequence;
use burst_math::{geometric_rates, is_valid_scale, rate_level_count};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Largest ladder either decoder will build. Decoding costs `O(n·k²)`, so
/// ladders past this size are rejected before anything is allocated.
pub const MAX_STATES: usize = 256;

/// Ordered rate levels `l_i = s^(-i)`, fastest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSpace {
    scale: f64,
    rates: Vec<f64>,
}

impl StateSpace {
    /// A ladder with an explicit number of levels.
    pub fn geometric(scale: f64, levels: usize) -> Result<Self> {
        if !is_valid_scale(scale) {
            return Err(BurstError::parameter(
                "scale",
                format!("must be finite and > 1, got {}", scale),
            ));
        }
        if levels == 0 {
            return Err(BurstError::parameter("states", "state space needs at least one state"));
        }
        if levels > MAX_STATES {
            return Err(BurstError::parameter(
                "states",
                format!("{} states exceeds the limit of {}", levels, MAX_STATES),
            ));
        }
        Ok(Self {
            scale,
            rates: geometric_rates(scale, levels),
        })
    }

    /// Derive the ladder that spans the rates observed in `gaps`.
    ///
    /// The level count is `floor(1 + log_s(T) + log_s(1/m))` for total
    /// duration `T` and smallest positive gap `m`.
    pub fn from_gaps(gaps: &GapSequence, scale: f64) -> Result<Self> {
        if !is_valid_scale(scale) {
            return Err(BurstError::parameter(
                "scale",
                format!("must be finite and > 1, got {}", scale),
            ));
        }
        let min_gap = gaps
            .min_positive()
            .ok_or_else(|| BurstError::invalid("no strictly positive gap in sequence"))?;
        let total = gaps.total();
        let levels = rate_level_count(total, min_gap, scale).ok_or_else(|| {
            BurstError::invalid(format!(
                "smallest positive gap {} is degenerate (total {}, scale {})",
                min_gap, total, scale
            ))
        })?;

        if levels > MAX_STATES {
            return Err(BurstError::parameter(
                "scale",
                format!(
                    "scale {} needs {} rate levels for this input, limit is {}",
                    scale, levels, MAX_STATES
                ),
            ));
        }

        debug!(levels, total, min_gap, scale, "built rate state space");
        Self::geometric(scale, levels)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn rates(&self) -> &[f64] {
        &self.rates
    }
}
