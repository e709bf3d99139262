//! Maximum-value decoding over a small fixed ladder.
//!
//! Moving from state `i` to `j` at step `t` earns `λ_i·s^(-|j-i|)` and costs
//! `g·w_{t-1}`, where `w` are the step weights (the gaps themselves when
//! decoding a [`GapSequence`]). The path maximizing the accumulated value is
//! recovered for steps `0..n`.

use super::dp::{backtrace, forward};
use super::{check_penalty, Algorithm, BurstDecoder, Decoding, StartPrior, StateSpace, TraceSink};
use crate::error::{BurstError, Result};
use crate::gaps::GapSequence;
use burst_math::{kernel_weight, Objective};
use tracing::debug;

/// Ladder size used when the caller does not choose one.
pub const DEFAULT_STATES: usize = 2;

/// Bellman-Ford-style decoder maximizing accumulated value.
#[derive(Debug, Clone, PartialEq)]
pub struct MaxValueDecoder {
    space: StateSpace,
    penalty: f64,
    start: StartPrior,
}

impl MaxValueDecoder {
    /// Decoder over `states` geometric levels with a uniform start prior.
    pub fn new(scale: f64, penalty: f64, states: usize) -> Result<Self> {
        check_penalty(penalty)?;
        Ok(Self {
            space: StateSpace::geometric(scale, states)?,
            penalty,
            start: StartPrior::Uniform,
        })
    }

    /// Replace the start prior.
    pub fn with_start(mut self, start: StartPrior) -> Result<Self> {
        start.validate(self.space.len())?;
        self.start = start;
        Ok(self)
    }

    /// Decode an arbitrary weight sequence.
    pub fn decode_weighted(&self, weights: &[f64], sink: &mut dyn TraceSink) -> Result<Decoding> {
        if weights.is_empty() {
            return Err(BurstError::invalid("weight sequence is empty"));
        }
        if let Some(idx) = weights.iter().position(|w| !w.is_finite()) {
            return Err(BurstError::invalid(format!("weight {} is not finite", idx)));
        }

        let k = self.space.len();
        let scale = self.space.scale();
        let rates = self.space.rates();
        let kernel: Vec<f64> = (0..k).map(|d| kernel_weight(scale, d)).collect();
        let penalty = self.penalty;

        debug!(
            steps = weights.len(),
            states = k,
            penalty,
            start = %self.start,
            "max-value forward pass"
        );

        let objective = Objective::Maximize;
        let initial = self.start.initial_scores(k, objective);
        let pass = forward(initial, weights.len() - 1, objective, sink, |t, i, j, prev| {
            prev + rates[i] * kernel[i.abs_diff(j)] - penalty * weights[t - 1]
        });

        let (last, score) = pass.best_final(objective);
        let states = backtrace(&pass.backpointers, last, true);
        debug!(final_state = last, value = score, "max-value decode complete");

        Ok(Decoding {
            algorithm: Algorithm::Trellis,
            objective,
            state_space: self.space.clone(),
            start: self.start,
            states,
            score,
        })
    }
}

impl BurstDecoder for MaxValueDecoder {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Trellis
    }

    fn decode(&self, gaps: &GapSequence, sink: &mut dyn TraceSink) -> Result<Decoding> {
        self.decode_weighted(gaps.as_slice(), sink)
    }
}
