//! Minimum-cost decoding over a data-sized rate ladder.
//!
//! The cost of assigning gap `x` to state `j` is the exponential negative
//! log-likelihood `-ln(λ_j) + λ_j·x`. Moving from state `i` to `j` costs
//! `g·|j - i|·ln(n)` for penalty `g` and sequence length `n`.

use super::dp::{backtrace, forward};
use super::{check_penalty, Algorithm, BurstDecoder, Decoding, StartPrior, StateSpace, TraceSink};
use crate::error::Result;
use crate::gaps::GapSequence;
use burst_math::{exp_nll_with_ln_rate, Objective};
use tracing::debug;

/// Viterbi-style decoder minimizing emission plus transition cost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinCostDecoder {
    scale: f64,
    penalty: f64,
    start: StartPrior,
}

impl MinCostDecoder {
    /// Decoder with the default start prior (point mass on the fastest state).
    pub fn new(scale: f64, penalty: f64) -> Result<Self> {
        check_penalty(penalty)?;
        Ok(Self {
            scale,
            penalty,
            start: StartPrior::PointMass(0),
        })
    }

    /// Replace the start prior. A point mass outside the derived ladder is
    /// rejected at decode time.
    pub fn with_start(mut self, start: StartPrior) -> Self {
        self.start = start;
        self
    }
}

impl BurstDecoder for MinCostDecoder {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Viterbi
    }

    fn decode(&self, gaps: &GapSequence, sink: &mut dyn TraceSink) -> Result<Decoding> {
        let space = StateSpace::from_gaps(gaps, self.scale)?;
        self.start.validate(space.len())?;

        let n = gaps.len();
        let rates = space.rates();
        let ln_rates: Vec<f64> = rates.iter().map(|l| l.ln()).collect();
        let jump_unit = (n as f64).ln();
        let xs = gaps.as_slice();
        let penalty = self.penalty;

        debug!(
            gaps = n,
            states = space.len(),
            penalty,
            start = %self.start,
            "min-cost forward pass"
        );

        let objective = Objective::Minimize;
        let initial = self.start.initial_scores(space.len(), objective);
        let mut emit = vec![0.0; space.len()];
        let mut emit_step = 0;
        let pass = forward(initial, n, objective, sink, |t, i, j, prev| {
            if t != emit_step {
                let x = xs[t - 1];
                for (e, (&l, &ln_l)) in emit.iter_mut().zip(rates.iter().zip(&ln_rates)) {
                    *e = exp_nll_with_ln_rate(l, ln_l, x);
                }
                emit_step = t;
            }
            let jump = penalty * i.abs_diff(j) as f64 * jump_unit;
            emit[j] + prev + jump
        });

        let (last, score) = pass.best_final(objective);
        let states = backtrace(&pass.backpointers, last, false);
        debug!(final_state = last, cost = score, "min-cost decode complete");

        Ok(Decoding {
            algorithm: Algorithm::Viterbi,
            objective,
            state_space: space,
            start: self.start,
            states,
            score,
        })
    }
}
