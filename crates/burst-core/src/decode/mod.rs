//! State-path decoders.
//!
//! Two dynamic-programming decoders share one forward/backtrace engine:
//!
//! - [`MinCostDecoder`] (`viterbi`): minimum total cost over a geometric rate
//!   ladder sized from the data, with exponential emission costs and a
//!   penalty proportional to the number of levels jumped.
//! - [`MaxValueDecoder`] (`trellis`): maximum accumulated value over a small
//!   fixed ladder, rewarding fast states and charging each step its weight.
//!
//! Both implement [`BurstDecoder`]; [`decoder_for`] picks one from
//! [`DecodeParams`].

mod dp;
pub mod max_value;
pub mod min_cost;
pub mod state_space;
pub mod trace;

pub use max_value::MaxValueDecoder;
pub use min_cost::MinCostDecoder;
pub use state_space::{StateSpace, MAX_STATES};
pub use trace::{format_column, NoTrace, TableWriter, TraceColumn, TraceSink};

use crate::error::{BurstError, Result};
use crate::gaps::GapSequence;
use burst_math::Objective;
use serde::{Deserialize, Serialize};

/// Decoding algorithm selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Minimum-cost decode over a data-sized rate ladder.
    #[value(alias = "min-cost")]
    Viterbi,
    /// Maximum-value decode over a fixed ladder.
    #[value(alias = "max-value")]
    Trellis,
}

impl Algorithm {
    /// Score direction used by the algorithm.
    pub fn objective(self) -> Objective {
        match self {
            Algorithm::Viterbi => Objective::Minimize,
            Algorithm::Trellis => Objective::Maximize,
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Algorithm::Viterbi => write!(f, "viterbi"),
            Algorithm::Trellis => write!(f, "trellis"),
        }
    }
}

/// Prior over the state at time 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartPrior {
    /// All mass on one state; every other start cell is unreachable.
    PointMass(usize),
    /// Every state may start the path at no cost.
    Uniform,
}

impl StartPrior {
    /// Check the prior against a state space of `states` levels.
    pub fn validate(self, states: usize) -> Result<()> {
        match self {
            StartPrior::PointMass(s) if s >= states => Err(BurstError::parameter(
                "start_prior",
                format!("start state {} is outside the {} available states", s, states),
            )),
            _ => Ok(()),
        }
    }

    /// Initial score column for `states` levels.
    ///
    /// The designated start cell (or every cell, for a uniform prior) gets 0;
    /// the rest get the objective's worst score.
    pub(crate) fn initial_scores(self, states: usize, objective: Objective) -> Vec<f64> {
        match self {
            StartPrior::Uniform => vec![0.0; states],
            StartPrior::PointMass(start) => (0..states)
                .map(|i| if i == start { 0.0 } else { objective.worst() })
                .collect(),
        }
    }
}

impl std::fmt::Display for StartPrior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StartPrior::PointMass(s) => write!(f, "point({})", s),
            StartPrior::Uniform => write!(f, "uniform"),
        }
    }
}

/// Outcome of one decode.
#[derive(Debug, Clone, Serialize)]
pub struct Decoding {
    pub algorithm: Algorithm,
    pub objective: Objective,
    /// Rate ladder the path was decoded over.
    pub state_space: StateSpace,
    /// Start prior actually used.
    pub start: StartPrior,
    /// One state index per gap.
    pub states: Vec<usize>,
    /// Optimal total cost (viterbi) or value (trellis).
    pub score: f64,
}

/// A decoder turning a gap sequence into a state path.
pub trait BurstDecoder {
    fn algorithm(&self) -> Algorithm;

    /// Decode the optimal state path, reporting score columns to `sink`.
    fn decode(&self, gaps: &GapSequence, sink: &mut dyn TraceSink) -> Result<Decoding>;
}

/// Parameters for building a decoder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecodeParams {
    pub algorithm: Algorithm,
    pub scale: f64,
    pub penalty: f64,
    /// Ladder size for the trellis decoder.
    pub trellis_states: usize,
    /// Overrides the algorithm's default start prior.
    pub start: Option<StartPrior>,
}

impl DecodeParams {
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            scale: 2.0,
            penalty: 1.0,
            trellis_states: max_value::DEFAULT_STATES,
            start: None,
        }
    }
}

/// Build the decoder selected by `params.algorithm`.
pub fn decoder_for(params: &DecodeParams) -> Result<Box<dyn BurstDecoder>> {
    match params.algorithm {
        Algorithm::Viterbi => {
            let mut decoder = MinCostDecoder::new(params.scale, params.penalty)?;
            if let Some(start) = params.start {
                decoder = decoder.with_start(start);
            }
            Ok(Box::new(decoder))
        }
        Algorithm::Trellis => {
            let mut decoder =
                MaxValueDecoder::new(params.scale, params.penalty, params.trellis_states)?;
            if let Some(start) = params.start {
                decoder = decoder.with_start(start)?;
            }
            Ok(Box::new(decoder))
        }
    }
}

/// Penalty must be a finite, non-negative number.
pub(crate) fn check_penalty(penalty: f64) -> Result<()> {
    if penalty.is_finite() && penalty >= 0.0 {
        Ok(())
    } else {
        Err(BurstError::parameter(
            "penalty",
            format!("must be finite and >= 0, got {}", penalty),
        ))
    }
}
