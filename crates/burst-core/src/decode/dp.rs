//! Shared forward pass and backtrace for the decoders.
//!
//! Scores live in two rolling columns; only the backpointers are kept for
//! every step.

use super::trace::{TraceColumn, TraceSink};
use burst_math::Objective;

/// Predecessor choices for steps `1..=steps`, stored row-major by step.
#[derive(Debug, Clone)]
pub(crate) struct Backpointers {
    states: usize,
    table: Vec<usize>,
}

impl Backpointers {
    fn with_capacity(states: usize, steps: usize) -> Self {
        Self {
            states,
            table: Vec::with_capacity(states * steps),
        }
    }

    /// Number of steps recorded (the start column has none).
    pub(crate) fn steps(&self) -> usize {
        if self.states == 0 {
            0
        } else {
            self.table.len() / self.states
        }
    }

    /// Predecessor of state `j` at step `t >= 1`.
    pub(crate) fn get(&self, t: usize, j: usize) -> usize {
        self.table[(t - 1) * self.states + j]
    }
}

/// Result of a forward pass.
#[derive(Debug)]
pub(crate) struct ForwardPass {
    pub final_scores: Vec<f64>,
    pub backpointers: Backpointers,
}

impl ForwardPass {
    /// Best final state and its score, first index on ties.
    pub(crate) fn best_final(&self, objective: Objective) -> (usize, f64) {
        objective
            .select(&self.final_scores)
            .unwrap_or((0, objective.worst()))
    }
}

/// Run `steps` recurrence steps over `initial.len()` states.
///
/// `score(t, i, j, prev)` is the candidate score for reaching state `j` at
/// step `t` from state `i`, whose accumulated score at step `t - 1` is
/// `prev`. Each cell keeps the first predecessor attaining the optimum.
pub(crate) fn forward<F>(
    initial: Vec<f64>,
    steps: usize,
    objective: Objective,
    sink: &mut dyn TraceSink,
    mut score: F,
) -> ForwardPass
where
    F: FnMut(usize, usize, usize, f64) -> f64,
{
    let k = initial.len();
    let mut prev = initial;
    let mut curr = vec![objective.worst(); k];
    let mut backpointers = Backpointers::with_capacity(k, steps);
    let mut column_bp = vec![0usize; k];

    sink.column(&TraceColumn {
        step: 0,
        scores: &prev,
        backpointers: None,
    });

    for t in 1..=steps {
        for j in 0..k {
            let mut best = objective.worst();
            let mut best_i = 0;
            for (i, &p) in prev.iter().enumerate() {
                let candidate = score(t, i, j, p);
                if objective.improves(candidate, best) {
                    best = candidate;
                    best_i = i;
                }
            }
            curr[j] = best;
            column_bp[j] = best_i;
        }
        backpointers.table.extend_from_slice(&column_bp);
        sink.column(&TraceColumn {
            step: t,
            scores: &curr,
            backpointers: Some(&column_bp),
        });
        std::mem::swap(&mut prev, &mut curr);
    }

    ForwardPass {
        final_scores: prev,
        backpointers,
    }
}

/// Walk backpointers from `last` at the final step back to the start.
///
/// Returns the states at steps `0..=steps` when `include_start` is set, or
/// `1..=steps` otherwise.
pub(crate) fn backtrace(
    backpointers: &Backpointers,
    last: usize,
    include_start: bool,
) -> Vec<usize> {
    let steps = backpointers.steps();
    let mut path = vec![0usize; steps + 1];
    path[steps] = last;
    for t in (1..=steps).rev() {
        path[t - 1] = backpointers.get(t, path[t]);
    }
    if !include_start {
        path.remove(0);
    }
    path
}
