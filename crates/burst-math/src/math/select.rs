//! Tie-stable extremum selection for dynamic-programming recurrences.
//!
//! Both directions use a strict comparator under ascending scan, so the first
//! index attaining the optimum wins. NaN candidates never improve on anything.

use serde::{Deserialize, Serialize};

/// Direction of optimization for a score table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    /// Lower scores are better (costs).
    Minimize,
    /// Higher scores are better (values).
    Maximize,
}

impl Objective {
    /// The score no real candidate can lose to.
    pub fn worst(self) -> f64 {
        match self {
            Objective::Minimize => f64::INFINITY,
            Objective::Maximize => f64::NEG_INFINITY,
        }
    }

    /// Whether `candidate` strictly improves on `incumbent`.
    #[inline]
    pub fn improves(self, candidate: f64, incumbent: f64) -> bool {
        match self {
            Objective::Minimize => candidate < incumbent,
            Objective::Maximize => candidate > incumbent,
        }
    }

    /// Index and score of the first optimum in `values`.
    ///
    /// Returns None for an empty slice. When no entry improves on
    /// [`Objective::worst`] (all unreachable or NaN) the first index is
    /// returned with the worst score.
    pub fn select(self, values: &[f64]) -> Option<(usize, f64)> {
        if values.is_empty() {
            return None;
        }
        let mut best_idx = 0;
        let mut best = self.worst();
        for (i, &v) in values.iter().enumerate() {
            if self.improves(v, best) {
                best = v;
                best_idx = i;
            }
        }
        Some((best_idx, best))
    }
}

impl std::fmt::Display for Objective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Objective::Minimize => write!(f, "minimize"),
            Objective::Maximize => write!(f, "maximize"),
        }
    }
}
