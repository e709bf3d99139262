//! Shared fixtures for unit tests.

use crate::gaps::GapSequence;

/// Steady traffic with a single long pause at index 4.
pub const OUTLIER_GAPS: &[f64] = &[1.0, 1.0, 1.0, 1.0, 10.0, 1.0, 1.0, 1.0, 1.0];

/// Slow traffic around a five-message burst at indices 4..9.
pub const QUIET_BURST_GAPS: &[f64] = &[
    10.0, 10.0, 10.0, 10.0, 0.5, 0.5, 0.5, 0.5, 0.5, 10.0, 10.0, 10.0, 10.0,
];

/// Three very short gaps inside otherwise moderate traffic.
pub const SHORT_BURST_GAPS: &[f64] = &[2.0, 2.0, 0.1, 0.1, 0.1, 2.0, 2.0];

/// Build a gap sequence from literal values.
pub fn gaps(values: &[f64]) -> GapSequence {
    GapSequence::new(values.to_vec()).expect("valid test gaps")
}

/// Assert two floats agree within a tolerance (default `1e-9`).
macro_rules! assert_approx {
    ($actual:expr, $expected:expr) => {
        $crate::test_utils::assert_approx!($actual, $expected, 1e-9)
    };
    ($actual:expr, $expected:expr, $tol:expr) => {{
        let (actual, expected): (f64, f64) = ($actual, $expected);
        assert!(
            (actual - expected).abs() <= $tol,
            "expected {} to be within {} of {}",
            actual,
            $tol,
            expected
        );
    }};
}

pub(crate) use assert_approx;
