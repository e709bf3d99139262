//! Geometric rate ladders.
//!
//! Rate level `i` for scale base `s > 1` is `λ_i = s^(-i)`, so level 0 is the
//! fastest rate and each further level is `s` times slower. The ladder height
//! needed to cover a gap sequence is
//!
//! `k = floor(1 + log_s(T) + log_s(1/m))`
//!
//! where `T` is the total duration and `m` the smallest positive gap.

use super::exponential::{exp_mle_rate, log_base};

/// Check that a scale base can define a strictly decreasing ladder.
pub fn is_valid_scale(scale: f64) -> bool {
    scale.is_finite() && scale > 1.0
}

/// Rate at ladder level `level`: `1 / scale^level`.
pub fn geometric_rate(scale: f64, level: usize) -> f64 {
    1.0 / scale.powf(level as f64)
}

/// The first `levels` rates of the ladder, fastest first.
pub fn geometric_rates(scale: f64, levels: usize) -> Vec<f64> {
    (0..levels).map(|i| geometric_rate(scale, i)).collect()
}

/// Kernel weight `scale^(-distance)` for a jump of `distance` levels.
pub fn kernel_weight(scale: f64, distance: usize) -> f64 {
    scale.powf(-(distance as f64))
}

/// Number of ladder levels needed to span rates from `1/total` to `1/min_gap`.
///
/// Returns None when the inputs cannot define a ladder: invalid scale,
/// non-positive `min_gap`, a `1/min_gap` that overflows, or a total that is not
/// finite or is smaller than `min_gap`. The result is at least 1; when
/// `total == min_gap` the two logarithms cancel and rounding may land just
/// below an integer.
pub fn rate_level_count(total: f64, min_gap: f64, scale: f64) -> Option<usize> {
    if !is_valid_scale(scale) {
        return None;
    }
    let inverse = exp_mle_rate(min_gap)?;
    if !total.is_finite() || total < min_gap {
        return None;
    }
    let raw = 1.0 + log_base(total, scale) + log_base(inverse, scale);
    if !raw.is_finite() {
        return None;
    }
    Some((raw.floor() as usize).max(1))
}
