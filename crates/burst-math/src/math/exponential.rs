//! Exponential distribution utilities for inter-event gap models.
//!
//! Uses **rate parameterization**: `Exp(λ)` with density `f(x) = λ e^(-λx)`.
//! A gap `x` observed under rate `λ` has negative log-likelihood
//! `-ln λ + λx`, which is the emission cost of the min-cost decoder.

/// Negative log-likelihood of gap `x` under `Exp(rate)`, given a precomputed
/// `ln(rate)`.
///
/// No domain checks: callers pass a positive rate and a non-negative gap.
#[inline]
pub fn exp_nll_with_ln_rate(rate: f64, ln_rate: f64, x: f64) -> f64 {
    -ln_rate + rate * x
}

/// Maximum-likelihood rate for a single observed gap (`1/x`).
///
/// Returns None when the gap is not strictly positive or the reciprocal
/// overflows.
pub fn exp_mle_rate(x: f64) -> Option<f64> {
    if x.is_nan() || x <= 0.0 {
        return None;
    }
    let rate = 1.0 / x;
    rate.is_finite().then_some(rate)
}

/// Logarithm of `x` in base `base`, computed as `ln(x) / ln(base)`.
pub fn log_base(x: f64, base: f64) -> f64 {
    x.ln() / base.ln()
}
