//! Numerically stable primitives for log-domain Bayesian math.

/// Largest argument for which `exp` is still a finite `f64` (ln(f64::MAX)).
pub const MAX_EXP_ARG: f64 = 709.782_712_893_384;

/// ln Σ exp(values), computed relative to the largest value.
///
/// Empty input and all -inf input give NEG_INFINITY; NaN propagates.
pub fn log_sum_exp(values: &[f64]) -> f64 {
    let mut peak = f64::NEG_INFINITY;
    for &v in values {
        if v.is_nan() {
            return f64::NAN;
        }
        peak = peak.max(v);
    }
    if peak.is_infinite() {
        return peak;
    }
    let scaled: f64 = values.iter().map(|&v| (v - peak).exp()).sum();
    peak + scaled.ln()
}

/// exp(x), or None when the result is not a finite `f64`.
///
/// This is an explicit range check: arguments above [`MAX_EXP_ARG`],
/// +inf and NaN all yield None instead of an infinite value.
pub fn checked_exp(x: f64) -> Option<f64> {
    if x.is_nan() || x > MAX_EXP_ARG {
        return None;
    }
    let y = x.exp();
    if y.is_finite() {
        Some(y)
    } else {
        None
    }
}

/// weight * ln(p), with a zero weight contributing exactly 0.
///
/// A zero weight never touches `ln(p)`, so `p == 0` cannot turn the term into
/// NaN. A positive weight on `p == 0` yields NEG_INFINITY.
pub fn weighted_ln(weight: f64, p: f64) -> f64 {
    if weight == 0.0 {
        return 0.0;
    }
    weight * p.ln()
}
