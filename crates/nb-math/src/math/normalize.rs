//! Normalization of non-negative weight vectors into distributions.

/// Tolerance used when checking that a stored distribution sums to 1.
pub const DISTRIBUTION_TOL: f64 = 1e-9;

/// Divide every entry by the total so the vector sums to 1.
///
/// When the entries are finite but their sum overflows, they are first
/// divided by the largest entry. Returns the total that was divided by, or
/// None (leaving `values` untouched) when an entry is not finite or the total
/// is not positive.
pub fn normalize_in_place(values: &mut [f64]) -> Option<f64> {
    if values.iter().any(|v| !v.is_finite()) {
        return None;
    }
    let mut total: f64 = values.iter().sum();
    if total == f64::INFINITY {
        let max = values.iter().copied().fold(0.0, f64::max);
        for v in values.iter_mut() {
            *v /= max;
        }
        total = values.iter().sum();
    }
    if total.is_nan() || total <= 0.0 {
        return None;
    }
    for v in values.iter_mut() {
        *v /= total;
    }
    Some(total)
}

/// Whether `values` is a probability vector: entries in [0, 1] summing to 1.
pub fn is_distribution(values: &[f64], tol: f64) -> bool {
    if values.is_empty() {
        return false;
    }
    if values.iter().any(|v| !v.is_finite() || *v < 0.0 || *v > 1.0 + tol) {
        return false;
    }
    let total: f64 = values.iter().sum();
    (total - 1.0).abs() <= tol
}
