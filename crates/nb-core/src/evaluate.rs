//! Evaluation of predictions against known labels.

use crate::inference::Posterior;
use nb_common::{Error, Label, Result};

/// Probability clip used by [`log_loss`] callers that have no preference.
pub const DEFAULT_LOG_LOSS_EPS: f64 = 1e-15;

/// Fraction of predictions equal to the true label.
pub fn accuracy<L: Label>(predicted: &[L], actual: &[L]) -> Result<f64> {
    check_lengths(predicted.len(), actual.len())?;
    let correct = predicted
        .iter()
        .zip(actual)
        .filter(|(p, t)| p == t)
        .count();
    Ok(correct as f64 / actual.len() as f64)
}

/// Mean negative log probability assigned to the true label.
///
/// Probabilities are clipped to `[eps, 1 - eps]` so that a confidently wrong
/// (or saturated) posterior costs a large finite amount. A label absent from
/// a posterior counts as probability 0.
pub fn log_loss<L: Label>(posteriors: &[Posterior<L>], actual: &[L], eps: f64) -> Result<f64> {
    check_lengths(posteriors.len(), actual.len())?;
    if !(eps > 0.0 && eps < 0.5) {
        return Err(Error::InvalidInput(format!(
            "log-loss clip must be in (0, 0.5), got {}",
            eps
        )));
    }

    let total: f64 = posteriors
        .iter()
        .zip(actual)
        .map(|(posterior, label)| {
            let p = posterior.get(label).unwrap_or(0.0).clamp(eps, 1.0 - eps);
            -p.ln()
        })
        .sum();
    Ok(total / actual.len() as f64)
}

fn check_lengths(predicted: usize, actual: usize) -> Result<()> {
    if actual == 0 {
        return Err(Error::InvalidInput("nothing to evaluate".to_string()));
    }
    if predicted != actual {
        return Err(Error::DimensionMismatch {
            what: "predictions vs true labels",
            expected: actual,
            actual: predicted,
        });
    }
    Ok(())
}
