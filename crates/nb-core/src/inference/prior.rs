//! Class prior estimation.

use crate::label_index::LabelIndex;
use nb_common::{Error, Label, Result};
use nb_math::DISTRIBUTION_TOL;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Label → unconditional class probability. Values lie in (0, 1] and sum
/// to 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prior<L: Label> {
    probabilities: BTreeMap<L, f64>,
}

impl<L: Label> Prior<L> {
    /// Build from explicit probabilities.
    ///
    /// Each value must be finite and in (0, 1], and the values must sum to 1.
    /// They are taken as given and not renormalized.
    pub fn from_probabilities(probabilities: BTreeMap<L, f64>) -> Result<Self> {
        if probabilities.is_empty() {
            return Err(Error::InvalidInput("prior has no labels".to_string()));
        }
        for (label, &p) in &probabilities {
            if !p.is_finite() || p <= 0.0 || p > 1.0 {
                return Err(Error::InvalidInput(format!(
                    "prior for label {:?} must be in (0, 1], got {}",
                    label, p
                )));
            }
        }
        let total: f64 = probabilities.values().sum();
        if (total - 1.0).abs() > DISTRIBUTION_TOL {
            return Err(Error::InvalidInput(format!(
                "prior probabilities must sum to 1, got {}",
                total
            )));
        }
        Ok(Prior { probabilities })
    }

    /// Probability of one label, if the prior covers it.
    pub fn get(&self, label: &L) -> Option<f64> {
        self.probabilities.get(label).copied()
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    /// Labels in ascending order.
    pub fn labels(&self) -> impl Iterator<Item = &L> {
        self.probabilities.keys()
    }

    /// (label, probability) pairs in ascending label order.
    pub fn iter(&self) -> impl Iterator<Item = (&L, f64)> {
        self.probabilities.iter().map(|(label, &p)| (label, p))
    }

    /// Consume into the label → probability map.
    pub fn into_inner(self) -> BTreeMap<L, f64> {
        self.probabilities
    }
}

/// Class priors from sample counts: prior[label] = |label's samples| / total.
pub fn estimate_prior<L: Label>(label_index: &LabelIndex<L>) -> Result<Prior<L>> {
    if label_index.is_empty() {
        return Err(Error::EmptyLabelIndex);
    }

    let total = label_index.num_samples() as f64;
    let probabilities: BTreeMap<L, f64> = label_index
        .iter()
        .map(|(label, indices)| (label.clone(), indices.len() as f64 / total))
        .collect();

    debug!(
        labels = probabilities.len(),
        samples = label_index.num_samples(),
        "estimated class prior"
    );

    Ok(Prior { probabilities })
}
