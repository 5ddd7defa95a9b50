//! Per-class term likelihoods with additive smoothing.

use crate::label_index::LabelIndex;
use crate::matrix::TermDocumentMatrix;
use nb_common::{Error, Label, Result};
use nb_math::{is_distribution, normalize_in_place, DISTRIBUTION_TOL};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Label → P(term | label) for every vocabulary position.
///
/// Each vector is non-negative and sums to 1. With zero smoothing a term the
/// label never saw has probability exactly 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Likelihood<L: Label> {
    vectors: BTreeMap<L, Vec<f64>>,
    vocabulary_size: usize,
}

impl<L: Label> Likelihood<L> {
    /// Build from explicit probability vectors.
    ///
    /// All vectors must share one non-zero length and each must be a
    /// distribution: entries in [0, 1] summing to 1. They are taken as given,
    /// not renormalized.
    pub fn from_vectors(vectors: BTreeMap<L, Vec<f64>>) -> Result<Self> {
        let vocabulary_size = match vectors.values().next() {
            Some(v) => v.len(),
            None => return Err(Error::InvalidInput("likelihood has no labels".to_string())),
        };
        if vocabulary_size == 0 {
            return Err(Error::InvalidInput("likelihood vocabulary is empty".to_string()));
        }
        for (label, vector) in &vectors {
            if vector.len() != vocabulary_size {
                return Err(Error::DimensionMismatch {
                    what: "likelihood vector",
                    expected: vocabulary_size,
                    actual: vector.len(),
                });
            }
            if vector.iter().any(|p| !(0.0..=1.0).contains(p)) {
                return Err(Error::InvalidInput(format!(
                    "likelihood for label {:?} has an entry outside [0, 1]",
                    label
                )));
            }
            if !is_distribution(vector, DISTRIBUTION_TOL) {
                return Err(Error::InvalidInput(format!(
                    "likelihood for label {:?} must sum to 1, got {}",
                    label,
                    vector.iter().sum::<f64>()
                )));
            }
        }
        Ok(Likelihood {
            vectors,
            vocabulary_size,
        })
    }

    /// Probability vector for one label.
    pub fn get(&self, label: &L) -> Option<&[f64]> {
        self.vectors.get(label).map(Vec::as_slice)
    }

    /// Length shared by every vector.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary_size
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Labels in ascending order.
    pub fn labels(&self) -> impl Iterator<Item = &L> {
        self.vectors.keys()
    }

    /// (label, vector) pairs in ascending label order.
    pub fn iter(&self) -> impl Iterator<Item = (&L, &[f64])> {
        self.vectors.iter().map(|(label, v)| (label, v.as_slice()))
    }

    /// Consume into the label → vector map.
    pub fn into_inner(self) -> BTreeMap<L, Vec<f64>> {
        self.vectors
    }
}

/// Smoothed per-class term distributions.
///
/// For each label the rows of its samples are summed column-wise, `smoothing`
/// is added to every entry, and the vector is divided by its total. A total
/// too large for `f64` is rescaled first; only a zero total is an error.
pub fn estimate_likelihood<L: Label>(
    matrix: &TermDocumentMatrix,
    label_index: &LabelIndex<L>,
    smoothing: f64,
) -> Result<Likelihood<L>> {
    if !smoothing.is_finite() || smoothing < 0.0 {
        return Err(Error::InvalidInput(format!(
            "smoothing must be finite and >= 0, got {}",
            smoothing
        )));
    }
    if label_index.is_empty() {
        return Err(Error::EmptyLabelIndex);
    }
    if label_index.num_samples() != matrix.rows() {
        return Err(Error::DimensionMismatch {
            what: "labeled samples vs matrix rows",
            expected: matrix.rows(),
            actual: label_index.num_samples(),
        });
    }
    if matrix.cols() == 0 {
        return Err(Error::InvalidInput("vocabulary is empty".to_string()));
    }

    let mut vectors = BTreeMap::new();
    for (label, indices) in label_index.iter() {
        let mut counts = matrix.sum_rows(indices);
        for c in counts.iter_mut() {
            *c += smoothing;
        }
        if counts.iter().any(|c| c.is_infinite()) {
            return Err(Error::InvalidInput(format!(
                "summed term counts for label {:?} overflow f64",
                label
            )));
        }
        if normalize_in_place(&mut counts).is_none() {
            return Err(Error::DivisionByZero {
                label: format!("{:?}", label),
            });
        }
        vectors.insert(label.clone(), counts);
    }

    debug!(
        labels = vectors.len(),
        vocabulary = matrix.cols(),
        smoothing,
        "estimated term likelihoods"
    );

    Ok(Likelihood {
        vectors,
        vocabulary_size: matrix.cols(),
    })
}
