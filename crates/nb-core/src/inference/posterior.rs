//! Per-document posterior P(label | document) in log space.
//!
//! Each document's score for a label starts at ln(prior) and gains
//! count · ln(likelihood) for every non-zero term in the row. Scores are then
//! shifted by the smallest score and exponentiated. A shifted score whose
//! exponential is not representable marks the label as saturated: the
//! document is decided by its saturated labels alone.
//!
//! A zero likelihood for a term present in the document drives that label's
//! score to -inf. When another label stays finite the shift is infinite for
//! it, so it saturates and takes the whole document.

use super::likelihood::Likelihood;
use super::prior::Prior;
use crate::matrix::TermDocumentMatrix;
use nb_common::{Error, Label, Result, SaturationPolicy};
use nb_math::{checked_exp, log_sum_exp, normalize_in_place, weighted_ln};
use serde::Serialize;
use sprs::CsVecView;
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Posterior class distribution for one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Posterior<L: Label> {
    probabilities: BTreeMap<L, f64>,
    saturated: bool,
}

impl<L: Label> Posterior<L> {
    /// Probability of one label.
    pub fn get(&self, label: &L) -> Option<f64> {
        self.probabilities.get(label).copied()
    }

    /// Number of labels scored.
    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    /// (label, probability) pairs in ascending label order.
    pub fn iter(&self) -> impl Iterator<Item = (&L, f64)> {
        self.probabilities.iter().map(|(label, &p)| (label, p))
    }

    /// Sum over labels. 1.0 unless several labels saturated under
    /// [`SaturationPolicy::Certain`].
    pub fn total(&self) -> f64 {
        self.probabilities.values().sum()
    }

    /// Whether the overflow guard decided this document.
    pub fn is_saturated(&self) -> bool {
        self.saturated
    }

    /// Most probable label; ties go to the smallest label.
    pub fn argmax(&self) -> Option<&L> {
        let mut best: Option<(&L, f64)> = None;
        for (label, &p) in &self.probabilities {
            match best {
                Some((_, best_p)) if p <= best_p => {}
                _ => best = Some((label, p)),
            }
        }
        best.map(|(label, _)| label)
    }

    /// Consume into the label → probability map.
    pub fn into_inner(self) -> BTreeMap<L, f64> {
        self.probabilities
    }
}

/// Stabilized, exponentiated score of one label.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Scaled {
    Finite(f64),
    Saturated,
}

/// Posterior for every row of `matrix`, in row order.
///
/// Uses [`SaturationPolicy::Certain`]: every saturated label gets 1.0.
pub fn infer_posteriors<L: Label>(
    matrix: &TermDocumentMatrix,
    prior: &Prior<L>,
    likelihood: &Likelihood<L>,
) -> Result<Vec<Posterior<L>>> {
    infer_posteriors_with(matrix, prior, likelihood, SaturationPolicy::Certain)
}

/// Posterior for every row of `matrix` under an explicit saturation policy.
pub fn infer_posteriors_with<L: Label>(
    matrix: &TermDocumentMatrix,
    prior: &Prior<L>,
    likelihood: &Likelihood<L>,
    policy: SaturationPolicy,
) -> Result<Vec<Posterior<L>>> {
    let model = ScoringTables::new(matrix, prior, likelihood)?;

    debug!(
        documents = matrix.rows(),
        labels = model.labels.len(),
        %policy,
        "inferring posteriors"
    );

    let mut posteriors = Vec::with_capacity(matrix.rows());
    let mut saturated_docs = 0usize;

    for i in 0..matrix.rows() {
        let scores = model.row_scores(matrix, i);
        let scaled = stabilize(&scores);
        let (values, saturated) = normalize(&scaled, policy);

        if saturated {
            saturated_docs += 1;
            trace!(document = i, "posterior saturated");
        }

        let probabilities = model
            .labels
            .iter()
            .map(|&label| label.clone())
            .zip(values)
            .collect();
        posteriors.push(Posterior {
            probabilities,
            saturated,
        });
    }

    debug!(
        documents = posteriors.len(),
        saturated = saturated_docs,
        "posterior inference complete"
    );

    Ok(posteriors)
}

/// Unnormalized log scores ln P(label) + Σ count · ln P(term | label).
///
/// One map per row, in row order. Labels made impossible by a zero
/// likelihood hold NEG_INFINITY.
pub fn joint_log_scores<L: Label>(
    matrix: &TermDocumentMatrix,
    prior: &Prior<L>,
    likelihood: &Likelihood<L>,
) -> Result<Vec<BTreeMap<L, f64>>> {
    let model = ScoringTables::new(matrix, prior, likelihood)?;
    let mut out = Vec::with_capacity(matrix.rows());
    for i in 0..matrix.rows() {
        let scores = model.row_scores(matrix, i);
        out.push(
            model
                .labels
                .iter()
                .map(|&label| label.clone())
                .zip(scores)
                .collect(),
        );
    }
    Ok(out)
}

/// Log marginal likelihood ln P(document) for every row, in row order.
///
/// This is ln Σ exp(score) over the joint log scores; a document every label
/// rules out gets NEG_INFINITY. An empty document scores ln Σ prior = 0.
pub fn log_evidence<L: Label>(
    matrix: &TermDocumentMatrix,
    prior: &Prior<L>,
    likelihood: &Likelihood<L>,
) -> Result<Vec<f64>> {
    let model = ScoringTables::new(matrix, prior, likelihood)?;
    Ok((0..matrix.rows())
        .map(|i| log_sum_exp(&model.row_scores(matrix, i)))
        .collect())
}

/// Label-aligned views of the prior and likelihood for one inference call.
struct ScoringTables<'a, L: Label> {
    labels: Vec<&'a L>,
    log_priors: Vec<f64>,
    vectors: Vec<&'a [f64]>,
}

impl<'a, L: Label> ScoringTables<'a, L> {
    fn new(
        matrix: &TermDocumentMatrix,
        prior: &'a Prior<L>,
        likelihood: &'a Likelihood<L>,
    ) -> Result<Self> {
        if prior.len() != likelihood.len() || !prior.labels().eq(likelihood.labels()) {
            return Err(Error::InvalidInput(
                "prior and likelihood cover different labels".to_string(),
            ));
        }
        if likelihood.vocabulary_size() != matrix.cols() {
            return Err(Error::DimensionMismatch {
                what: "likelihood vocabulary vs matrix columns",
                expected: matrix.cols(),
                actual: likelihood.vocabulary_size(),
            });
        }

        let mut labels = Vec::with_capacity(prior.len());
        let mut log_priors = Vec::with_capacity(prior.len());
        let mut vectors = Vec::with_capacity(prior.len());
        for ((label, p), (_, vector)) in prior.iter().zip(likelihood.iter()) {
            labels.push(label);
            log_priors.push(p.ln());
            vectors.push(vector);
        }

        Ok(ScoringTables {
            labels,
            log_priors,
            vectors,
        })
    }

    fn row_scores(&self, matrix: &TermDocumentMatrix, i: usize) -> Vec<f64> {
        match matrix.row(i) {
            Some(row) => self.document_scores(row),
            None => self.log_priors.clone(),
        }
    }

    fn document_scores(&self, row: CsVecView<'_, f64>) -> Vec<f64> {
        let mut scores = self.log_priors.clone();
        for (term, &count) in row.iter() {
            if count == 0.0 {
                continue;
            }
            for (score, vector) in scores.iter_mut().zip(&self.vectors) {
                *score += weighted_ln(count, vector[term]);
            }
        }
        scores
    }
}

/// Shift by the minimum score and exponentiate with an overflow check.
///
/// The minimum itself always maps to exp(0) = 1, which also covers the case
/// where every score is -inf.
fn stabilize(scores: &[f64]) -> Vec<Scaled> {
    let min_log = scores.iter().copied().fold(f64::INFINITY, f64::min);
    scores
        .iter()
        .map(|&s| {
            if s == min_log {
                return Scaled::Finite(1.0);
            }
            match checked_exp(s - min_log) {
                Some(v) => Scaled::Finite(v),
                None => Scaled::Saturated,
            }
        })
        .collect()
}

/// Turn scaled scores into the reported probabilities.
///
/// Returns the values and whether saturation decided them.
fn normalize(scaled: &[Scaled], policy: SaturationPolicy) -> (Vec<f64>, bool) {
    let saturated = scaled
        .iter()
        .filter(|s| matches!(s, Scaled::Saturated))
        .count();

    if saturated > 0 {
        let share = match policy {
            SaturationPolicy::Certain => 1.0,
            SaturationPolicy::Shared => 1.0 / saturated as f64,
        };
        let values = scaled
            .iter()
            .map(|s| match s {
                Scaled::Saturated => share,
                Scaled::Finite(_) => 0.0,
            })
            .collect();
        return (values, true);
    }

    let mut values: Vec<f64> = scaled
        .iter()
        .map(|s| match s {
            Scaled::Finite(v) => *v,
            Scaled::Saturated => 0.0,
        })
        .collect();

    // The minimum always scales to 1, so the total is positive.
    normalize_in_place(&mut values);

    (values, false)
}
