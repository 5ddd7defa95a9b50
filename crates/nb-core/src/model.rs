//! Fitted multinomial Naive Bayes model.
//!
//! Bundles a prior and likelihood estimated from one training matrix so that
//! later documents can be scored against them. Nothing is persisted.

use crate::inference::{
    estimate_likelihood, estimate_prior, infer_posteriors_with, log_evidence, Likelihood,
    Posterior, Prior,
};
use crate::label_index::LabelIndex;
use crate::matrix::TermDocumentMatrix;
use nb_common::{Error, Label, Result};
use nb_config::{validate_config, ClassifierConfig};
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub struct MultinomialNb<L: Label> {
    prior: Prior<L>,
    likelihood: Likelihood<L>,
    config: ClassifierConfig,
}

impl<L: Label> MultinomialNb<L> {
    /// Estimate prior and likelihood from a training matrix and its labels.
    ///
    /// `labels[i]` is the class of row `i`.
    pub fn fit(
        matrix: &TermDocumentMatrix,
        labels: &[L],
        config: &ClassifierConfig,
    ) -> Result<Self> {
        validate_config(config)?;
        if labels.len() != matrix.rows() {
            return Err(Error::DimensionMismatch {
                what: "labels vs matrix rows",
                expected: matrix.rows(),
                actual: labels.len(),
            });
        }

        let label_index = LabelIndex::from_labels(labels);
        let prior = estimate_prior(&label_index)?;
        let likelihood = estimate_likelihood(matrix, &label_index, config.smoothing)?;

        info!(
            documents = matrix.rows(),
            vocabulary = matrix.cols(),
            labels = label_index.num_labels(),
            smoothing = config.smoothing,
            "fitted naive bayes model"
        );

        Ok(MultinomialNb {
            prior,
            likelihood,
            config: config.clone(),
        })
    }

    /// Assemble a model from precomputed parts.
    pub fn from_parts(
        prior: Prior<L>,
        likelihood: Likelihood<L>,
        config: ClassifierConfig,
    ) -> Result<Self> {
        validate_config(&config)?;
        if !prior.labels().eq(likelihood.labels()) {
            return Err(Error::InvalidInput(
                "prior and likelihood cover different labels".to_string(),
            ));
        }
        Ok(MultinomialNb {
            prior,
            likelihood,
            config,
        })
    }

    /// Posterior for every row, using the configured saturation policy.
    pub fn predict_proba(&self, matrix: &TermDocumentMatrix) -> Result<Vec<Posterior<L>>> {
        infer_posteriors_with(matrix, &self.prior, &self.likelihood, self.config.saturation)
    }

    /// Most probable label for every row.
    pub fn predict(&self, matrix: &TermDocumentMatrix) -> Result<Vec<L>> {
        let posteriors = self.predict_proba(matrix)?;
        posteriors
            .iter()
            .map(|p| {
                p.argmax()
                    .cloned()
                    .ok_or_else(|| Error::InvalidInput("posterior has no labels".to_string()))
            })
            .collect()
    }

    /// ln P(document) under the fitted model for every row.
    pub fn log_evidence(&self, matrix: &TermDocumentMatrix) -> Result<Vec<f64>> {
        log_evidence(matrix, &self.prior, &self.likelihood)
    }

    pub fn prior(&self) -> &Prior<L> {
        &self.prior
    }

    pub fn likelihood(&self) -> &Likelihood<L> {
        &self.likelihood
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn labels(&self) -> impl Iterator<Item = &L> {
        self.prior.labels()
    }
}
