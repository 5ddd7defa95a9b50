//! Multinomial Naive Bayes inference core.
//!
//! This library provides:
//! - Grouping of a label array into per-class sample indices
//! - A validated sparse term-document count matrix
//! - Class prior and smoothed likelihood estimation
//! - Log-space posterior inference with overflow saturation
//! - A thin model wrapper plus accuracy / log-loss evaluation
//!
//! Tokenization and vectorization happen upstream; this crate only consumes
//! the resulting count matrix and label array.

pub mod evaluate;
pub mod inference;
pub mod label_index;
pub mod logging;
pub mod matrix;
pub mod model;

pub use inference::{
    estimate_likelihood, estimate_prior, infer_posteriors, infer_posteriors_with, log_evidence,
    Likelihood, Posterior, Prior,
};
pub use label_index::LabelIndex;
pub use matrix::TermDocumentMatrix;
pub use model::MultinomialNb;
pub use nb_common::{Error, Label, Result, SaturationPolicy};
