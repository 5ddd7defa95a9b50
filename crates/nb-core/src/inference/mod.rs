//! Inference engine modules.
//!
//! Data flows one way: label groupings → prior and likelihood → posterior.
//! Every function here is pure; nothing is cached between calls.

pub mod likelihood;
pub mod posterior;
pub mod prior;

pub use likelihood::{estimate_likelihood, Likelihood};
pub use posterior::{
    infer_posteriors, infer_posteriors_with, joint_log_scores, log_evidence, Posterior,
};
pub use prior::{estimate_prior, Prior};
