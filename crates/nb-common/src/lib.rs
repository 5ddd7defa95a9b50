//! Naive Bayes common types and errors.
//!
//! This crate provides foundational types shared across the workspace:
//! - The unified error type and its structured form
//! - The `Label` bound used for class identifiers
//! - The saturation policy applied during posterior normalization

pub mod error;
pub mod label;

pub use error::{Error, ErrorCategory, Result, StructuredError};
pub use label::{Label, SaturationPolicy};
