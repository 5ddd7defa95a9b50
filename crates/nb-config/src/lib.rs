//! Naive Bayes classifier configuration loading and validation.
//!
//! This crate provides:
//! - A typed struct for the classifier configuration file (JSON or TOML)
//! - Semantic validation of the loaded values

pub mod classifier;
pub mod validate;

pub use classifier::ClassifierConfig;
pub use validate::{validate_config, ValidationError, ValidationResult};

/// Schema version for configuration files.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";
