//! Configuration validation errors and semantic validation.

use crate::classifier::ClassifierConfig;
use thiserror::Error;

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Configuration validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: String, actual: String },
}

impl ValidationError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ValidationError::IoError(_) => 60,
            ValidationError::ParseError(_) => 61,
            ValidationError::InvalidValue { .. } => 65,
            ValidationError::VersionMismatch { .. } => 66,
        }
    }
}

impl From<ValidationError> for nb_common::Error {
    fn from(err: ValidationError) -> Self {
        nb_common::Error::Config(err.to_string())
    }
}

/// Validate a classifier configuration semantically.
pub fn validate_config(config: &ClassifierConfig) -> ValidationResult<()> {
    if config.schema_version != crate::CONFIG_SCHEMA_VERSION {
        return Err(ValidationError::VersionMismatch {
            expected: crate::CONFIG_SCHEMA_VERSION.to_string(),
            actual: config.schema_version.clone(),
        });
    }

    if !config.smoothing.is_finite() || config.smoothing < 0.0 {
        return Err(ValidationError::InvalidValue {
            field: "smoothing".to_string(),
            message: format!("Must be finite and >= 0, got {}", config.smoothing),
        });
    }

    Ok(())
}
