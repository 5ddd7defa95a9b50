//! Error types for the Naive Bayes workspace.
//!
//! Errors carry:
//! - Stable error codes for machine parsing
//! - Category classification for error grouping
//! - Recoverability hints
//! - Remediation suggestions for humans
//!
//! Numeric saturation during posterior normalization is not an error; it is
//! absorbed by the inference code and never reaches this type.
//!
//! # Structured Output
//!
//! ```json
//! {
//!   "code": 21,
//!   "category": "numeric",
//!   "message": "division by zero: label \"spam\" has a smoothed total count of 0",
//!   "recoverable": true,
//!   "context": { "label": "\"spam\"" }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Result type alias for Naive Bayes operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Caller-supplied data violates a precondition.
    Input,
    /// Arithmetic that cannot produce a defined result.
    Numeric,
    /// Configuration file errors.
    Config,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Input => write!(f, "input"),
            ErrorCategory::Numeric => write!(f, "numeric"),
            ErrorCategory::Config => write!(f, "config"),
        }
    }
}

/// Unified error type.
#[derive(Error, Debug)]
pub enum Error {
    // Input errors (10-19)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("dimension mismatch for {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("empty label index")]
    EmptyLabelIndex,

    // Numeric errors (20-29)
    #[error("division by zero: label {label} has a smoothed total count of 0")]
    DivisionByZero { label: String },

    // Configuration errors (30-39)
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns the error code for this error type.
    ///
    /// Error codes are stable and grouped by category:
    /// - 10-19: Input errors
    /// - 20-29: Numeric errors
    /// - 30-39: Configuration errors
    pub fn code(&self) -> u32 {
        match self {
            Error::InvalidInput(_) => 10,
            Error::DimensionMismatch { .. } => 11,
            Error::EmptyLabelIndex => 12,
            Error::DivisionByZero { .. } => 21,
            Error::Config(_) => 30,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::InvalidInput(_) | Error::DimensionMismatch { .. } | Error::EmptyLabelIndex => {
                ErrorCategory::Input
            }
            Error::DivisionByZero { .. } => ErrorCategory::Numeric,
            Error::Config(_) => ErrorCategory::Config,
        }
    }

    /// Whether this error belongs to the invalid-input family.
    pub fn is_invalid_input(&self) -> bool {
        self.category() == ErrorCategory::Input
    }

    /// Returns whether this error is potentially recoverable.
    ///
    /// Every error is local to a single call, so "recoverable" here means the
    /// same call can succeed with corrected inputs.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Error::InvalidInput(_) => true,
            Error::DimensionMismatch { .. } => true,
            Error::EmptyLabelIndex => true,
            // Smoothing > 0 always fixes it
            Error::DivisionByZero { .. } => true,
            Error::Config(_) => true,
        }
    }

    /// Returns a human-readable remediation hint.
    pub fn remediation(&self) -> &'static str {
        match self {
            Error::InvalidInput(_) => {
                "Check the matrix, label groupings and smoothing constant passed to the call."
            }
            Error::DimensionMismatch { .. } => {
                "Make sure the label array has one entry per matrix row and every likelihood vector has one entry per vocabulary term."
            }
            Error::EmptyLabelIndex => "Provide at least one labeled training sample.",
            Error::DivisionByZero { .. } => {
                "Use a smoothing constant greater than zero, or drop labels whose documents are all empty."
            }
            Error::Config(_) => "Check syntax and values in the classifier configuration file.",
        }
    }

    /// Returns a short headline for human-readable output.
    pub fn headline(&self) -> &'static str {
        match self {
            Error::InvalidInput(_) => "Invalid Input",
            Error::DimensionMismatch { .. } => "Dimension Mismatch",
            Error::EmptyLabelIndex => "Empty Label Index",
            Error::DivisionByZero { .. } => "Division By Zero",
            Error::Config(_) => "Configuration Error",
        }
    }
}

/// Structured error response for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// Stable error code.
    pub code: u32,

    /// Error category for grouping.
    pub category: ErrorCategory,

    /// Human-readable error message.
    pub message: String,

    /// Whether the error is potentially recoverable.
    pub recoverable: bool,

    /// Additional structured context (e.g., label, dimensions).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub context: HashMap<String, serde_json::Value>,
}

impl From<&Error> for StructuredError {
    fn from(err: &Error) -> Self {
        let mut context = HashMap::new();

        match err {
            Error::DimensionMismatch {
                what,
                expected,
                actual,
            } => {
                context.insert("what".to_string(), serde_json::json!(what));
                context.insert("expected".to_string(), serde_json::json!(expected));
                context.insert("actual".to_string(), serde_json::json!(actual));
            }
            Error::DivisionByZero { label } => {
                context.insert("label".to_string(), serde_json::json!(label));
            }
            _ => {}
        }

        StructuredError {
            code: err.code(),
            category: err.category(),
            message: err.to_string(),
            recoverable: err.is_recoverable(),
            context,
        }
    }
}

impl StructuredError {
    /// Add additional context to the error.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.context.insert(key.into(), v);
        }
        self
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"code":{},"error":"serialization_failed"}}"#, self.code)
        })
    }
}

/// Format an error for human-readable stderr output.
///
/// ```text
/// ✗ [Headline]
///   Reason: [Error message]
///   Fix: [Remediation hint]
/// ```
pub fn format_error_human(err: &Error) -> String {
    format!(
        "✗ {headline}\n  Reason: {message}\n  Fix: {remediation}",
        headline = err.headline(),
        message = err,
        remediation = err.remediation()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(Error::InvalidInput("x".into()).code(), 10);
        assert_eq!(Error::EmptyLabelIndex.code(), 12);
        assert_eq!(
            Error::DivisionByZero {
                label: "\"a\"".into()
            }
            .code(),
            21
        );
        assert_eq!(Error::Config("bad".into()).code(), 30);
    }

    #[test]
    fn test_error_category() {
        let mismatch = Error::DimensionMismatch {
            what: "labels",
            expected: 3,
            actual: 2,
        };
        assert_eq!(mismatch.category(), ErrorCategory::Input);
        assert!(mismatch.is_invalid_input());

        let div = Error::DivisionByZero { label: "1".into() };
        assert_eq!(div.category(), ErrorCategory::Numeric);
        assert!(!div.is_invalid_input());
    }

    #[test]
    fn test_structured_error_context() {
        let err = Error::DimensionMismatch {
            what: "likelihood vector",
            expected: 4,
            actual: 3,
        };
        let structured = StructuredError::from(&err);
        assert_eq!(structured.code, 11);
        assert_eq!(structured.context["expected"], serde_json::json!(4));
        assert_eq!(structured.context["actual"], serde_json::json!(3));

        let json = structured.with_context("call", "infer_posteriors").to_json();
        assert!(json.contains("\"category\":\"input\""));
        assert!(json.contains("infer_posteriors"));
    }

    #[test]
    fn test_format_error_human() {
        let err = Error::DivisionByZero {
            label: "\"ham\"".into(),
        };
        let text = format_error_human(&err);
        assert!(text.starts_with("✗ Division By Zero"));
        assert!(text.contains("Reason: division by zero"));
        assert!(text.contains("Fix: Use a smoothing constant"));
    }
}
