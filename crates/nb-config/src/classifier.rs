//! Classifier configuration types.

use crate::validate::{validate_config, ValidationError, ValidationResult};
use nb_common::SaturationPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete classifier configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Additive (Laplace) smoothing constant added to every term count.
    #[serde(default)]
    pub smoothing: f64,

    /// Scoring of labels whose relative likelihood overflows.
    #[serde(default)]
    pub saturation: SaturationPolicy,
}

fn default_schema_version() -> String {
    crate::CONFIG_SCHEMA_VERSION.to_string()
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig {
            schema_version: default_schema_version(),
            description: None,
            smoothing: 0.0,
            saturation: SaturationPolicy::default(),
        }
    }
}

impl ClassifierConfig {
    /// Configuration with Laplace smoothing (alpha = 1).
    pub fn laplace() -> Self {
        Self::default().with_smoothing(1.0)
    }

    /// Set the smoothing constant.
    pub fn with_smoothing(mut self, smoothing: f64) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// Set the saturation policy.
    pub fn with_saturation(mut self, saturation: SaturationPolicy) -> Self {
        self.saturation = saturation;
        self
    }

    /// Load and validate a configuration file.
    ///
    /// `.toml` files are parsed as TOML, everything else as JSON.
    pub fn from_file(path: &Path) -> ValidationResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ValidationError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        if is_toml {
            Self::from_toml_str(&content)
        } else {
            Self::from_json_str(&content)
        }
    }

    /// Parse and validate a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> ValidationResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ValidationError::ParseError(format!("Invalid JSON: {}", e)))?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Parse and validate a configuration from a TOML string.
    pub fn from_toml_str(text: &str) -> ValidationResult<Self> {
        let config: Self = toml::from_str(text)
            .map_err(|e| ValidationError::ParseError(format!("Invalid TOML: {}", e)))?;
        validate_config(&config)?;
        Ok(config)
    }
}
