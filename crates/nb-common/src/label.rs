//! Class label bound and saturation policy.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Anything usable as a class identifier.
///
/// Labels are kept in ordered maps so that iteration order, tie-breaking and
/// error messages are deterministic. Integers and strings both qualify.
pub trait Label: Ord + Clone + fmt::Debug {}

impl<T: Ord + Clone + fmt::Debug> Label for T {}

/// How saturated labels are scored when normalizing a posterior.
///
/// A label saturates when its stabilized log-score is too large to
/// exponentiate. The document is then decided by the saturated labels alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaturationPolicy {
    /// Every saturated label gets exactly 1.0, every other label 0.0.
    ///
    /// When more than one label saturates in the same document the result
    /// sums to more than 1.0.
    #[default]
    Certain,
    /// Saturated labels split 1.0 evenly; every other label gets 0.0.
    Shared,
}

impl fmt::Display for SaturationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaturationPolicy::Certain => write!(f, "certain"),
            SaturationPolicy::Shared => write!(f, "shared"),
        }
    }
}

impl std::str::FromStr for SaturationPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "certain" => Ok(SaturationPolicy::Certain),
            "shared" | "split" => Ok(SaturationPolicy::Shared),
            _ => Err(format!("unknown saturation policy: {}", s)),
        }
    }
}
