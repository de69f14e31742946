//! Criterion polarity (benefit or cost).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Whether higher or lower raw values are preferable for a criterion.
///
/// Polarity is declared by the caller for every criterion. It is never
/// inferred from the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    /// Higher raw value is better (e.g. reliability).
    Benefit,
    /// Lower raw value is better (e.g. price).
    Cost,
}

impl Polarity {
    /// Returns the wire label.
    pub fn label(&self) -> &'static str {
        match self {
            Polarity::Benefit => "benefit",
            Polarity::Cost => "cost",
        }
    }

    /// Picks the preferred of two values under this polarity.
    pub fn best_of(&self, a: f64, b: f64) -> f64 {
        match self {
            Polarity::Benefit => a.max(b),
            Polarity::Cost => a.min(b),
        }
    }

    /// Picks the less preferred of two values under this polarity.
    pub fn worst_of(&self, a: f64, b: f64) -> f64 {
        match self {
            Polarity::Benefit => a.min(b),
            Polarity::Cost => a.max(b),
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Polarity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "benefit" => Ok(Polarity::Benefit),
            "cost" => Ok(Polarity::Cost),
            other => Err(ValidationError::invalid_format(
                "polarity",
                format!("expected 'benefit' or 'cost', got '{}'", other),
            )),
        }
    }
}
