//! Ranking engine configuration

use serde::Deserialize;

use crate::domain::ranking::{
    EngineSettings, CONSISTENCY_THRESHOLD, DEFAULT_RECIPROCITY_TOLERANCE,
    MAX_RECIPROCITY_TOLERANCE,
};

use super::error::ValidationError;

/// Tolerances applied by the decision orchestrator
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Consistency ratio above which judgments are flagged
    #[serde(default = "default_consistency_threshold")]
    pub consistency_threshold: f64,

    /// Allowed relative error in `a[i][j] * a[j][i] = 1`
    #[serde(default = "default_reciprocity_tolerance")]
    pub reciprocity_tolerance: f64,
}

impl EngineConfig {
    /// Validate engine configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.consistency_threshold > 0.0 && self.consistency_threshold <= 1.0) {
            return Err(ValidationError::InvalidConsistencyThreshold(
                self.consistency_threshold,
            ));
        }
        if !(self.reciprocity_tolerance > 0.0
            && self.reciprocity_tolerance <= MAX_RECIPROCITY_TOLERANCE)
        {
            return Err(ValidationError::InvalidReciprocityTolerance(
                self.reciprocity_tolerance,
            ));
        }
        Ok(())
    }

    /// Domain settings for the orchestrator.
    pub fn settings(&self) -> Result<EngineSettings, ValidationError> {
        self.validate()?;
        EngineSettings::new(self.reciprocity_tolerance, self.consistency_threshold)
            .map_err(|_| ValidationError::InvalidReciprocityTolerance(self.reciprocity_tolerance))
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            consistency_threshold: default_consistency_threshold(),
            reciprocity_tolerance: default_reciprocity_tolerance(),
        }
    }
}

fn default_consistency_threshold() -> f64 {
    CONSISTENCY_THRESHOLD
}

fn default_reciprocity_tolerance() -> f64 {
    DEFAULT_RECIPROCITY_TOLERANCE
}
