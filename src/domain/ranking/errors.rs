//! Ranking errors and non-fatal warnings.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structural failures that abort a single evaluation.
///
/// These always point at a bug in how the caller built the request, so they
/// are surfaced immediately and never patched with defaults.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RankingError {
    /// Pairwise comparison matrix is not square, positive, or reciprocal.
    #[error("Invalid pairwise comparison matrix: {reason}")]
    InvalidMatrix { reason: String },

    /// Declared dimensions disagree with the supplied data.
    #[error("{what} mismatch: expected {expected}, got {actual}")]
    ShapeMismatch {
        what: String,
        expected: usize,
        actual: usize,
    },

    /// Nothing to rank, or nothing to rank by.
    #[error("Empty input: no {what} supplied")]
    EmptyInput { what: &'static str },

    /// Decision matrix cell is NaN or infinite.
    #[error("Decision matrix value at row {row}, column {column} is not a finite number")]
    NonFiniteValue { row: usize, column: usize },
}

impl RankingError {
    /// Creates an invalid matrix error.
    pub fn invalid_matrix(reason: impl Into<String>) -> Self {
        RankingError::InvalidMatrix {
            reason: reason.into(),
        }
    }

    /// Creates a shape mismatch error.
    pub fn shape_mismatch(what: impl Into<String>, expected: usize, actual: usize) -> Self {
        RankingError::ShapeMismatch {
            what: what.into(),
            expected,
            actual,
        }
    }

    /// Returns a stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            RankingError::InvalidMatrix { .. } => "INVALID_MATRIX",
            RankingError::ShapeMismatch { .. } => "SHAPE_MISMATCH",
            RankingError::EmptyInput { .. } => "EMPTY_INPUT",
            RankingError::NonFiniteValue { .. } => "NON_FINITE_VALUE",
        }
    }
}

/// Conditions that are reported alongside a result but do not stop it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RankingWarning {
    /// A criterion column has zero variance and cannot discriminate.
    #[serde(rename_all = "camelCase")]
    DegenerateColumn {
        criterion_index: usize,
        criterion_name: String,
    },

    /// Pairwise judgments exceed the consistency threshold.
    #[serde(rename_all = "camelCase")]
    InconsistentJudgments {
        consistency_ratio: f64,
        threshold: f64,
    },
}

impl RankingWarning {
    /// Returns a short human-readable description.
    pub fn describe(&self) -> String {
        match self {
            RankingWarning::DegenerateColumn { criterion_name, .. } => format!(
                "Criterion '{}' has the same value for every alternative and does not affect the ranking",
                criterion_name
            ),
            RankingWarning::InconsistentJudgments {
                consistency_ratio,
                threshold,
            } => format!(
                "Pairwise judgments are inconsistent (consistency ratio {:.3} exceeds {:.2})",
                consistency_ratio, threshold
            ),
        }
    }
}
