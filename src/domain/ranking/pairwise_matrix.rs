//! Pairwise Comparison Matrix - relative importance judgments between criteria.

use serde::Serialize;

use super::RankingError;

/// Default tolerance for the reciprocity check `a[i][j] * a[j][i] == 1`.
pub const DEFAULT_RECIPROCITY_TOLERANCE: f64 = 1e-6;

/// Square matrix where `[i][j]` says how much more important criterion `i`
/// is than criterion `j`.
///
/// Only constructible through validation: square, finite, strictly positive,
/// unit diagonal, reciprocal within tolerance. Bad input is rejected, never
/// repaired.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PairwiseComparisonMatrix {
    cells: Vec<Vec<f64>>,
}

impl PairwiseComparisonMatrix {
    /// Validates with the default reciprocity tolerance.
    pub fn new(cells: Vec<Vec<f64>>) -> Result<Self, RankingError> {
        Self::with_tolerance(cells, DEFAULT_RECIPROCITY_TOLERANCE)
    }

    /// Validates with an explicit reciprocity tolerance.
    pub fn with_tolerance(cells: Vec<Vec<f64>>, tolerance: f64) -> Result<Self, RankingError> {
        let n = cells.len();
        if n == 0 {
            return Err(RankingError::EmptyInput { what: "criteria" });
        }

        for (i, row) in cells.iter().enumerate() {
            if row.len() != n {
                return Err(RankingError::invalid_matrix(format!(
                    "matrix is not square: row {} has {} entries, expected {}",
                    i,
                    row.len(),
                    n
                )));
            }
            for (j, &value) in row.iter().enumerate() {
                if !value.is_finite() || value <= 0.0 {
                    return Err(RankingError::invalid_matrix(format!(
                        "entry [{}][{}] must be a positive finite number, got {}",
                        i, j, value
                    )));
                }
            }
        }

        for i in 0..n {
            if (cells[i][i] - 1.0).abs() > tolerance {
                return Err(RankingError::invalid_matrix(format!(
                    "diagonal entry [{}][{}] must be 1, got {}",
                    i, i, cells[i][i]
                )));
            }
            for j in (i + 1)..n {
                let product = cells[i][j] * cells[j][i];
                if (product - 1.0).abs() > tolerance {
                    return Err(RankingError::invalid_matrix(format!(
                        "entries [{}][{}] = {} and [{}][{}] = {} are not reciprocal",
                        i, j, cells[i][j], j, i, cells[j][i]
                    )));
                }
            }
        }

        Ok(Self { cells })
    }

    /// Equal-importance matrix of size `n` (every entry 1).
    pub fn identity(n: usize) -> Result<Self, RankingError> {
        Self::new(vec![vec![1.0; n]; n])
    }

    /// Perfectly consistent matrix `a[i][j] = w[i] / w[j]` from direct weights.
    ///
    /// Every weight must be positive and finite.
    pub fn from_weights(weights: &[f64]) -> Result<Self, RankingError> {
        if let Some(position) = weights.iter().position(|w| !w.is_finite() || *w <= 0.0) {
            return Err(RankingError::invalid_matrix(format!(
                "weight {} must be a positive finite number, got {}",
                position, weights[position]
            )));
        }
        let cells = weights
            .iter()
            .map(|wi| weights.iter().map(|wj| wi / wj).collect())
            .collect();
        Self::new(cells)
    }

    /// Number of criteria compared.
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Judgment of criterion `i` over criterion `j`.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.cells[i][j]
    }

    /// All rows.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.cells
    }
}
