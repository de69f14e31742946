//! Criteria Weighting - AHP weights and consistency from pairwise judgments.

use serde::{Deserialize, Serialize};

use super::{PairwiseComparisonMatrix, RankingError};

/// Consistency ratio above which judgments are flagged as inconsistent.
pub const CONSISTENCY_THRESHOLD: f64 = 0.1;

/// Tolerance for a weight vector summing to one.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Saaty's random consistency index for matrices of size 1 through 10.
const RANDOM_INDEX: [f64; 10] = [0.0, 0.0, 0.58, 0.90, 1.12, 1.24, 1.32, 1.41, 1.45, 1.49];

/// Random index used past the end of the table.
const RANDOM_INDEX_LARGE: f64 = 1.49;

/// Non-negative weights, one per criterion, summing to 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightVector(Vec<f64>);

impl WeightVector {
    /// Scales raw non-negative importances so they sum to 1.
    pub fn normalized(raw: &[f64]) -> Result<Self, RankingError> {
        if raw.is_empty() {
            return Err(RankingError::EmptyInput { what: "criteria" });
        }
        if let Some(position) = raw.iter().position(|w| !w.is_finite() || *w < 0.0) {
            return Err(RankingError::invalid_matrix(format!(
                "weight {} must be a non-negative finite number, got {}",
                position, raw[position]
            )));
        }
        let total: f64 = raw.iter().sum();
        if total <= 0.0 {
            return Err(RankingError::invalid_matrix("weights sum to zero"));
        }
        Ok(Self(raw.iter().map(|w| w / total).collect()))
    }

    /// Equal weight for each of `n` criteria.
    pub fn uniform(n: usize) -> Result<Self, RankingError> {
        Self::normalized(&vec![1.0; n])
    }

    /// Weight of criterion `index`.
    pub fn get(&self, index: usize) -> f64 {
        self.0[index]
    }

    /// Number of weights.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if there are no weights.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Weights in criteria order.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }
}

/// Output of weight derivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightDerivation {
    pub weights: WeightVector,
    /// Principal eigenvalue estimate `mean((A w)_i / w_i)`.
    pub lambda_max: f64,
    /// `(lambda_max - n) / (n - 1)`.
    pub consistency_index: f64,
    /// `consistency_index / RI(n)`; zero for one or two criteria.
    pub consistency_ratio: f64,
}

impl WeightDerivation {
    /// Returns true if the ratio is within `threshold`.
    pub fn is_consistent(&self, threshold: f64) -> bool {
        self.consistency_ratio <= threshold
    }
}

/// AHP weighting functions.
pub struct CriteriaWeighting;

impl CriteriaWeighting {
    /// Derives criterion weights and the consistency ratio.
    ///
    /// # Algorithm
    /// 1. Divide every entry by its column sum.
    /// 2. Weight of row `i` = mean of row `i` in the column-normalized matrix.
    /// 3. `lambda_max`, CI and CR follow the standard AHP formulation.
    ///
    /// This is the column-normalize/row-average estimator, not the principal
    /// eigenvector.
    ///
    /// # Edge Cases
    /// - Size 1: weight `[1.0]`, CR 0
    /// - Size 2: any reciprocal matrix is consistent, CR 0
    /// - Tiny negative CI from rounding is clamped to 0
    pub fn derive_weights(matrix: &PairwiseComparisonMatrix) -> WeightDerivation {
        let n = matrix.size();

        let column_sums: Vec<f64> = (0..n)
            .map(|j| (0..n).map(|i| matrix.get(i, j)).sum())
            .collect();

        let raw: Vec<f64> = (0..n)
            .map(|i| (0..n).map(|j| matrix.get(i, j) / column_sums[j]).sum::<f64>() / n as f64)
            .collect();

        // Row averages of a column-stochastic matrix already sum to 1; the
        // division only removes rounding drift.
        let total: f64 = raw.iter().sum();
        let weights = WeightVector(raw.into_iter().map(|w| w / total).collect());

        let lambda_max = Self::lambda_max(matrix, &weights);

        let (consistency_index, consistency_ratio) = if n <= 2 {
            (0.0, 0.0)
        } else {
            let ci = ((lambda_max - n as f64) / (n as f64 - 1.0)).max(0.0);
            (ci, ci / Self::random_index(n))
        };

        WeightDerivation {
            weights,
            lambda_max,
            consistency_index,
            consistency_ratio,
        }
    }

    /// Saaty's random index for a matrix of size `n`.
    pub fn random_index(n: usize) -> f64 {
        match n {
            0 => 0.0,
            n if n <= RANDOM_INDEX.len() => RANDOM_INDEX[n - 1],
            _ => RANDOM_INDEX_LARGE,
        }
    }

    fn lambda_max(matrix: &PairwiseComparisonMatrix, weights: &WeightVector) -> f64 {
        let n = matrix.size();
        let total: f64 = (0..n)
            .map(|i| {
                let weighted_row: f64 = (0..n).map(|j| matrix.get(i, j) * weights.get(j)).sum();
                weighted_row / weights.get(i)
            })
            .sum();
        total / n as f64
    }
}
