//! Matrix Normalizer - vector normalization of raw criterion columns.

use serde::{Deserialize, Serialize};

use super::{Criterion, DecisionMatrix, RankingError};

/// Spread, relative to the column's largest magnitude, below which a column
/// counts as having zero variance.
pub const DEGENERATE_EPSILON: f64 = 1e-12;

/// Unit-comparable matrix, same shape as the input.
///
/// Cost and benefit columns are normalized identically here. Polarity is
/// applied later by the ranker, which takes the column minimum as the ideal
/// for cost criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedMatrix {
    pub values: Vec<Vec<f64>>,
    /// Columns whose raw values were all identical; every value there is 0.
    pub degenerate_columns: Vec<usize>,
}

impl NormalizedMatrix {
    /// Number of rows.
    pub fn alternative_count(&self) -> usize {
        self.values.len()
    }

    /// Number of columns.
    pub fn criteria_count(&self) -> usize {
        self.values.first().map(Vec::len).unwrap_or(0)
    }

    /// Returns true if column `index` carries no discriminating power.
    pub fn is_degenerate(&self, index: usize) -> bool {
        self.degenerate_columns.contains(&index)
    }
}

/// Normalization functions.
pub struct MatrixNormalizer;

impl MatrixNormalizer {
    /// Vector-normalizes every column: `r_ij = x_ij / sqrt(sum_i x_ij^2)`.
    ///
    /// Each column is first scaled by its largest magnitude, so the sum of
    /// squares cannot overflow or underflow for any finite input.
    ///
    /// # Edge Cases
    /// - Column with identical values (including all zero): every entry
    ///   becomes 0 and the column index is reported as degenerate
    /// - Mixed-sign columns are normalized as-is; the ranker only compares
    ///   positions within a column
    pub fn normalize(
        matrix: &DecisionMatrix,
        criteria: &[Criterion],
    ) -> Result<NormalizedMatrix, RankingError> {
        let rows = matrix.alternative_count();
        let columns = matrix.criteria_count();
        if criteria.len() != columns {
            return Err(RankingError::shape_mismatch(
                "criteria count",
                columns,
                criteria.len(),
            ));
        }

        let mut values = vec![vec![0.0; columns]; rows];
        let mut degenerate_columns = Vec::new();

        for j in 0..columns {
            if Self::is_constant(matrix.column(j)) {
                degenerate_columns.push(j);
                continue;
            }

            let scale = matrix.column(j).fold(0.0_f64, |acc, x| acc.max(x.abs()));
            let norm = matrix
                .column(j)
                .map(|x| (x / scale).powi(2))
                .sum::<f64>()
                .sqrt();
            for (i, row) in values.iter_mut().enumerate() {
                row[j] = matrix.value(i, j) / scale / norm;
            }
        }

        Ok(NormalizedMatrix {
            values,
            degenerate_columns,
        })
    }

    fn is_constant(column: impl Iterator<Item = f64>) -> bool {
        let (min, max) = column.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| {
            (lo.min(x), hi.max(x))
        });
        max - min <= DEGENERATE_EPSILON * max.abs().max(min.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criteria(n: usize) -> Vec<Criterion> {
        (0..n).map(|j| Criterion::benefit(format!("c{}", j))).collect()
    }

    #[test]
    fn columns_have_unit_euclidean_norm() {
        let matrix = DecisionMatrix::new(vec![vec![3.0, 1.0], vec![4.0, 1.0], vec![0.0, 2.0]])
            .unwrap();
        let normalized = MatrixNormalizer::normalize(&matrix, &criteria(2)).unwrap();

        assert_eq!(normalized.values[0][0], 0.6);
        assert_eq!(normalized.values[1][0], 0.8);
        assert_eq!(normalized.values[2][0], 0.0);
        for j in 0..2 {
            let norm: f64 = normalized.values.iter().map(|r| r[j] * r[j]).sum();
            assert!((norm - 1.0).abs() < 1e-12);
        }
        assert!(normalized.degenerate_columns.is_empty());
    }

    #[test]
    fn cost_columns_are_normalized_like_benefit_columns() {
        let matrix = DecisionMatrix::new(vec![vec![10.0], vec![100.0]]).unwrap();
        let as_cost = MatrixNormalizer::normalize(&matrix, &[Criterion::cost("price")]).unwrap();
        let as_benefit =
            MatrixNormalizer::normalize(&matrix, &[Criterion::benefit("price")]).unwrap();

        assert_eq!(as_cost.values, as_benefit.values);
    }

    #[test]
    fn all_zero_column_is_degenerate() {
        let matrix = DecisionMatrix::new(vec![vec![1.0, 0.0], vec![2.0, 0.0]]).unwrap();
        let normalized = MatrixNormalizer::normalize(&matrix, &criteria(2)).unwrap();

        assert_eq!(normalized.degenerate_columns, vec![1]);
        assert!(normalized.values.iter().all(|r| r[1] == 0.0));
    }

    #[test]
    fn identical_nonzero_column_is_degenerate() {
        let matrix = DecisionMatrix::new(vec![vec![5.0, 1.0], vec![5.0, 2.0]]).unwrap();
        let normalized = MatrixNormalizer::normalize(&matrix, &criteria(2)).unwrap();

        assert!(normalized.is_degenerate(0));
        assert!(!normalized.is_degenerate(1));
        assert!(normalized.values.iter().all(|r| r[0] == 0.0));
    }

    #[test]
    fn huge_values_keep_their_proportions() {
        let matrix = DecisionMatrix::new(vec![vec![1e200], vec![2e200]]).unwrap();
        let normalized = MatrixNormalizer::normalize(&matrix, &criteria(1)).unwrap();

        assert!(normalized.degenerate_columns.is_empty());
        let expected = [1.0 / 5.0_f64.sqrt(), 2.0 / 5.0_f64.sqrt()];
        for (row, want) in normalized.values.iter().zip(expected) {
            assert!((row[0] - want).abs() < 1e-12);
        }
    }

    #[test]
    fn tiny_distinct_values_are_not_degenerate() {
        let matrix = DecisionMatrix::new(vec![vec![1e-13], vec![5e-13]]).unwrap();
        let normalized = MatrixNormalizer::normalize(&matrix, &criteria(1)).unwrap();

        assert!(!normalized.is_degenerate(0));
        assert!(normalized.values[1][0] > normalized.values[0][0]);
        let norm: f64 = normalized.values.iter().map(|r| r[0] * r[0]).sum();
        assert!((norm - 1.0).abs() < 1e-12);
    }

    #[test]
    fn input_matrix_is_not_mutated() {
        let matrix = DecisionMatrix::new(vec![vec![3.0], vec![4.0]]).unwrap();
        let before = matrix.clone();
        let _ = MatrixNormalizer::normalize(&matrix, &criteria(1)).unwrap();
        assert_eq!(matrix, before);
    }

    #[test]
    fn criteria_count_must_match_columns() {
        let matrix = DecisionMatrix::new(vec![vec![3.0, 1.0]]).unwrap();
        let err = MatrixNormalizer::normalize(&matrix, &criteria(3)).unwrap_err();
        assert_eq!(err, RankingError::shape_mismatch("criteria count", 2, 3));
    }
}
