//! Decision Matrix - raw alternative x criterion values.

use serde::{Deserialize, Serialize};

use super::RankingError;

/// Raw values, one row per alternative and one column per criterion.
///
/// Construction guarantees a rectangular shape with at least one row and one
/// column, and that every cell is finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct DecisionMatrix {
    rows: Vec<Vec<f64>>,
    criteria_count: usize,
}

impl DecisionMatrix {
    /// Validates and wraps raw rows.
    ///
    /// The column count is taken from the first row; every other row must
    /// match it.
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self, RankingError> {
        let criteria_count = rows.first().map(Vec::len).unwrap_or(0);
        Self::with_criteria_count(rows, criteria_count)
    }

    /// Validates rows against an externally declared criteria count.
    pub fn with_criteria_count(
        rows: Vec<Vec<f64>>,
        criteria_count: usize,
    ) -> Result<Self, RankingError> {
        if rows.is_empty() {
            return Err(RankingError::EmptyInput {
                what: "alternatives",
            });
        }
        if criteria_count == 0 {
            return Err(RankingError::EmptyInput { what: "criteria" });
        }

        for (row_index, row) in rows.iter().enumerate() {
            if row.len() != criteria_count {
                return Err(RankingError::shape_mismatch(
                    format!("decision matrix row {} columns", row_index),
                    criteria_count,
                    row.len(),
                ));
            }
            if let Some(column) = row.iter().position(|v| !v.is_finite()) {
                return Err(RankingError::NonFiniteValue {
                    row: row_index,
                    column,
                });
            }
        }

        Ok(Self {
            rows,
            criteria_count,
        })
    }

    /// Creates a builder for constructing a matrix row by row.
    pub fn builder() -> DecisionMatrixBuilder {
        DecisionMatrixBuilder::new()
    }

    /// Number of alternatives (rows).
    pub fn alternative_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of criteria (columns).
    pub fn criteria_count(&self) -> usize {
        self.criteria_count
    }

    /// Value for alternative `row` on criterion `column`.
    pub fn value(&self, row: usize, column: usize) -> f64 {
        self.rows[row][column]
    }

    /// All rows in input order.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Iterates one criterion column top to bottom.
    pub fn column(&self, column: usize) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(move |row| row[column])
    }
}

impl TryFrom<Vec<Vec<f64>>> for DecisionMatrix {
    type Error = RankingError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::new(rows)
    }
}

impl From<DecisionMatrix> for Vec<Vec<f64>> {
    fn from(matrix: DecisionMatrix) -> Self {
        matrix.rows
    }
}

/// Builder for DecisionMatrix.
#[derive(Debug, Default)]
pub struct DecisionMatrixBuilder {
    rows: Vec<Vec<f64>>,
}

impl DecisionMatrixBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one alternative's values.
    pub fn row(mut self, values: impl IntoIterator<Item = f64>) -> Self {
        self.rows.push(values.into_iter().collect());
        self
    }

    /// Builds and validates the matrix.
    pub fn build(self) -> Result<DecisionMatrix, RankingError> {
        DecisionMatrix::new(self.rows)
    }
}
