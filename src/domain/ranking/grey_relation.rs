//! Grey Relational Analysis - secondary similarity grades reported alongside
//! the closeness ranking.
//!
//! Grades never influence the ordering; they give callers a second view of how
//! close each alternative is to the best observed values.

use super::{Criterion, NormalizedMatrix, RankingError};

/// Distinguishing coefficient (zeta) in the grey relational coefficient.
pub const GREY_DISTINGUISHING_COEFFICIENT: f64 = 0.5;

/// Grey relational functions.
pub struct GreyRelationalAnalyzer;

impl GreyRelationalAnalyzer {
    /// Grey relational grade of every alternative, in input order.
    ///
    /// # Algorithm
    /// 1. Reference series: best normalized value per column (max for
    ///    benefit, min for cost).
    /// 2. `delta_ij = |r_ij - ref_j|`, with global `delta_min`, `delta_max`.
    /// 3. `xi_ij = (delta_min + zeta * delta_max) / (delta_ij + zeta * delta_max)`
    /// 4. Grade = unweighted mean of `xi_ij` over criteria.
    ///
    /// # Edge Cases
    /// - Every alternative equals the reference (`delta_max == 0`): all grades 1.0
    /// - No alternatives: empty vector
    pub fn grades(
        normalized: &NormalizedMatrix,
        criteria: &[Criterion],
    ) -> Result<Vec<f64>, RankingError> {
        let columns = normalized.criteria_count();
        if normalized.alternative_count() == 0 {
            return Ok(Vec::new());
        }
        if criteria.len() != columns {
            return Err(RankingError::shape_mismatch(
                "criteria count",
                columns,
                criteria.len(),
            ));
        }

        let reference: Vec<f64> = criteria
            .iter()
            .enumerate()
            .map(|(j, criterion)| {
                normalized
                    .values
                    .iter()
                    .map(|row| row[j])
                    .reduce(|a, b| criterion.polarity.best_of(a, b))
                    .unwrap_or(0.0)
            })
            .collect();

        let deltas: Vec<Vec<f64>> = normalized
            .values
            .iter()
            .map(|row| row.iter().zip(&reference).map(|(r, best)| (r - best).abs()).collect())
            .collect();

        let (delta_min, delta_max) = deltas
            .iter()
            .flatten()
            .fold((f64::INFINITY, 0.0_f64), |(lo, hi), &d| (lo.min(d), hi.max(d)));

        if delta_max == 0.0 {
            return Ok(vec![1.0; deltas.len()]);
        }

        let spread = GREY_DISTINGUISHING_COEFFICIENT * delta_max;
        Ok(deltas
            .iter()
            .map(|row| {
                row.iter()
                    .map(|d| (delta_min + spread) / (d + spread))
                    .sum::<f64>()
                    / columns as f64
            })
            .collect())
    }
}
