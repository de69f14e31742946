//! Closeness Ranker - TOPSIS ideal/anti-ideal distances and closeness coefficients.

use serde::{Deserialize, Serialize};

use super::{Alternative, Criterion, NormalizedMatrix, RankingError, WeightVector};

/// Coefficients closer than this are treated as tied and keep input order.
pub const TIE_TOLERANCE: f64 = 1e-9;

/// Coefficient assigned when an alternative sits on both reference points.
pub const NEUTRAL_COEFFICIENT: f64 = 0.5;

/// One alternative's position in the ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedEntry {
    /// Position of the alternative in the caller's input.
    pub index: usize,
    pub name: String,
    /// Relative closeness `d- / (d+ + d-)`, in `[0, 1]`.
    pub coefficient: f64,
    pub distance_to_ideal: f64,
    pub distance_to_anti_ideal: f64,
    /// Per-criterion share of the way from anti-ideal to ideal, in `[0, 1]`.
    pub attainment: Vec<f64>,
}

/// Alternatives ordered by coefficient, best first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedResult {
    pub entries: Vec<RankedEntry>,
}

impl RankedResult {
    /// The winner, if anything was ranked.
    pub fn top(&self) -> Option<&RankedEntry> {
        self.entries.first()
    }

    /// The last-placed alternative.
    pub fn bottom(&self) -> Option<&RankedEntry> {
        self.entries.last()
    }

    /// Coefficients in ranked (descending) order.
    pub fn scores(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.coefficient).collect()
    }

    /// Coefficients in the caller's input order.
    pub fn scores_in_input_order(&self) -> Vec<f64> {
        let mut scores = vec![0.0; self.entries.len()];
        for entry in &self.entries {
            scores[entry.index] = entry.coefficient;
        }
        scores
    }

    /// Number of ranked alternatives.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing was ranked.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// TOPSIS ranking functions.
pub struct ClosenessRanker;

impl ClosenessRanker {
    /// Ranks alternatives by relative closeness to the ideal solution.
    ///
    /// # Algorithm
    /// 1. `v_ij = w_j * r_ij`
    /// 2. Ideal: column max for benefit, column min for cost.
    ///    Anti-ideal: the opposite.
    /// 3. `d+`, `d-`: Euclidean distances to ideal and anti-ideal.
    /// 4. `C_i = d- / (d+ + d-)`
    /// 5. Sort descending; chained ties within [`TIE_TOLERANCE`] keep input order.
    ///
    /// # Edge Cases
    /// - `d+ + d- == 0`: `C_i = 0.5`
    /// - No alternatives: empty result
    pub fn rank(
        normalized: &NormalizedMatrix,
        weights: &WeightVector,
        criteria: &[Criterion],
        alternatives: &[Alternative],
    ) -> Result<RankedResult, RankingError> {
        let rows = normalized.alternative_count();
        if alternatives.len() != rows {
            return Err(RankingError::shape_mismatch(
                "alternative count",
                rows,
                alternatives.len(),
            ));
        }
        if rows == 0 {
            return Ok(RankedResult {
                entries: Vec::new(),
            });
        }

        let columns = normalized.criteria_count();
        if weights.len() != columns {
            return Err(RankingError::shape_mismatch("weight count", columns, weights.len()));
        }
        if criteria.len() != columns {
            return Err(RankingError::shape_mismatch(
                "criteria count",
                columns,
                criteria.len(),
            ));
        }

        let weighted: Vec<Vec<f64>> = normalized
            .values
            .iter()
            .map(|row| row.iter().enumerate().map(|(j, r)| r * weights.get(j)).collect())
            .collect();

        let (ideal, anti_ideal) = Self::reference_points(&weighted, criteria);

        let mut entries: Vec<RankedEntry> = weighted
            .iter()
            .zip(alternatives)
            .map(|(row, alternative)| {
                let distance_to_ideal = Self::distance(row, &ideal);
                let distance_to_anti_ideal = Self::distance(row, &anti_ideal);
                let total = distance_to_ideal + distance_to_anti_ideal;
                let coefficient = if total == 0.0 {
                    NEUTRAL_COEFFICIENT
                } else {
                    distance_to_anti_ideal / total
                };

                RankedEntry {
                    index: alternative.index,
                    name: alternative.name.clone(),
                    coefficient,
                    distance_to_ideal,
                    distance_to_anti_ideal,
                    attainment: Self::attainment(row, &ideal, &anti_ideal),
                }
            })
            .collect();

        Self::sort_with_stable_ties(&mut entries);

        Ok(RankedResult { entries })
    }

    /// Column-wise ideal and anti-ideal points of the weighted matrix.
    fn reference_points(weighted: &[Vec<f64>], criteria: &[Criterion]) -> (Vec<f64>, Vec<f64>) {
        criteria
            .iter()
            .enumerate()
            .map(|(j, criterion)| {
                let polarity = criterion.polarity;
                let mut column = weighted.iter().map(|row| row[j]);
                // Callers guarantee at least one row.
                let first = column.next().unwrap_or(0.0);
                column.fold((first, first), |(best, worst), v| {
                    (polarity.best_of(best, v), polarity.worst_of(worst, v))
                })
            })
            .unzip()
    }

    fn distance(row: &[f64], point: &[f64]) -> f64 {
        row.iter()
            .zip(point)
            .map(|(v, p)| (v - p).powi(2))
            .sum::<f64>()
            .sqrt()
    }

    fn attainment(row: &[f64], ideal: &[f64], anti_ideal: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(ideal.iter().zip(anti_ideal))
            .map(|(v, (best, worst))| {
                let span = best - worst;
                if span == 0.0 {
                    1.0
                } else {
                    ((v - worst) / span).clamp(0.0, 1.0)
                }
            })
            .collect()
    }

    /// Sorts descending by coefficient, then restores input order inside
    /// every run of neighbours that are pairwise-adjacent within
    /// [`TIE_TOLERANCE`]. Runs chain: `a ~ b` and `b ~ c` put all three in
    /// one run.
    fn sort_with_stable_ties(entries: &mut [RankedEntry]) {
        entries.sort_by(|a, b| b.coefficient.total_cmp(&a.coefficient));

        let mut start = 0;
        while start < entries.len() {
            let mut end = start + 1;
            while end < entries.len()
                && (entries[end - 1].coefficient - entries[end].coefficient).abs()
                    <= TIE_TOLERANCE
            {
                end += 1;
            }
            entries[start..end].sort_by_key(|e| e.index);
            start = end;
        }
    }
}
