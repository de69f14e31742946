//! Decision Orchestrator - the single entry point for ranking evaluations.
//!
//! Wires weighting, normalization and ranking together and turns loosely
//! shaped caller input into validated domain values exactly once.

use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::domain::foundation::{EvaluationId, Polarity, Timestamp, ValidationError};

use super::{
    Alternative, ClosenessRanker, CriteriaWeighting, Criterion, DecisionMatrix,
    GreyRelationalAnalyzer, MatrixNormalizer,
    PairwiseComparisonMatrix, RankedEntry, RankedResult, RankingError, RankingWarning,
    WeightVector, CONSISTENCY_THRESHOLD, DEFAULT_RECIPROCITY_TOLERANCE,
};

/// Largest accepted reciprocity tolerance.
pub const MAX_RECIPROCITY_TOLERANCE: f64 = 0.1;

/// Caller-supplied evaluation input, as it arrives on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionRequest {
    pub decision_matrix: Vec<Vec<f64>>,
    pub pairwise_matrix: Vec<Vec<f64>>,
    pub criteria_types: Vec<Polarity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternative_names: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criteria_names: Option<Vec<String>>,
}

impl DecisionRequest {
    /// Creates a request without display names.
    pub fn new(
        decision_matrix: Vec<Vec<f64>>,
        pairwise_matrix: Vec<Vec<f64>>,
        criteria_types: Vec<Polarity>,
    ) -> Self {
        Self {
            decision_matrix,
            pairwise_matrix,
            criteria_types,
            alternative_names: None,
            criteria_names: None,
        }
    }

    /// Attaches alternative display names.
    pub fn with_alternative_names<S: Into<String>>(
        mut self,
        names: impl IntoIterator<Item = S>,
    ) -> Self {
        self.alternative_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Attaches criterion display names.
    pub fn with_criteria_names<S: Into<String>>(
        mut self,
        names: impl IntoIterator<Item = S>,
    ) -> Self {
        self.criteria_names = Some(names.into_iter().map(Into::into).collect());
        self
    }
}

/// The winning alternative, singled out for convenience.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopAlternative {
    pub index: usize,
    pub name: String,
    pub score: f64,
}

/// Evaluation output.
///
/// Everything except `evaluation_id`, `execution_time_ms` and `evaluated_at`
/// is a pure function of the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionResult {
    pub evaluation_id: EvaluationId,
    pub top_alternative: TopAlternative,
    /// Coefficients in ranked (descending) order.
    pub all_scores: Vec<f64>,
    pub rankings: Vec<RankedEntry>,
    /// Coefficients in the caller's input order.
    pub raw_topsis_scores: Vec<f64>,
    /// Grey relational grades in the caller's input order. Informational
    /// only; the ranking uses the closeness coefficient alone.
    pub grey_grades: Vec<f64>,
    pub criteria: Vec<Criterion>,
    pub weights: WeightVector,
    pub consistency_ratio: f64,
    pub warnings: Vec<RankingWarning>,
    #[serde(rename = "executionTime")]
    pub execution_time_ms: f64,
    pub evaluated_at: Timestamp,
}

impl DecisionResult {
    /// Ranked entries as a [`RankedResult`].
    pub fn ranked(&self) -> RankedResult {
        RankedResult {
            entries: self.rankings.clone(),
        }
    }

    /// Returns true if any warning was raised.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Tunable tolerances for evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineSettings {
    reciprocity_tolerance: f64,
    consistency_threshold: f64,
}

impl EngineSettings {
    /// Creates validated settings.
    pub fn new(
        reciprocity_tolerance: f64,
        consistency_threshold: f64,
    ) -> Result<Self, ValidationError> {
        if !(reciprocity_tolerance > 0.0 && reciprocity_tolerance <= MAX_RECIPROCITY_TOLERANCE) {
            return Err(ValidationError::out_of_range(
                "reciprocity_tolerance",
                0.0,
                MAX_RECIPROCITY_TOLERANCE,
                reciprocity_tolerance,
            ));
        }
        if !(consistency_threshold > 0.0 && consistency_threshold <= 1.0) {
            return Err(ValidationError::out_of_range(
                "consistency_threshold",
                0.0,
                1.0,
                consistency_threshold,
            ));
        }
        Ok(Self {
            reciprocity_tolerance,
            consistency_threshold,
        })
    }

    pub fn reciprocity_tolerance(&self) -> f64 {
        self.reciprocity_tolerance
    }

    pub fn consistency_threshold(&self) -> f64 {
        self.consistency_threshold
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            reciprocity_tolerance: DEFAULT_RECIPROCITY_TOLERANCE,
            consistency_threshold: CONSISTENCY_THRESHOLD,
        }
    }
}

/// Validated evaluation input.
struct EvaluationInput {
    alternatives: Vec<Alternative>,
    criteria: Vec<Criterion>,
    matrix: DecisionMatrix,
    pairwise: PairwiseComparisonMatrix,
}

/// Stateless evaluation pipeline.
///
/// Holds only immutable settings, so one instance can serve concurrent
/// callers.
#[derive(Debug, Clone, Default)]
pub struct DecisionOrchestrator {
    settings: EngineSettings,
}

impl DecisionOrchestrator {
    /// Creates an orchestrator with explicit settings.
    pub fn new(settings: EngineSettings) -> Self {
        Self { settings }
    }

    /// Active settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Evaluates a request end to end.
    ///
    /// # Edge Cases
    /// - Zero alternatives or criteria: `EmptyInput`
    /// - One alternative: coefficient 1.0, no distances computed
    /// - One criterion: weight 1.0, direct comparison of that column
    /// - Zero-variance column: `DegenerateColumn` warning, ranking continues
    /// - Consistency ratio above threshold: `InconsistentJudgments` warning
    pub fn evaluate(&self, request: &DecisionRequest) -> Result<DecisionResult, RankingError> {
        let started = Instant::now();

        let input = self.validate(request)?;
        let derivation = CriteriaWeighting::derive_weights(&input.pairwise);

        let mut warnings = Vec::new();
        if !derivation.is_consistent(self.settings.consistency_threshold) {
            warnings.push(RankingWarning::InconsistentJudgments {
                consistency_ratio: derivation.consistency_ratio,
                threshold: self.settings.consistency_threshold,
            });
        }

        let (ranked, grey_grades) = if input.alternatives.len() == 1 {
            (Self::sole_winner(&input), vec![1.0])
        } else {
            let normalized = MatrixNormalizer::normalize(&input.matrix, &input.criteria)?;
            warnings.extend(normalized.degenerate_columns.iter().map(|&j| {
                RankingWarning::DegenerateColumn {
                    criterion_index: j,
                    criterion_name: input.criteria[j].name.clone(),
                }
            }));
            let ranked = ClosenessRanker::rank(
                &normalized,
                &derivation.weights,
                &input.criteria,
                &input.alternatives,
            )?;
            let grades = GreyRelationalAnalyzer::grades(&normalized, &input.criteria)?;
            (ranked, grades)
        };

        let top = ranked.top().ok_or(RankingError::EmptyInput {
            what: "alternatives",
        })?;
        let top_alternative = TopAlternative {
            index: top.index,
            name: top.name.clone(),
            score: top.coefficient,
        };

        Ok(DecisionResult {
            evaluation_id: EvaluationId::new(),
            top_alternative,
            all_scores: ranked.scores(),
            raw_topsis_scores: ranked.scores_in_input_order(),
            grey_grades,
            rankings: ranked.entries,
            criteria: input.criteria,
            weights: derivation.weights,
            consistency_ratio: derivation.consistency_ratio,
            warnings,
            execution_time_ms: started.elapsed().as_secs_f64() * 1000.0,
            evaluated_at: Timestamp::now(),
        })
    }

    /// Checks every dimension and builds domain values.
    fn validate(&self, request: &DecisionRequest) -> Result<EvaluationInput, RankingError> {
        let alternative_count = request.decision_matrix.len();
        let criteria_count = request.criteria_types.len();

        if alternative_count == 0 {
            return Err(RankingError::EmptyInput {
                what: "alternatives",
            });
        }
        if criteria_count == 0 {
            return Err(RankingError::EmptyInput { what: "criteria" });
        }

        let alternative_names = match &request.alternative_names {
            Some(names) if names.len() != alternative_count => {
                return Err(RankingError::shape_mismatch(
                    "decision matrix rows",
                    names.len(),
                    alternative_count,
                ));
            }
            Some(names) => names.clone(),
            None => (0..alternative_count).map(Alternative::default_name).collect(),
        };

        let criteria_names = match &request.criteria_names {
            Some(names) if names.len() != criteria_count => {
                return Err(RankingError::shape_mismatch(
                    "criteria names",
                    criteria_count,
                    names.len(),
                ));
            }
            Some(names) => names.clone(),
            None => (0..criteria_count).map(Criterion::default_name).collect(),
        };

        if request.pairwise_matrix.len() != criteria_count {
            return Err(RankingError::shape_mismatch(
                "pairwise matrix rows",
                criteria_count,
                request.pairwise_matrix.len(),
            ));
        }

        let matrix =
            DecisionMatrix::with_criteria_count(request.decision_matrix.clone(), criteria_count)?;
        let pairwise = PairwiseComparisonMatrix::with_tolerance(
            request.pairwise_matrix.clone(),
            self.settings.reciprocity_tolerance,
        )?;

        let alternatives = alternative_names
            .into_iter()
            .enumerate()
            .map(|(index, name)| Alternative::new(index, name))
            .collect();
        let criteria = criteria_names
            .into_iter()
            .zip(&request.criteria_types)
            .map(|(name, polarity)| Criterion::new(name, *polarity))
            .collect();

        Ok(EvaluationInput {
            alternatives,
            criteria,
            matrix,
            pairwise,
        })
    }

    /// A lone alternative wins outright.
    fn sole_winner(input: &EvaluationInput) -> RankedResult {
        let alternative = &input.alternatives[0];
        RankedResult {
            entries: vec![RankedEntry {
                index: alternative.index,
                name: alternative.name.clone(),
                coefficient: 1.0,
                distance_to_ideal: 0.0,
                distance_to_anti_ideal: 0.0,
                attainment: vec![1.0; input.criteria.len()],
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn equal_weights(n: usize) -> Vec<Vec<f64>> {
        vec![vec![1.0; n]; n]
    }

    fn three_forwarders() -> DecisionRequest {
        DecisionRequest::new(
            vec![
                vec![200.0, 5.0, 0.9],
                vec![150.0, 7.0, 0.8],
                vec![300.0, 3.0, 0.95],
            ],
            equal_weights(3),
            vec![Polarity::Cost, Polarity::Benefit, Polarity::Benefit],
        )
        .with_alternative_names(["Kuehne Nagel", "Scan Global", "DHL Express"])
        .with_criteria_names(["cost", "time", "reliability"])
    }

    #[test]
    fn evaluates_three_by_three_scenario() {
        let result = DecisionOrchestrator::default()
            .evaluate(&three_forwarders())
            .unwrap();

        let order: Vec<usize> = result.rankings.iter().map(|e| e.index).collect();
        assert_eq!(order, vec![1, 0, 2]);
        assert_eq!(result.top_alternative.name, "Scan Global");
        assert!((result.all_scores[0] - 0.856425).abs() < 1e-5);
        assert!((result.all_scores[1] - 0.572793).abs() < 1e-5);
        assert!((result.all_scores[2] - 0.143575).abs() < 1e-5);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn raw_scores_follow_input_order() {
        let result = DecisionOrchestrator::default()
            .evaluate(&three_forwarders())
            .unwrap();

        assert_eq!(result.raw_topsis_scores[1], result.all_scores[0]);
        assert_eq!(result.raw_topsis_scores[0], result.all_scores[1]);
        assert_eq!(result.raw_topsis_scores[2], result.all_scores[2]);
    }

    #[test]
    fn single_alternative_scores_one() {
        let request = DecisionRequest::new(
            vec![vec![999.0, 0.0]],
            equal_weights(2),
            vec![Polarity::Cost, Polarity::Benefit],
        );
        let result = DecisionOrchestrator::default().evaluate(&request).unwrap();

        assert_eq!(result.all_scores, vec![1.0]);
        assert_eq!(result.top_alternative.index, 0);
        assert_eq!(result.top_alternative.name, "Option 1");
        assert!(result.warnings.is_empty());
        assert_eq!(result.grey_grades, vec![1.0]);
    }

    #[test]
    fn grey_grades_are_reported_without_changing_order() {
        let result = DecisionOrchestrator::default()
            .evaluate(&three_forwarders())
            .unwrap();

        assert_eq!(result.grey_grades.len(), 3);
        assert!((result.grey_grades[0] - 0.667441).abs() < 1e-5);
        assert!((result.grey_grades[1] - 0.897269).abs() < 1e-5);
        assert!((result.grey_grades[2] - 0.565669).abs() < 1e-5);
        assert_eq!(result.top_alternative.index, 1);
    }

    #[test]
    fn extreme_magnitude_cost_column_still_ranks() {
        let request = DecisionRequest::new(
            vec![vec![1e200, 3.0], vec![2e200, 3.0]],
            equal_weights(2),
            vec![Polarity::Cost, Polarity::Benefit],
        );
        let result = DecisionOrchestrator::default().evaluate(&request).unwrap();

        assert_eq!(result.top_alternative.index, 0);
        assert!(result.raw_topsis_scores[0] > result.raw_topsis_scores[1]);
        assert_eq!(
            result.warnings,
            vec![RankingWarning::DegenerateColumn {
                criterion_index: 1,
                criterion_name: "Criterion 2".to_string(),
            }]
        );
    }

    #[test]
    fn tiny_distinct_benefit_values_still_rank() {
        let request = DecisionRequest::new(
            vec![vec![1e-13], vec![5e-13]],
            equal_weights(1),
            vec![Polarity::Benefit],
        );
        let result = DecisionOrchestrator::default().evaluate(&request).unwrap();

        assert_eq!(result.top_alternative.index, 1);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn single_criterion_has_unit_weight() {
        let request = DecisionRequest::new(
            vec![vec![10.0], vec![100.0]],
            equal_weights(1),
            vec![Polarity::Cost],
        );
        let result = DecisionOrchestrator::default().evaluate(&request).unwrap();

        assert_eq!(result.weights.as_slice(), &[1.0]);
        assert_eq!(result.top_alternative.index, 0);
    }

    #[test]
    fn empty_alternatives_are_rejected() {
        let request = DecisionRequest::new(Vec::new(), equal_weights(1), vec![Polarity::Cost]);
        let err = DecisionOrchestrator::default().evaluate(&request).unwrap_err();
        assert_eq!(
            err,
            RankingError::EmptyInput {
                what: "alternatives"
            }
        );
    }

    #[test]
    fn empty_criteria_are_rejected() {
        let request = DecisionRequest::new(vec![vec![]], Vec::new(), Vec::new());
        let err = DecisionOrchestrator::default().evaluate(&request).unwrap_err();
        assert_eq!(err, RankingError::EmptyInput { what: "criteria" });
    }

    #[test]
    fn pairwise_size_mismatch_names_dimensions() {
        let request = DecisionRequest::new(
            vec![vec![1.0, 2.0, 3.0]],
            equal_weights(5),
            vec![Polarity::Cost, Polarity::Benefit, Polarity::Benefit],
        );
        let err = DecisionOrchestrator::default().evaluate(&request).unwrap_err();
        assert_eq!(err.to_string(), "pairwise matrix rows mismatch: expected 3, got 5");
    }

    #[test]
    fn alternative_name_count_must_match_rows() {
        let request = three_forwarders().with_alternative_names(["A", "B"]);
        let err = DecisionOrchestrator::default().evaluate(&request).unwrap_err();
        assert_eq!(err, RankingError::shape_mismatch("decision matrix rows", 2, 3));
    }

    #[test]
    fn criteria_name_count_must_match_types() {
        let request = three_forwarders().with_criteria_names(["cost"]);
        let err = DecisionOrchestrator::default().evaluate(&request).unwrap_err();
        assert_eq!(err, RankingError::shape_mismatch("criteria names", 3, 1));
    }

    #[test]
    fn row_width_must_match_criteria() {
        let mut request = three_forwarders();
        request.decision_matrix[2].pop();
        let err = DecisionOrchestrator::default().evaluate(&request).unwrap_err();
        assert!(matches!(err, RankingError::ShapeMismatch { expected: 3, actual: 2, .. }));
    }

    #[test]
    fn non_reciprocal_pairwise_is_rejected() {
        let mut request = three_forwarders();
        request.pairwise_matrix[0][1] = 3.0;
        let err = DecisionOrchestrator::default().evaluate(&request).unwrap_err();
        assert!(matches!(err, RankingError::InvalidMatrix { .. }));
    }

    #[test]
    fn degenerate_column_is_reported_not_fatal() {
        let request = DecisionRequest::new(
            vec![vec![10.0, 0.9], vec![20.0, 0.9]],
            equal_weights(2),
            vec![Polarity::Cost, Polarity::Benefit],
        )
        .with_criteria_names(["cost", "reliability"]);
        let result = DecisionOrchestrator::default().evaluate(&request).unwrap();

        assert_eq!(
            result.warnings,
            vec![RankingWarning::DegenerateColumn {
                criterion_index: 1,
                criterion_name: "reliability".to_string(),
            }]
        );
        assert_eq!(result.top_alternative.index, 0);
    }

    #[test]
    fn inconsistent_judgments_are_reported_not_fatal() {
        let mut request = three_forwarders();
        request.pairwise_matrix = vec![
            vec![1.0, 9.0, 1.0 / 9.0],
            vec![1.0 / 9.0, 1.0, 9.0],
            vec![9.0, 1.0 / 9.0, 1.0],
        ];
        let result = DecisionOrchestrator::default().evaluate(&request).unwrap();

        assert!(result.consistency_ratio > CONSISTENCY_THRESHOLD);
        assert!(matches!(
            result.warnings[0],
            RankingWarning::InconsistentJudgments { .. }
        ));
    }

    #[test]
    fn settings_reject_out_of_range_values() {
        assert!(EngineSettings::new(0.0, 0.1).is_err());
        assert!(EngineSettings::new(1e-6, 0.0).is_err());
        assert!(EngineSettings::new(0.5, 0.1).is_err());
        assert!(EngineSettings::new(1e-6, f64::NAN).is_err());
        assert!(EngineSettings::new(1e-3, 0.2).is_ok());
    }

    #[test]
    fn loose_tolerance_accepts_rounded_judgments() {
        let mut request = three_forwarders();
        request.pairwise_matrix = vec![
            vec![1.0, 3.0, 5.0],
            vec![0.33, 1.0, 3.0],
            vec![0.2, 0.33, 1.0],
        ];

        assert!(DecisionOrchestrator::default().evaluate(&request).is_err());

        let settings = EngineSettings::new(0.02, CONSISTENCY_THRESHOLD).unwrap();
        assert!(DecisionOrchestrator::new(settings).evaluate(&request).is_ok());
    }

    #[test]
    fn request_deserializes_from_camel_case_json() {
        let json = r#"{
            "decisionMatrix": [[10.0], [100.0]],
            "pairwiseMatrix": [[1.0]],
            "criteriaTypes": ["cost"],
            "alternativeNames": ["Cheap", "Pricey"]
        }"#;
        let request: DecisionRequest = serde_json::from_str(json).unwrap();
        let result = DecisionOrchestrator::default().evaluate(&request).unwrap();

        assert_eq!(result.top_alternative.name, "Cheap");
        assert!(request.criteria_names.is_none());
    }

    #[test]
    fn result_serializes_execution_time_field() {
        let result = DecisionOrchestrator::default()
            .evaluate(&three_forwarders())
            .unwrap();
        let json = serde_json::to_value(&result).unwrap();

        assert!(json["executionTime"].is_number());
        assert_eq!(json["topAlternative"]["index"], 1);
        assert_eq!(json["allScores"].as_array().unwrap().len(), 3);
    }
}
