//! Integration tests for end-to-end ranking evaluations.
//!
//! Drives the public API the way a caller would: build a `DecisionRequest`,
//! evaluate it through the orchestrator or the application handler, and
//! check ordering, coefficients, warnings and explanation wording.

use forwarder_ranking::application::{EvaluateRankingCommand, EvaluateRankingHandler};
use forwarder_ranking::domain::foundation::Polarity;
use forwarder_ranking::domain::ranking::{
    CriteriaWeighting, DecisionOrchestrator, DecisionRequest, ExplanationFormatter,
    PairwiseComparisonMatrix, RankingError, RankingWarning,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() < tolerance,
        "expected {expected}, got {actual}"
    );
}

fn equal_weights(n: usize) -> Vec<Vec<f64>> {
    vec![vec![1.0; n]; n]
}

/// Cost, delivery score and reliability for three forwarders.
fn forwarder_request() -> DecisionRequest {
    DecisionRequest::new(
        vec![
            vec![200.0, 5.0, 0.9],
            vec![150.0, 7.0, 0.8],
            vec![300.0, 3.0, 0.95],
        ],
        equal_weights(3),
        vec![Polarity::Cost, Polarity::Benefit, Polarity::Benefit],
    )
    .with_alternative_names(["Kenya Airways", "AGL", "Siginon"])
    .with_criteria_names(["Cost", "Delivery", "Reliability"])
}

fn ordering(request: &DecisionRequest) -> Vec<usize> {
    DecisionOrchestrator::default()
        .evaluate(request)
        .unwrap()
        .rankings
        .iter()
        .map(|entry| entry.index)
        .collect()
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn three_forwarders_rank_in_reference_order() {
    let result = DecisionOrchestrator::default()
        .evaluate(&forwarder_request())
        .unwrap();

    assert_eq!(ordering(&forwarder_request()), vec![1, 0, 2]);
    assert_eq!(result.top_alternative.name, "AGL");

    assert_close(result.all_scores[0], 0.8564255, 1e-6);
    assert_close(result.all_scores[1], 0.5727929, 1e-6);
    assert_close(result.all_scores[2], 0.1435745, 1e-6);

    assert_close(result.raw_topsis_scores[0], 0.5727929, 1e-6);
    assert_close(result.raw_topsis_scores[1], 0.8564255, 1e-6);
    assert_close(result.raw_topsis_scores[2], 0.1435745, 1e-6);

    assert!(result.warnings.is_empty());
    assert_close(result.consistency_ratio, 0.0, 1e-12);
}

#[test]
fn lower_cost_wins_on_cost_criterion() {
    let request = DecisionRequest::new(
        vec![vec![10.0], vec![100.0]],
        equal_weights(1),
        vec![Polarity::Cost],
    );

    let result = DecisionOrchestrator::default().evaluate(&request).unwrap();

    assert_eq!(result.top_alternative.index, 0);
    assert_close(result.raw_topsis_scores[0], 1.0, 1e-12);
    assert_close(result.raw_topsis_scores[1], 0.0, 1e-12);
}

#[test]
fn higher_value_wins_on_benefit_criterion() {
    let request = DecisionRequest::new(
        vec![vec![10.0], vec![100.0]],
        equal_weights(1),
        vec![Polarity::Benefit],
    );

    let result = DecisionOrchestrator::default().evaluate(&request).unwrap();

    assert_eq!(result.top_alternative.index, 1);
}

#[test]
fn repeated_evaluation_is_deterministic() {
    let orchestrator = DecisionOrchestrator::default();

    let first = orchestrator.evaluate(&forwarder_request()).unwrap();
    let second = orchestrator.evaluate(&forwarder_request()).unwrap();

    assert_eq!(first.rankings, second.rankings);
    assert_eq!(first.all_scores, second.all_scores);
    assert_eq!(first.weights, second.weights);
    assert_ne!(first.evaluation_id, second.evaluation_id);
}

#[test]
fn single_forwarder_scores_one() {
    let request = DecisionRequest::new(
        vec![vec![200.0, 5.0, 0.9]],
        equal_weights(3),
        vec![Polarity::Cost, Polarity::Benefit, Polarity::Benefit],
    );

    let result = DecisionOrchestrator::default().evaluate(&request).unwrap();

    assert_eq!(result.all_scores, vec![1.0]);
    assert_eq!(result.top_alternative.name, "Option 1");
}

#[test]
fn tied_forwarders_keep_input_order() {
    // Rows 0 and 2 are identical, names included.
    let request = DecisionRequest::new(
        vec![vec![1.0, 2.0], vec![2.0, 1.0], vec![1.0, 2.0]],
        equal_weights(2),
        vec![Polarity::Benefit, Polarity::Benefit],
    )
    .with_alternative_names(["Same", "Other", "Same"]);

    let result = DecisionOrchestrator::default().evaluate(&request).unwrap();

    assert!((result.raw_topsis_scores[0] - result.raw_topsis_scores[2]).abs() < 1e-9);
    let order: Vec<(usize, &str)> = result
        .rankings
        .iter()
        .map(|entry| (entry.index, entry.name.as_str()))
        .collect();
    assert_eq!(order, vec![(1, "Other"), (0, "Same"), (2, "Same")]);
}

#[test]
fn identical_forwarders_are_neutral_and_flagged() {
    let request = DecisionRequest::new(
        vec![vec![5.0, 7.0], vec![5.0, 7.0], vec![5.0, 7.0]],
        equal_weights(2),
        vec![Polarity::Cost, Polarity::Benefit],
    );

    let result = DecisionOrchestrator::default().evaluate(&request).unwrap();

    assert_eq!(result.all_scores, vec![0.5, 0.5, 0.5]);
    assert_eq!(
        result
            .rankings
            .iter()
            .map(|e| e.index)
            .collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
    let degenerate = result
        .warnings
        .iter()
        .filter(|w| matches!(w, RankingWarning::DegenerateColumn { .. }))
        .count();
    assert_eq!(degenerate, 2);
}

#[test]
fn non_reciprocal_judgments_are_rejected() {
    let mut request = forwarder_request();
    request.pairwise_matrix = vec![
        vec![1.0, 3.0, 1.0],
        vec![3.0, 1.0, 1.0],
        vec![1.0, 1.0, 1.0],
    ];

    let err = DecisionOrchestrator::default()
        .evaluate(&request)
        .unwrap_err();

    assert!(matches!(err, RankingError::InvalidMatrix { .. }));
    assert!(err.to_string().contains("not reciprocal"));
}

#[test]
fn inconsistent_judgments_still_rank_with_warning() {
    let mut request = forwarder_request();
    request.pairwise_matrix = vec![
        vec![1.0, 9.0, 1.0 / 9.0],
        vec![1.0 / 9.0, 1.0, 9.0],
        vec![9.0, 1.0 / 9.0, 1.0],
    ];

    let result = DecisionOrchestrator::default().evaluate(&request).unwrap();

    assert!(result.consistency_ratio > 0.1);
    assert!(result
        .warnings
        .iter()
        .any(|w| matches!(w, RankingWarning::InconsistentJudgments { .. })));
    assert_eq!(result.rankings.len(), 3);
}

#[test]
fn saaty_judgments_produce_reference_weights() {
    let matrix = PairwiseComparisonMatrix::new(vec![
        vec![1.0, 3.0, 5.0],
        vec![1.0 / 3.0, 1.0, 3.0],
        vec![1.0 / 5.0, 1.0 / 3.0, 1.0],
    ])
    .unwrap();

    let derivation = CriteriaWeighting::derive_weights(&matrix);

    assert_close(derivation.weights.get(0), 0.633346, 1e-5);
    assert_close(derivation.weights.get(1), 0.260498, 1e-5);
    assert_close(derivation.weights.get(2), 0.106156, 1e-5);
    assert_close(derivation.consistency_ratio, 0.033375, 1e-5);
}

// =============================================================================
// Explanations
// =============================================================================

#[test]
fn wide_spread_is_described_as_significant() {
    let result = DecisionOrchestrator::default()
        .evaluate(&forwarder_request())
        .unwrap();

    let summary = ExplanationFormatter::summarize(&result);

    assert!(summary.starts_with("Analysis of 3 freight forwarders shows AGL leading"));
    assert!(summary.contains("significant difference"));
}

#[test]
fn flat_spread_is_described_as_minor() {
    let request = DecisionRequest::new(
        vec![vec![5.0], vec![5.0]],
        equal_weights(1),
        vec![Polarity::Benefit],
    );
    let result = DecisionOrchestrator::default().evaluate(&request).unwrap();

    let summary = ExplanationFormatter::summarize(&result);

    assert!(summary.contains("minor difference"));
}

#[test]
fn handler_explains_every_forwarder_best_first() {
    let handler = EvaluateRankingHandler::default();

    let outcome = handler
        .handle(EvaluateRankingCommand::new(forwarder_request()).with_explanations())
        .unwrap();

    assert_eq!(outcome.explanations.len(), 3);
    assert_eq!(outcome.explanations[0].alternative, "AGL");
    assert!(outcome.explanations[0]
        .detailed_reasoning
        .starts_with("AGL achieved a closeness coefficient of 85.6%"));
    assert!(outcome.explanations[0]
        .detailed_reasoning
        .contains("significantly closer to the ideal solution"));
}

#[test]
fn result_serializes_with_camel_case_fields() {
    let result = DecisionOrchestrator::default()
        .evaluate(&forwarder_request())
        .unwrap();

    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["topAlternative"]["name"], "AGL");
    assert!(json["allScores"].is_array());
    assert!(json["rawTopsisScores"].is_array());
    assert!(json["consistencyRatio"].is_number());
    assert!(json["executionTime"].is_number());
}
