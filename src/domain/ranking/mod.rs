//! Ranking Module - Pure domain services for multi-criteria forwarder ranking.
//!
//! # Components
//!
//! - `CriteriaWeighting` - AHP weights and consistency ratio from pairwise judgments
//! - `MatrixNormalizer` - Vector normalization of raw criterion columns
//! - `ClosenessRanker` - TOPSIS closeness coefficients and ordering
//! - `DecisionOrchestrator` - Validates a request and runs the pipeline
//! - `ExplanationFormatter` - Plain-language justification of results
//! - `GreyRelationalAnalyzer` - Grey relational grades reported next to the ranking
//! - `TrustAdjuster` / `DeliverySimulator` - Reliability feedback between rounds
//! - `AnomalyDetector` - Flags low reliability and frequent delays
//!
//! # Design Philosophy
//!
//! All functions are pure and stateless. Every evaluation allocates its own
//! matrices and returns a fresh result; nothing is cached between calls.

mod anomaly;
mod closeness_ranker;
mod criteria_weighting;
mod criterion;
mod decision_matrix;
mod errors;
mod explanation;
mod grey_relation;
mod matrix_normalizer;
mod orchestrator;
mod pairwise_matrix;
mod simulation;
mod trust;

pub use anomaly::{
    Anomaly, AnomalyDetector, AnomalyKind, HIGH_DELAY_RATE_THRESHOLD, LOW_RELIABILITY_THRESHOLD,
};
pub use closeness_ranker::{
    ClosenessRanker, RankedEntry, RankedResult, NEUTRAL_COEFFICIENT, TIE_TOLERANCE,
};
pub use criteria_weighting::{
    CriteriaWeighting, WeightDerivation, WeightVector, CONSISTENCY_THRESHOLD,
    WEIGHT_SUM_TOLERANCE,
};
pub use criterion::{Alternative, Criterion};
pub use decision_matrix::{DecisionMatrix, DecisionMatrixBuilder};
pub use errors::{RankingError, RankingWarning};
pub use explanation::{
    CriterionFigure, Explanation, ExplanationFormatter, Proximity, SpreadClass, FORMULA_USED,
    MODERATE_PROXIMITY, MODERATE_SPREAD_PERCENT, NEARLY_IDENTICAL_DELTA, SIGNIFICANT_PROXIMITY,
    SIGNIFICANT_SPREAD_PERCENT,
};
pub use grey_relation::{GreyRelationalAnalyzer, GREY_DISTINGUISHING_COEFFICIENT};
pub use matrix_normalizer::{MatrixNormalizer, NormalizedMatrix, DEGENERATE_EPSILON};
pub use orchestrator::{
    DecisionOrchestrator, DecisionRequest, DecisionResult, EngineSettings, TopAlternative,
    MAX_RECIPROCITY_TOLERANCE,
};
pub use pairwise_matrix::{PairwiseComparisonMatrix, DEFAULT_RECIPROCITY_TOLERANCE};
pub use simulation::{
    DeliverySimulator, ForwarderProfile, SimulationOutcome, MAX_DELIVERY_DAYS, MIN_DELIVERY_DAYS,
};
pub use trust::{TrustAdjuster, TRUST_PENALTY_PER_UNIT};
