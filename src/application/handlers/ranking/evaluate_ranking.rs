//! EvaluateRankingHandler - Command handler for ranking evaluations.
//!
//! Runs a request through the `DecisionOrchestrator`, logs the outcome and
//! attaches the plain-language summary (plus per-alternative explanations when
//! asked for).

use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::ranking::{
    DecisionOrchestrator, DecisionRequest, DecisionResult, EngineSettings, Explanation,
    ExplanationFormatter, RankingError,
};

/// Command to evaluate a ranking request.
#[derive(Debug, Clone)]
pub struct EvaluateRankingCommand {
    /// The request to evaluate.
    pub request: DecisionRequest,
    /// Whether to build an explanation for every ranked alternative.
    pub include_explanations: bool,
}

impl EvaluateRankingCommand {
    pub fn new(request: DecisionRequest) -> Self {
        Self {
            request,
            include_explanations: false,
        }
    }

    pub fn with_explanations(mut self) -> Self {
        self.include_explanations = true;
        self
    }
}

/// Result of a successful evaluation.
#[derive(Debug, Clone)]
pub struct EvaluateRankingResult {
    /// The engine output.
    pub result: DecisionResult,
    /// One-paragraph summary of the ranking.
    pub summary: String,
    /// Explanations in ranked order; empty unless requested.
    pub explanations: Vec<Explanation>,
}

/// Error type for ranking evaluation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluateRankingError {
    /// The request failed validation.
    #[error(transparent)]
    Rejected(#[from] RankingError),
}

impl EvaluateRankingError {
    /// Message suitable for showing to the person who submitted the request.
    pub fn user_message(&self) -> String {
        format!("Could not compute ranking: {}", self)
    }

    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            EvaluateRankingError::Rejected(err) => err.code(),
        }
    }
}

/// Handler for ranking evaluations.
#[derive(Debug, Clone, Default)]
pub struct EvaluateRankingHandler {
    orchestrator: DecisionOrchestrator,
}

impl EvaluateRankingHandler {
    pub fn new(orchestrator: DecisionOrchestrator) -> Self {
        Self { orchestrator }
    }

    /// Creates a handler whose orchestrator uses `settings`.
    pub fn with_settings(settings: EngineSettings) -> Self {
        Self::new(DecisionOrchestrator::new(settings))
    }

    pub fn handle(
        &self,
        cmd: EvaluateRankingCommand,
    ) -> Result<EvaluateRankingResult, EvaluateRankingError> {
        let result = match self.orchestrator.evaluate(&cmd.request) {
            Ok(result) => result,
            Err(err) => {
                warn!(
                    code = err.code(),
                    error = %err,
                    "Ranking request rejected"
                );
                return Err(err.into());
            }
        };

        for warning in &result.warnings {
            warn!(
                evaluation_id = %result.evaluation_id,
                warning = %warning.describe(),
                "Ranking completed with warning"
            );
        }

        debug!(
            evaluation_id = %result.evaluation_id,
            alternatives = result.rankings.len(),
            criteria = result.criteria.len(),
            top = %result.top_alternative.name,
            consistency_ratio = result.consistency_ratio,
            execution_time_ms = result.execution_time_ms,
            "Ranking evaluated"
        );

        let summary = ExplanationFormatter::summarize(&result);
        let explanations = if cmd.include_explanations {
            ExplanationFormatter::explain_result(&result)
        } else {
            Vec::new()
        };

        Ok(EvaluateRankingResult {
            result,
            summary,
            explanations,
        })
    }
}
