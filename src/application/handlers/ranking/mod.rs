//! Ranking handlers.

mod evaluate_ranking;
mod simulate_deliveries;

pub use evaluate_ranking::{
    EvaluateRankingCommand, EvaluateRankingError, EvaluateRankingHandler, EvaluateRankingResult,
};
pub use simulate_deliveries::{
    SimulateDeliveriesCommand, SimulateDeliveriesHandler, SimulateDeliveriesResult,
};
