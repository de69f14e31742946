//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod ranking;

pub use ranking::{
    EvaluateRankingCommand, EvaluateRankingError, EvaluateRankingHandler, EvaluateRankingResult,
    SimulateDeliveriesCommand, SimulateDeliveriesHandler, SimulateDeliveriesResult,
};
