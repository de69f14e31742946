//! Application layer - Commands and Handlers.
//!
//! This layer drives the ranking domain services and adds the logging and
//! presentation concerns the pure domain core leaves out.

pub mod handlers;

pub use handlers::{
    EvaluateRankingCommand, EvaluateRankingError, EvaluateRankingHandler, EvaluateRankingResult,
    SimulateDeliveriesCommand, SimulateDeliveriesHandler, SimulateDeliveriesResult,
};
