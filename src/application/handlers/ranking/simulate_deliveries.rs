//! SimulateDeliveriesHandler - Command handler for seeded delivery simulations.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use crate::domain::ranking::{
    Anomaly, AnomalyDetector, DeliverySimulator, ForwarderProfile, SimulationOutcome,
};

/// Command to simulate deliveries for a set of forwarders.
#[derive(Debug, Clone)]
pub struct SimulateDeliveriesCommand {
    pub profiles: Vec<ForwarderProfile>,
    /// Deliveries drawn per forwarder.
    pub runs: usize,
    /// Generator seed; the same seed reproduces the same outcomes.
    pub seed: u64,
}

/// Result of a simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulateDeliveriesResult {
    /// One outcome per profile, in input order.
    pub outcomes: Vec<SimulationOutcome>,
    /// Forwarders flagged after the run.
    pub anomalies: Vec<Anomaly>,
}

/// Handler for delivery simulations.
#[derive(Debug, Clone, Default)]
pub struct SimulateDeliveriesHandler;

impl SimulateDeliveriesHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, cmd: SimulateDeliveriesCommand) -> SimulateDeliveriesResult {
        let mut rng = ChaCha8Rng::seed_from_u64(cmd.seed);
        let outcomes = DeliverySimulator::simulate_delivery_times(&cmd.profiles, cmd.runs, &mut rng);

        for outcome in &outcomes {
            debug!(
                forwarder = %outcome.forwarder,
                mean_delivery_days = outcome.mean_delivery_days,
                delay_rate = outcome.delay_rate,
                adjusted_reliability = outcome.adjusted_reliability,
                "Simulated deliveries"
            );
        }

        let anomalies = AnomalyDetector::detect_anomalies(&outcomes);
        for anomaly in &anomalies {
            warn!(
                forwarder = %anomaly.forwarder,
                issue = %anomaly.describe(),
                "Forwarder flagged after simulation"
            );
        }

        SimulateDeliveriesResult {
            outcomes,
            anomalies,
        }
    }
}
