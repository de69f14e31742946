//! Delivery Simulation - seeded what-if runs for forwarder reliability.
//!
//! Kept apart from the ranking path. The random source is always injected so
//! a seeded generator reproduces a run exactly.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::TrustAdjuster;

/// Shortest simulated delivery, in days.
pub const MIN_DELIVERY_DAYS: f64 = 2.0;

/// Upper bound (exclusive) of simulated delivery, in days.
pub const MAX_DELIVERY_DAYS: f64 = 9.0;

/// A forwarder going into a simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwarderProfile {
    pub name: String,
    /// Current trust score.
    pub reliability: f64,
    /// Promised delivery time, in days.
    pub expected_delivery_days: f64,
}

impl ForwarderProfile {
    pub fn new(name: impl Into<String>, reliability: f64, expected_delivery_days: f64) -> Self {
        Self {
            name: name.into(),
            reliability,
            expected_delivery_days,
        }
    }
}

/// What one forwarder's simulated deliveries looked like.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationOutcome {
    pub forwarder: String,
    pub delivery_days: Vec<f64>,
    pub mean_delivery_days: f64,
    /// Share of deliveries that took longer than expected, in `[0, 1]`.
    pub delay_rate: f64,
    /// Reliability after applying every simulated deviation in order.
    pub adjusted_reliability: f64,
}

/// Simulation functions.
pub struct DeliverySimulator;

impl DeliverySimulator {
    /// Draws `runs` delivery times per forwarder, uniform in
    /// `[MIN_DELIVERY_DAYS, MAX_DELIVERY_DAYS)`, and folds the deviations
    /// from each forwarder's expected time into its trust score.
    ///
    /// With zero runs the mean and delay rate are 0 and trust is unchanged.
    ///
    /// Forwarders are simulated in input order from the same generator.
    pub fn simulate_delivery_times<R: Rng + ?Sized>(
        profiles: &[ForwarderProfile],
        runs: usize,
        rng: &mut R,
    ) -> Vec<SimulationOutcome> {
        profiles
            .iter()
            .map(|profile| {
                let delivery_days: Vec<f64> = (0..runs)
                    .map(|_| rng.gen_range(MIN_DELIVERY_DAYS..MAX_DELIVERY_DAYS))
                    .collect();

                let (mean_delivery_days, delay_rate) = if delivery_days.is_empty() {
                    (0.0, 0.0)
                } else {
                    let count = delivery_days.len() as f64;
                    let late = delivery_days
                        .iter()
                        .filter(|&&d| d > profile.expected_delivery_days)
                        .count() as f64;
                    (delivery_days.iter().sum::<f64>() / count, late / count)
                };

                let adjusted_reliability = TrustAdjuster::apply_all(
                    profile.reliability,
                    delivery_days.iter().map(|&actual| {
                        TrustAdjuster::observed_deviation(actual, profile.expected_delivery_days)
                    }),
                );

                SimulationOutcome {
                    forwarder: profile.name.clone(),
                    delivery_days,
                    mean_delivery_days,
                    delay_rate,
                    adjusted_reliability,
                }
            })
            .collect()
    }
}
