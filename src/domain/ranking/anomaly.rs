//! Anomaly Detection - flags forwarders with weak reliability or frequent delays.

use serde::{Deserialize, Serialize};

use super::{ForwarderProfile, SimulationOutcome};

/// Reliability strictly below this is flagged.
pub const LOW_RELIABILITY_THRESHOLD: f64 = 0.65;

/// Delay rate strictly above this is flagged.
pub const HIGH_DELAY_RATE_THRESHOLD: f64 = 0.3;

/// One reason a forwarder was flagged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AnomalyKind {
    #[serde(rename_all = "camelCase")]
    LowReliability { reliability: f64 },
    #[serde(rename_all = "camelCase")]
    FrequentDelays { delay_rate: f64 },
}

impl AnomalyKind {
    pub fn describe(&self) -> String {
        match self {
            AnomalyKind::LowReliability { reliability } => format!(
                "Reliability {:.1}% is below {:.0}%",
                reliability * 100.0,
                LOW_RELIABILITY_THRESHOLD * 100.0
            ),
            AnomalyKind::FrequentDelays { delay_rate } => {
                format!("Delay trend detected: {:.0}%", delay_rate * 100.0)
            }
        }
    }
}

/// A flagged forwarder and every reason it was flagged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    pub forwarder: String,
    pub kinds: Vec<AnomalyKind>,
}

impl Anomaly {
    /// All reasons joined into one line.
    pub fn describe(&self) -> String {
        let reasons: Vec<String> = self.kinds.iter().map(AnomalyKind::describe).collect();
        format!("{}: {}", self.forwarder, reasons.join("; "))
    }
}

/// Anomaly detection functions.
pub struct AnomalyDetector;

impl AnomalyDetector {
    /// Checks one forwarder. `delay_rate` is optional because profiles
    /// without a delivery history have none.
    ///
    /// Non-finite figures are never flagged.
    pub fn inspect(forwarder: &str, reliability: f64, delay_rate: Option<f64>) -> Option<Anomaly> {
        let mut kinds = Vec::new();
        if reliability < LOW_RELIABILITY_THRESHOLD {
            kinds.push(AnomalyKind::LowReliability { reliability });
        }
        if let Some(delay_rate) = delay_rate.filter(|rate| *rate > HIGH_DELAY_RATE_THRESHOLD) {
            kinds.push(AnomalyKind::FrequentDelays { delay_rate });
        }

        if kinds.is_empty() {
            None
        } else {
            Some(Anomaly {
                forwarder: forwarder.to_string(),
                kinds,
            })
        }
    }

    /// Flags simulated forwarders by post-simulation reliability and delay rate.
    pub fn detect_anomalies(outcomes: &[SimulationOutcome]) -> Vec<Anomaly> {
        outcomes
            .iter()
            .filter_map(|outcome| {
                Self::inspect(
                    &outcome.forwarder,
                    outcome.adjusted_reliability,
                    Some(outcome.delay_rate),
                )
            })
            .collect()
    }

    /// Flags profiles by their current reliability alone.
    pub fn detect_profile_anomalies(profiles: &[ForwarderProfile]) -> Vec<Anomaly> {
        profiles
            .iter()
            .filter_map(|profile| Self::inspect(&profile.name, profile.reliability, None))
            .collect()
    }
}
