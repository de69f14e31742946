//! Trust Adjuster - reliability updates from observed delivery deviations.

/// Trust lost per unit (day) of deviation from the expected delivery time.
pub const TRUST_PENALTY_PER_UNIT: f64 = 0.03;

/// Pure trust update functions.
///
/// Callers apply these between evaluation rounds and feed the returned score
/// into the next request. Nothing is updated in place.
pub struct TrustAdjuster;

impl TrustAdjuster {
    /// Absolute gap between actual and expected delivery time.
    pub fn observed_deviation(actual: f64, expected: f64) -> f64 {
        (actual - expected).abs()
    }

    /// Lowers `current` by [`TRUST_PENALTY_PER_UNIT`] per unit of deviation,
    /// never below zero.
    ///
    /// # Edge Cases
    /// - Negative deviation: treated by magnitude
    /// - Non-finite deviation: score returned unchanged
    pub fn update_trust(current: f64, observed_deviation: f64) -> f64 {
        if !observed_deviation.is_finite() {
            return current;
        }
        (current - observed_deviation.abs() * TRUST_PENALTY_PER_UNIT).max(0.0)
    }

    /// Applies a sequence of deviations in order.
    pub fn apply_all(current: f64, deviations: impl IntoIterator<Item = f64>) -> f64 {
        deviations
            .into_iter()
            .fold(current, Self::update_trust)
    }
}
