//! Explanation Formatter - plain-language justification of ranking results.
//!
//! Formatting only: every number shown here comes from an already computed
//! result. Nothing is re-ranked.

use serde::{Deserialize, Serialize};

use super::{Criterion, DecisionResult, RankedEntry, WeightVector};

/// Coefficient above which an alternative is "significantly" closer to ideal.
pub const SIGNIFICANT_PROXIMITY: f64 = 0.7;

/// Coefficient above which an alternative is "moderately" closer to ideal.
pub const MODERATE_PROXIMITY: f64 = 0.5;

/// Absolute coefficient gap below which two alternatives are called nearly identical.
pub const NEARLY_IDENTICAL_DELTA: f64 = 0.05;

/// Spread (percent) above which ranking differences are significant.
pub const SIGNIFICANT_SPREAD_PERCENT: f64 = 30.0;

/// Spread (percent) above which ranking differences are moderate.
pub const MODERATE_SPREAD_PERCENT: f64 = 15.0;

/// Method label attached to every explanation.
pub const FORMULA_USED: &str = "TOPSIS closeness coefficient with AHP criteria weights";

/// How close an alternative sits to the ideal relative to the anti-ideal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Proximity {
    Significant,
    Moderate,
    Slight,
}

impl Proximity {
    /// Classifies a closeness coefficient.
    pub fn classify(coefficient: f64) -> Self {
        if coefficient > SIGNIFICANT_PROXIMITY {
            Proximity::Significant
        } else if coefficient > MODERATE_PROXIMITY {
            Proximity::Moderate
        } else {
            Proximity::Slight
        }
    }

    /// Adverb used in prose.
    pub fn adverb(&self) -> &'static str {
        match self {
            Proximity::Significant => "significantly",
            Proximity::Moderate => "moderately",
            Proximity::Slight => "slightly",
        }
    }
}

/// How large the gap between best and worst alternative is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpreadClass {
    Significant,
    Moderate,
    Minor,
}

impl SpreadClass {
    /// Classifies a spread given in percent.
    pub fn classify(spread_percent: f64) -> Self {
        if spread_percent > SIGNIFICANT_SPREAD_PERCENT {
            SpreadClass::Significant
        } else if spread_percent > MODERATE_SPREAD_PERCENT {
            SpreadClass::Moderate
        } else {
            SpreadClass::Minor
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SpreadClass::Significant => "significant",
            SpreadClass::Moderate => "moderate",
            SpreadClass::Minor => "minor",
        }
    }
}

/// A named per-criterion figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionFigure {
    pub criterion: String,
    pub value: f64,
}

/// Justification for one ranked alternative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Explanation {
    pub alternative: String,
    pub coefficient: f64,
    pub proximity: Proximity,
    pub formula_used: String,
    pub weights_used: Vec<CriterionFigure>,
    /// Share of the way from anti-ideal to ideal on each criterion.
    pub performance_breakdown: Vec<CriterionFigure>,
    pub justification: String,
    pub detailed_reasoning: String,
}

/// Formatting functions for ranking results.
pub struct ExplanationFormatter;

impl ExplanationFormatter {
    /// Formats a coefficient as a percentage with one decimal.
    pub fn format_score(score: f64) -> String {
        format!("{:.1}%", score * 100.0)
    }

    /// Explains one ranked entry.
    ///
    /// `criteria` labels the weights and breakdown; when it is shorter than
    /// the weight vector the remaining criteria get default names.
    pub fn explain(entry: &RankedEntry, weights: &WeightVector, criteria: &[Criterion]) -> Explanation {
        let name_of = |j: usize| {
            criteria
                .get(j)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| Criterion::default_name(j))
        };

        let weights_used: Vec<CriterionFigure> = weights
            .as_slice()
            .iter()
            .enumerate()
            .map(|(j, &value)| CriterionFigure {
                criterion: name_of(j),
                value,
            })
            .collect();

        let performance_breakdown: Vec<CriterionFigure> = entry
            .attainment
            .iter()
            .enumerate()
            .map(|(j, &value)| CriterionFigure {
                criterion: name_of(j),
                value,
            })
            .collect();

        let proximity = Proximity::classify(entry.coefficient);

        let justification = format!(
            "Ranked with closeness coefficient = {:.2} (distance to ideal {:.4}, distance to anti-ideal {:.4})",
            entry.coefficient, entry.distance_to_ideal, entry.distance_to_anti_ideal
        );

        let per_criterion: Vec<String> = performance_breakdown
            .iter()
            .zip(&weights_used)
            .map(|(performance, weight)| {
                format!(
                    "{} on {} (weight: {:.3})",
                    Self::format_score(performance.value),
                    performance.criterion,
                    weight.value
                )
            })
            .collect();

        let detailed_reasoning = format!(
            "{} achieved a closeness coefficient of {} using the TOPSIS methodology. \
             This ranking indicates that {} is {} closer to the ideal solution than the anti-ideal. \
             Relative to the best and worst observed values it scored {}.",
            entry.name,
            Self::format_score(entry.coefficient),
            entry.name,
            proximity.adverb(),
            Self::join_phrases(&per_criterion)
        );

        Explanation {
            alternative: entry.name.clone(),
            coefficient: entry.coefficient,
            proximity,
            formula_used: FORMULA_USED.to_string(),
            weights_used,
            performance_breakdown,
            justification,
            detailed_reasoning,
        }
    }

    /// Explains every entry of a result, best first.
    pub fn explain_result(result: &DecisionResult) -> Vec<Explanation> {
        result
            .rankings
            .iter()
            .map(|entry| Self::explain(entry, &result.weights, &result.criteria))
            .collect()
    }

    /// Compares two alternatives.
    ///
    /// The percentage is relative to the larger coefficient. Gaps under
    /// [`NEARLY_IDENTICAL_DELTA`] name no winner.
    pub fn compare(first: &RankedEntry, second: &RankedEntry) -> String {
        let diff = first.coefficient - second.coefficient;
        let larger = first.coefficient.max(second.coefficient);
        let percent_diff = if larger > 0.0 {
            diff.abs() / larger * 100.0
        } else {
            0.0
        };

        if diff.abs() < NEARLY_IDENTICAL_DELTA {
            format!(
                "{} and {} have nearly identical performance ({:.1}% difference), suggesting either would be a suitable choice.",
                first.name, second.name, percent_diff
            )
        } else {
            let (winner, loser) = if diff > 0.0 {
                (first, second)
            } else {
                (second, first)
            };
            format!(
                "{} outperforms {} by {:.1}% according to the TOPSIS closeness coefficient, indicating a clear preference.",
                winner.name, loser.name, percent_diff
            )
        }
    }

    /// Spread between best and worst coefficient, in percent of the best.
    ///
    /// Zero for empty rankings or when the best coefficient is zero.
    pub fn spread_percent(entries: &[RankedEntry]) -> f64 {
        match (entries.first(), entries.last()) {
            (Some(top), Some(bottom)) if top.coefficient > 0.0 => {
                (top.coefficient - bottom.coefficient) / top.coefficient * 100.0
            }
            _ => 0.0,
        }
    }

    /// Summarizes a full ranking.
    pub fn summarize(result: &DecisionResult) -> String {
        Self::summarize_entries(&result.rankings)
    }

    /// Summarizes ranked entries (best first).
    pub fn summarize_entries(entries: &[RankedEntry]) -> String {
        let (top, bottom) = match (entries.first(), entries.last()) {
            (Some(top), Some(bottom)) => (top, bottom),
            _ => return "No rankings available.".to_string(),
        };

        let spread = Self::spread_percent(entries);
        let noun = if entries.len() == 1 {
            "freight forwarder"
        } else {
            "freight forwarders"
        };

        format!(
            "Analysis of {} {} shows {} leading with a coefficient of {}, while {} ranks lowest at {}. \
             The performance spread is {:.1}%, indicating a {} difference across options.",
            entries.len(),
            noun,
            top.name,
            Self::format_score(top.coefficient),
            bottom.name,
            Self::format_score(bottom.coefficient),
            spread,
            SpreadClass::classify(spread).label()
        )
    }

    fn join_phrases(phrases: &[String]) -> String {
        match phrases {
            [] => String::new(),
            [only] => only.clone(),
            [init @ .., last] => format!("{}, and {}", init.join(", "), last),
        }
    }
}
