//! Criterion and Alternative value objects.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Polarity;

/// One evaluation dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criterion {
    pub name: String,
    pub polarity: Polarity,
}

impl Criterion {
    /// Creates a new criterion.
    pub fn new(name: impl Into<String>, polarity: Polarity) -> Self {
        Self {
            name: name.into(),
            polarity,
        }
    }

    /// Creates a benefit criterion (higher is better).
    pub fn benefit(name: impl Into<String>) -> Self {
        Self::new(name, Polarity::Benefit)
    }

    /// Creates a cost criterion (lower is better).
    pub fn cost(name: impl Into<String>) -> Self {
        Self::new(name, Polarity::Cost)
    }

    /// Default display name for the criterion at `position`.
    pub fn default_name(position: usize) -> String {
        format!("Criterion {}", position + 1)
    }
}

/// One candidate being ranked.
///
/// `index` is the position in the caller's input and doubles as the stable
/// identifier: ties are broken by it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alternative {
    pub index: usize,
    pub name: String,
}

impl Alternative {
    /// Creates a new alternative.
    pub fn new(index: usize, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
        }
    }

    /// Default display name for the alternative at `index`.
    pub fn default_name(index: usize) -> String {
        format!("Option {}", index + 1)
    }
}
