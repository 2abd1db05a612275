//! Categorical trust levels derived from the numeric score.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The five-step categorical form of a 0–100 trust score.
///
/// Ordered: `VeryLow < Low < Medium < High < VeryHigh`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrustLevel {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl TrustLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VeryLow => "very_low",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::VeryHigh => "very_high",
        }
    }
}

impl fmt::Display for TrustLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
