use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Upper bound of the risk-score scale
pub const MAX_RISK_SCORE: f64 = 10.0;

/// Disjoint partition of the risk-score range.
///
/// Low = [0, 4], Medium = (4, 6], High = (6, 10]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskBand {
    Low,
    Medium,
    High,
}

impl RiskBand {
    pub fn from_score(score: f64) -> Self {
        if score <= 4.0 {
            Self::Low
        } else if score <= 6.0 {
            Self::Medium
        } else {
            Self::High
        }
    }

    pub fn contains(&self, score: f64) -> bool {
        Self::from_score(score) == *self
    }
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High"),
        }
    }
}

impl FromStr for RiskBand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" | "med" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(format!("unknown risk band '{}'", s)),
        }
    }
}
