use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The side a position was opened on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Long,
    Short,
}

impl Direction {
    /// The broker-facing label, as written in statement exports.
    pub fn broker_label(&self) -> &'static str {
        match self {
            Direction::Long => "Buy",
            Direction::Short => "Sell",
        }
    }
}

impl FromStr for Direction {
    type Err = CoreError;

    /// Accepts both the broker vocabulary (`Buy`/`Sell`) and the position
    /// vocabulary (`Long`/`Short`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" | "long" => Ok(Direction::Long),
            "sell" | "short" => Ok(Direction::Short),
            _ => Err(CoreError::UnknownDirection(s.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Long => write!(f, "Long"),
            Direction::Short => write!(f, "Short"),
        }
    }
}

/// The horizon a trading plan is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanTimeframe {
    Week,
    Month,
}
