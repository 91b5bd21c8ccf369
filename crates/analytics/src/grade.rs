use crate::report::TradingStats;
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

const WIN_RATE_CAP: Decimal = dec!(40);
const PROFIT_FACTOR_CAP: Decimal = dec!(30);
const DISCIPLINE_CAP: Decimal = dec!(30);

/// Letter summary of a trader's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    S,
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_score(total: u32) -> Self {
        match total {
            95.. => Grade::S,
            85..=94 => Grade::A,
            75..=84 => Grade::B,
            60..=74 => Grade::C,
            50..=59 => Grade::D,
            _ => Grade::F,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Grade::S => "S",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        };
        f.write_str(letter)
    }
}

/// A weighted score out of 100 and the parts it was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraderScore {
    pub total_score: u32,
    pub grade: Grade,
    /// Up to 40 points; full marks from a ~66.7% win rate.
    pub win_rate_score: Decimal,
    /// Up to 30 points; full marks from a profit factor of 3.
    pub profit_factor_score: Decimal,
    /// Up to 30 points; full marks once the average win is twice the average loss.
    pub discipline_score: Decimal,
}

impl TraderScore {
    /// Scores a set of statistics. Pure; depends on nothing but `stats`.
    pub fn from_stats(stats: &TradingStats) -> Self {
        let win_rate_score =
            (stats.win_rate / Decimal::ONE_HUNDRED * WIN_RATE_CAP * dec!(1.5)).min(WIN_RATE_CAP);

        // Ratios too large to represent are far past the cap anyway.
        let profit_factor_score = (stats.profit_factor / dec!(3))
            .checked_mul(PROFIT_FACTOR_CAP)
            .unwrap_or(PROFIT_FACTOR_CAP)
            .min(PROFIT_FACTOR_CAP);

        let loss = if stats.average_loss.is_zero() {
            Decimal::ONE
        } else {
            stats.average_loss
        };
        let discipline_score = stats
            .average_win
            .checked_div(loss)
            .and_then(|ratio| ratio.abs().checked_mul(dec!(15)))
            .unwrap_or(DISCIPLINE_CAP)
            .min(DISCIPLINE_CAP);

        let total_score = (win_rate_score + profit_factor_score + discipline_score)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u32()
            .unwrap_or(0);

        Self {
            total_score,
            grade: Grade::from_score(total_score),
            win_rate_score,
            profit_factor_score,
            discipline_score,
        }
    }
}
