use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Aggregate performance of a set of trades.
///
/// This struct is the output of the `AnalyticsEngine` and the shape handed
/// to dashboards and to the assistant as context. Every numeric field is
/// zero for an empty set of trades.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingStats {
    // I. Profitability
    pub total_trades: usize,
    pub total_net_pl: Decimal,
    pub gross_profit: Decimal,
    pub gross_loss: Decimal,
    /// Gross profit over gross loss; equals gross profit when nothing was lost.
    pub profit_factor: Decimal,

    // II. Trade-level statistics
    pub winning_trades: usize,
    pub losing_trades: usize,
    /// Percentage of trades with a strictly positive result.
    pub win_rate: Decimal,
    pub best_trade: Decimal,
    pub worst_trade: Decimal,
    pub average_win: Decimal,
    pub average_loss: Decimal,

    // III. Direction split
    pub longs_won: usize,
    pub shorts_won: usize,
    pub total_longs: usize,
    pub total_shorts: usize,

    // IV. Account
    /// Balance of the first trade in the input, i.e. the latest one when the
    /// input is ordered most recent first.
    pub current_balance: Decimal,
}

impl TradingStats {
    /// Creates a new, zeroed-out TradingStats.
    pub fn new() -> Self {
        Self {
            total_trades: 0,
            total_net_pl: Decimal::ZERO,
            gross_profit: Decimal::ZERO,
            gross_loss: Decimal::ZERO,
            profit_factor: Decimal::ZERO,
            winning_trades: 0,
            losing_trades: 0,
            win_rate: Decimal::ZERO,
            best_trade: Decimal::ZERO,
            worst_trade: Decimal::ZERO,
            average_win: Decimal::ZERO,
            average_loss: Decimal::ZERO,
            longs_won: 0,
            shorts_won: 0,
            total_longs: 0,
            total_shorts: 0,
            current_balance: Decimal::ZERO,
        }
    }
}

impl Default for TradingStats {
    fn default() -> Self {
        Self::new()
    }
}
