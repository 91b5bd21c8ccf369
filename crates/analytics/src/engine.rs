use crate::report::TradingStats;
use core_types::{Direction, TradeRecord};
use rust_decimal::Decimal;

/// A stateless calculator for deriving performance metrics from closed trades.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for calculating performance metrics.
    ///
    /// # Arguments
    ///
    /// * `trades` - The trades to aggregate. Order does not affect the totals,
    ///   but `current_balance` is read from the first element, so callers
    ///   should pass trades most recent first.
    ///
    /// # Returns
    ///
    /// The `TradingStats` for the slice. An empty slice gives all zeros.
    pub fn calculate(&self, trades: &[TradeRecord]) -> TradingStats {
        let mut stats = TradingStats::new();

        if trades.is_empty() {
            return stats;
        }

        self.calculate_profitability(trades, &mut stats);
        self.calculate_directions(trades, &mut stats);
        self.calculate_ratios(&mut stats);
        stats.current_balance = trades[0].balance;

        tracing::debug!(
            trades = stats.total_trades,
            net_pl = %stats.total_net_pl,
            win_rate = %stats.win_rate,
            "Calculated trading stats."
        );
        stats
    }

    /// Sums results and splits them into wins and losses.
    ///
    /// Only a strictly positive result is a win; break-even trades count
    /// towards the losses.
    fn calculate_profitability(&self, trades: &[TradeRecord], stats: &mut TradingStats) {
        stats.total_trades = trades.len();
        stats.best_trade = trades[0].net_pl;
        stats.worst_trade = trades[0].net_pl;

        // Sums saturate at the `Decimal` range instead of overflowing.
        for trade in trades {
            stats.total_net_pl = stats.total_net_pl.saturating_add(trade.net_pl);
            stats.best_trade = stats.best_trade.max(trade.net_pl);
            stats.worst_trade = stats.worst_trade.min(trade.net_pl);

            if trade.is_win() {
                stats.gross_profit = stats.gross_profit.saturating_add(trade.net_pl);
                stats.winning_trades += 1;
            } else {
                stats.gross_loss = stats.gross_loss.saturating_add(trade.net_pl.abs());
                stats.losing_trades += 1;
            }
        }
    }

    /// Counts trades and wins per direction.
    fn calculate_directions(&self, trades: &[TradeRecord], stats: &mut TradingStats) {
        for trade in trades {
            match trade.direction {
                Direction::Long => {
                    stats.total_longs += 1;
                    if trade.is_win() {
                        stats.longs_won += 1;
                    }
                }
                Direction::Short => {
                    stats.total_shorts += 1;
                    if trade.is_win() {
                        stats.shorts_won += 1;
                    }
                }
            }
        }
    }

    /// Derives the ratio metrics from the totals. Never divides by zero, and a
    /// profit factor too large to represent saturates at `Decimal::MAX`.
    fn calculate_ratios(&self, stats: &mut TradingStats) {
        stats.win_rate = (Decimal::from(stats.winning_trades) / Decimal::from(stats.total_trades))
            * Decimal::ONE_HUNDRED;

        // Without losses the gross profit itself stands in for the ratio.
        stats.profit_factor = if stats.gross_loss.is_zero() {
            stats.gross_profit
        } else {
            stats
                .gross_profit
                .checked_div(stats.gross_loss)
                .unwrap_or(Decimal::MAX)
        };

        if stats.winning_trades > 0 {
            stats.average_win = stats.gross_profit / Decimal::from(stats.winning_trades);
        }

        if stats.losing_trades > 0 {
            stats.average_loss = stats.gross_loss / Decimal::from(stats.losing_trades);
        }
    }
}

/// Shorthand for `AnalyticsEngine::new().calculate(trades)`.
pub fn calculate_stats(trades: &[TradeRecord]) -> TradingStats {
    AnalyticsEngine::new().calculate(trades)
}
