//! Per-symbol views and the equity curve.

use crate::error::AnalyticsError;
use chrono::{DateTime, Utc};
use core_types::TradeRecord;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Which trades a view should include.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymbolFilter {
    #[default]
    All,
    Only(String),
}

impl SymbolFilter {
    pub fn matches(&self, trade: &TradeRecord) -> bool {
        match self {
            SymbolFilter::All => true,
            SymbolFilter::Only(symbol) => trade.symbol == *symbol,
        }
    }
}

impl FromStr for SymbolFilter {
    type Err = AnalyticsError;

    /// `"All"` (any case) selects everything; anything else selects one symbol.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AnalyticsError::InvalidFilter(s.to_string()));
        }
        if s.eq_ignore_ascii_case("all") {
            Ok(SymbolFilter::All)
        } else {
            Ok(SymbolFilter::Only(s.to_string()))
        }
    }
}

impl fmt::Display for SymbolFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolFilter::All => f.write_str("All"),
            SymbolFilter::Only(symbol) => f.write_str(symbol),
        }
    }
}

/// Keeps the trades selected by `filter`, in their original order.
pub fn filter_by_symbol(trades: &[TradeRecord], filter: &SymbolFilter) -> Vec<TradeRecord> {
    trades.iter().filter(|t| filter.matches(t)).cloned().collect()
}

/// Distinct symbols, sorted.
pub fn unique_symbols(trades: &[TradeRecord]) -> Vec<String> {
    trades
        .iter()
        .map(|t| t.symbol.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub time: DateTime<Utc>,
    /// Running sum of net P&L up to and including this trade.
    pub cumulative_pl: Decimal,
    pub net_pl: Decimal,
}

/// Cumulative P&L in chronological order, regardless of input order.
pub fn equity_curve(trades: &[TradeRecord]) -> Vec<EquityPoint> {
    let mut ordered: Vec<&TradeRecord> = trades.iter().collect();
    ordered.sort_by_key(|t| t.time);

    let mut cumulative_pl = Decimal::ZERO;
    ordered
        .into_iter()
        .map(|trade| {
            cumulative_pl = cumulative_pl.saturating_add(trade.net_pl);
            EquityPoint {
                time: trade.time,
                cumulative_pl,
                net_pl: trade.net_pl,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolPerformance {
    pub symbol: String,
    pub net_pl: Decimal,
}

/// Net P&L per symbol, best performer first. Ties are ordered by symbol.
pub fn symbol_performance(trades: &[TradeRecord]) -> Vec<SymbolPerformance> {
    let mut totals: BTreeMap<&str, Decimal> = BTreeMap::new();
    for trade in trades {
        let total = totals.entry(trade.symbol.as_str()).or_default();
        *total = total.saturating_add(trade.net_pl);
    }

    let mut rows: Vec<SymbolPerformance> = totals
        .into_iter()
        .map(|(symbol, net_pl)| SymbolPerformance {
            symbol: symbol.to_string(),
            net_pl,
        })
        .collect();
    // Stable sort keeps the BTreeMap's alphabetical order among equal totals.
    rows.sort_by(|a, b| b.net_pl.cmp(&a.net_pl));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::tests::trade;
    use core_types::Direction;
    use rust_decimal_macros::dec;

    fn journal() -> Vec<TradeRecord> {
        vec![
            trade("XAUUSD", Direction::Long, dec!(120), 0),
            trade("EURUSD", Direction::Short, dec!(-40), 10),
            trade("XAUUSD", Direction::Short, dec!(-20), 20),
            trade("BTCUSD", Direction::Long, dec!(60), 30),
            trade("GBPUSD", Direction::Long, dec!(100), 40),
        ]
    }

    #[test]
    fn filter_keeps_order() {
        let trades = journal();
        let gold = filter_by_symbol(&trades, &SymbolFilter::Only("XAUUSD".to_string()));

        assert_eq!(gold.len(), 2);
        assert_eq!(gold[0].net_pl, dec!(120));
        assert_eq!(gold[1].net_pl, dec!(-20));
        assert_eq!(filter_by_symbol(&trades, &SymbolFilter::All), trades);
        assert!(filter_by_symbol(&trades, &SymbolFilter::Only("xauusd".to_string())).is_empty());
    }

    #[test]
    fn filter_parses_from_text() {
        assert_eq!("ALL".parse::<SymbolFilter>().unwrap(), SymbolFilter::All);
        assert_eq!(
            " XAUUSD ".parse::<SymbolFilter>().unwrap(),
            SymbolFilter::Only("XAUUSD".to_string())
        );
        assert!("  ".parse::<SymbolFilter>().is_err());
    }

    #[test]
    fn symbols_are_distinct_and_sorted() {
        assert_eq!(unique_symbols(&journal()), vec!["BTCUSD", "EURUSD", "GBPUSD", "XAUUSD"]);
        assert!(unique_symbols(&[]).is_empty());
    }

    #[test]
    fn equity_curve_runs_oldest_first() {
        let curve = equity_curve(&journal());

        let cumulative: Vec<Decimal> = curve.iter().map(|p| p.cumulative_pl).collect();
        assert_eq!(cumulative, vec![dec!(100), dec!(160), dec!(140), dec!(100), dec!(220)]);
        assert!(curve.windows(2).all(|w| w[0].time <= w[1].time));
        assert_eq!(curve[0].net_pl, dec!(100));
    }

    #[test]
    fn running_totals_saturate() {
        let trades = vec![
            trade("XAUUSD", Direction::Long, Decimal::MAX, 0),
            trade("XAUUSD", Direction::Long, Decimal::MAX, 10),
        ];

        assert_eq!(equity_curve(&trades)[1].cumulative_pl, Decimal::MAX);
        assert_eq!(symbol_performance(&trades)[0].net_pl, Decimal::MAX);
    }

    #[test]
    fn symbol_performance_best_first() {
        let rows = symbol_performance(&journal());
        let flat: Vec<(&str, Decimal)> = rows.iter().map(|r| (r.symbol.as_str(), r.net_pl)).collect();

        assert_eq!(
            flat,
            vec![
                ("GBPUSD", dec!(100)),
                ("XAUUSD", dec!(100)),
                ("BTCUSD", dec!(60)),
                ("EURUSD", dec!(-40)),
            ]
        );
    }
}
