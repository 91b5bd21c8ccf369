//! Plain-text context handed to the assistant.
//!
//! Everything here is formatting only; sending the text is the caller's job.

use analytics::TradingStats;
use core_types::{AnnotatedTrade, TradeRecord};

/// Coaching context: headline stats plus the latest trades.
///
/// `recent` is expected most recent first; at most `limit` trades are listed.
pub fn coaching_context(stats: &TradingStats, recent: &[TradeRecord], limit: usize) -> String {
    let headline = format!(
        "Total trades: {}, Net P&L: ${:.2}, Win rate: {:.2}%, Profit factor: {:.2}",
        stats.total_trades, stats.total_net_pl, stats.win_rate, stats.profit_factor
    );

    let latest: Vec<String> = recent
        .iter()
        .take(limit)
        .map(|t| format!("{} ({}) ${:.2}", t.symbol, t.direction.broker_label(), t.net_pl))
        .collect();
    let trades = if latest.is_empty() {
        "Recent trades: none".to_string()
    } else {
        format!("Last {} trades: {}", latest.len(), latest.join(", "))
    };

    format!("{headline}\n{trades}")
}

/// Risk and discipline context, centred on the reward-to-risk picture.
pub fn risk_diagnosis_context(stats: &TradingStats) -> String {
    let mut out = format!(
        "Performance scan:\n\
         - Total trades: {}\n\
         - Net P&L: ${:.2}\n\
         - Win rate: {:.2}%\n\
         - Profit factor: {:.2}\n\
         - Average win: ${:.2}\n\
         - Average loss: ${:.2}\n\
         - Largest single loss: ${:.2}",
        stats.total_trades,
        stats.total_net_pl,
        stats.win_rate,
        stats.profit_factor,
        stats.average_win,
        stats.average_loss,
        stats.worst_trade
    );

    if stats.average_loss > stats.average_win {
        out.push_str("\nNote: average loss exceeds average win.");
    }
    out
}

/// Review context for one trade, including the trader's own notes.
pub fn trade_review_context(trade: &AnnotatedTrade) -> String {
    let t = &trade.trade;
    let mut out = format!(
        "Trade under review:\n\
         Symbol: {}\n\
         Direction: {}\n\
         Entry price: {}\n\
         Exit price: {}\n\
         P&L: ${:.2}\n\
         Entry reason (trader's note): \"{}\"",
        t.symbol,
        t.direction.broker_label(),
        t.entry_price.normalize(),
        t.closing_price.normalize(),
        t.net_pl,
        trade.annotation.entry_reason.as_deref().unwrap_or("not provided")
    );
    if trade.annotation.image_url.is_some() {
        out.push_str("\nA chart screenshot is attached.");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics::calculate_stats;
    use chrono::{TimeZone, Utc};
    use core_types::{Direction, ManualEntry, TradeAnnotation};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn manual(symbol: &str, direction: Direction, net_pl: Decimal, hour: u32) -> TradeRecord {
        TradeRecord::from_manual(ManualEntry {
            symbol: symbol.to_string(),
            direction,
            time: Utc.with_ymd_and_hms(2024, 10, 27, hour, 0, 0).unwrap(),
            entry_price: dec!(2000.50),
            closing_price: dec!(2010),
            volume: Some(dec!(1)),
            net_pl,
        })
        .unwrap()
    }

    #[test]
    fn coaching_context_lists_latest_trades() {
        let trades: Vec<TradeRecord> = (0..7)
            .map(|h| manual("XAUUSD", Direction::Long, dec!(10.5), 20 - h))
            .collect();
        let text = coaching_context(&calculate_stats(&trades), &trades, 5);

        assert!(text.starts_with("Total trades: 7, Net P&L: $73.50, Win rate: 100.00%"));
        assert!(text.contains("Last 5 trades: XAUUSD (Buy) $10.50"));
        assert_eq!(text.matches("XAUUSD").count(), 5);
    }

    #[test]
    fn coaching_context_without_trades() {
        let text = coaching_context(&TradingStats::default(), &[], 5);
        assert!(text.contains("Net P&L: $0.00"));
        assert!(text.ends_with("Recent trades: none"));
    }

    #[test]
    fn risk_context_flags_poor_reward_to_risk() {
        let trades = vec![
            manual("EURUSD", Direction::Short, dec!(20), 3),
            manual("EURUSD", Direction::Short, dec!(-80), 2),
        ];
        let text = risk_diagnosis_context(&calculate_stats(&trades));

        assert!(text.contains("- Average loss: $80.00"));
        assert!(text.contains("- Largest single loss: $-80.00"));
        assert!(text.ends_with("Note: average loss exceeds average win."));
    }

    #[test]
    fn risk_context_lists_one_metric_per_line() {
        let text = risk_diagnosis_context(&TradingStats::default());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "Performance scan:");
        assert_eq!(lines[1], "- Total trades: 0");
        assert_eq!(lines[7], "- Largest single loss: $0.00");
    }

    #[test]
    fn review_context_includes_annotation() {
        let trade = AnnotatedTrade {
            trade: manual("XAUUSD", Direction::Long, dec!(950), 14),
            annotation: TradeAnnotation {
                entry_reason: Some("London open breakout".to_string()),
                image_url: Some("data:image/png;base64,AAAA".to_string()),
                ai_analysis: None,
            },
        };
        let text = trade_review_context(&trade);

        assert!(text.contains("Entry price: 2000.5"));
        assert!(text.contains("P&L: $950.00"));
        assert!(text.contains("\"London open breakout\""));
        assert!(text.ends_with("A chart screenshot is attached."));
        assert_eq!(text.lines().nth(1), Some("Symbol: XAUUSD"));
    }
}
