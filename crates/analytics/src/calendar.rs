//! Calendar and session views, bucketed in the trader's local wall clock.

use crate::error::AnalyticsError;
use chrono::{Datelike, FixedOffset, NaiveDate, Timelike};
use core_types::TradeRecord;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub fn offset_from_hours(hours: i32) -> Result<FixedOffset, AnalyticsError> {
    hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
        .ok_or(AnalyticsError::InvalidOffset(hours))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPnl {
    pub date: NaiveDate,
    pub net_pl: Decimal,
    pub trades: usize,
}

/// Net P&L and trade count per local calendar day, oldest day first. Days
/// without trades are omitted.
pub fn daily_pnl(trades: &[TradeRecord], offset: FixedOffset) -> Vec<DailyPnl> {
    let mut days: BTreeMap<NaiveDate, (Decimal, usize)> = BTreeMap::new();
    for trade in trades {
        let date = trade.time.with_timezone(&offset).date_naive();
        let day = days.entry(date).or_insert((Decimal::ZERO, 0));
        day.0 = day.0.saturating_add(trade.net_pl);
        day.1 += 1;
    }

    days.into_iter()
        .map(|(date, (net_pl, trades))| DailyPnl { date, net_pl, trades })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCell {
    pub wins: usize,
    pub total: usize,
    /// Zero for cells without trades.
    pub win_rate: Decimal,
}

/// Win rate by weekday and hour of day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionHeatmap {
    /// Indexed `[weekday][hour]`, Sunday = 0.
    pub cells: Vec<Vec<SessionCell>>,
}

impl SessionHeatmap {
    pub fn cell(&self, weekday: usize, hour: usize) -> Option<&SessionCell> {
        self.cells.get(weekday).and_then(|row| row.get(hour))
    }

    /// The busiest cells first, as `(weekday, hour, cell)`.
    pub fn busiest(&self, limit: usize) -> Vec<(usize, usize, SessionCell)> {
        let mut flat: Vec<(usize, usize, SessionCell)> = self
            .cells
            .iter()
            .enumerate()
            .flat_map(|(d, row)| row.iter().enumerate().map(move |(h, c)| (d, h, *c)))
            .filter(|(_, _, c)| c.total > 0)
            .collect();
        flat.sort_by(|a, b| b.2.total.cmp(&a.2.total));
        flat.truncate(limit);
        flat
    }
}

pub fn session_heatmap(trades: &[TradeRecord], offset: FixedOffset) -> SessionHeatmap {
    let mut cells = vec![vec![SessionCell::default(); 24]; 7];

    for trade in trades {
        let local = trade.time.with_timezone(&offset);
        let cell = &mut cells[local.weekday().num_days_from_sunday() as usize][local.hour() as usize];
        cell.total += 1;
        if trade.is_win() {
            cell.wins += 1;
        }
    }

    for cell in cells.iter_mut().flatten() {
        if cell.total > 0 {
            cell.win_rate = Decimal::from(cell.wins) / Decimal::from(cell.total) * Decimal::ONE_HUNDRED;
        }
    }

    SessionHeatmap { cells }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::tests::trade;
    use chrono::{TimeZone, Utc};
    use core_types::Direction;
    use rust_decimal_macros::dec;

    fn at(trade_pl: Decimal, y: i32, m: u32, d: u32, h: u32) -> TradeRecord {
        let mut t = trade("XAUUSD", Direction::Long, trade_pl, 0);
        t.time = Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap();
        t
    }

    #[test]
    fn offsets_are_validated() {
        assert_eq!(offset_from_hours(8).unwrap().local_minus_utc(), 8 * 3600);
        assert_eq!(offset_from_hours(-5).unwrap().local_minus_utc(), -5 * 3600);
        assert_eq!(offset_from_hours(25), Err(AnalyticsError::InvalidOffset(25)));
    }

    #[test]
    fn daily_buckets_follow_local_date() {
        let utc8 = offset_from_hours(8).unwrap();
        let trades = vec![
            // 2024-10-27 18:00 UTC is already the 28th in UTC+8.
            at(dec!(50), 2024, 10, 27, 18),
            at(dec!(-20), 2024, 10, 28, 1),
            at(dec!(30), 2024, 10, 27, 2),
        ];
        let days = daily_pnl(&trades, utc8);

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 10, 27).unwrap());
        assert_eq!((days[0].net_pl, days[0].trades), (dec!(30), 1));
        assert_eq!(days[1].date, NaiveDate::from_ymd_opt(2024, 10, 28).unwrap());
        assert_eq!((days[1].net_pl, days[1].trades), (dec!(30), 2));
    }

    #[test]
    fn daily_totals_saturate() {
        let utc = offset_from_hours(0).unwrap();
        let trades = vec![
            at(Decimal::MIN, 2024, 10, 27, 9),
            at(Decimal::MIN, 2024, 10, 27, 10),
        ];
        let days = daily_pnl(&trades, utc);
        assert_eq!((days[0].net_pl, days[0].trades), (Decimal::MIN, 2));
    }

    #[test]
    fn heatmap_counts_wins_per_session() {
        let utc = offset_from_hours(0).unwrap();
        // 2024-10-27 was a Sunday.
        let trades = vec![
            at(dec!(10), 2024, 10, 27, 14),
            at(dec!(-10), 2024, 10, 27, 14),
            at(dec!(0), 2024, 10, 27, 14),
            at(dec!(5), 2024, 10, 28, 9),
        ];
        let map = session_heatmap(&trades, utc);

        assert_eq!(map.cells.len(), 7);
        assert!(map.cells.iter().all(|row| row.len() == 24));

        let sunday = map.cell(0, 14).unwrap();
        assert_eq!((sunday.wins, sunday.total), (1, 3));
        assert_eq!(sunday.win_rate, dec!(1) / dec!(3) * dec!(100));

        let monday = map.cell(1, 9).unwrap();
        assert_eq!(monday.win_rate, dec!(100));
        assert_eq!(map.cell(3, 3).unwrap().win_rate, Decimal::ZERO);

        let busiest = map.busiest(1);
        assert_eq!((busiest[0].0, busiest[0].1), (0, 14));
    }
}
