use crate::enums::{Direction, PlanTimeframe};
use crate::error::CoreError;
use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single closed trade, normalized from a broker export, a manual entry
/// or an AI screenshot scan.
///
/// All monetary fields are in the account currency (USD for the supported
/// broker format).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// Deterministic identifier, see [`trade_id`].
    pub id: String,
    pub symbol: String,
    pub direction: Direction,
    /// Closing time of the position.
    pub time: DateTime<Utc>,
    pub entry_price: Decimal,
    pub closing_price: Decimal,
    /// Quantity traded, in lots.
    pub volume: Decimal,
    pub net_pl: Decimal,
    /// Account balance right after this trade closed.
    pub balance: Decimal,
    /// Maximum adverse excursion.
    pub mae: Option<Decimal>,
    /// Maximum favorable excursion.
    pub mfe: Option<Decimal>,
    /// Share of the MFE that was realized, in `[0, 100]`.
    pub exit_efficiency: Decimal,
}

impl TradeRecord {
    /// Builds a record from a validated manual entry.
    ///
    /// Manual trades carry no balance or excursion data, so those are left
    /// at zero / `None` and exit efficiency is zero.
    pub fn from_manual(entry: ManualEntry) -> Result<Self, CoreError> {
        let symbol = entry.symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(CoreError::InvalidInput(
                "symbol".to_string(),
                "must not be empty".to_string(),
            ));
        }
        let volume = entry.volume.unwrap_or(Decimal::ZERO);

        Ok(Self {
            id: trade_id(entry.time, &symbol, entry.entry_price, volume),
            symbol,
            direction: entry.direction,
            time: entry.time,
            entry_price: entry.entry_price,
            closing_price: entry.closing_price,
            volume,
            net_pl: entry.net_pl,
            balance: Decimal::ZERO,
            mae: None,
            mfe: None,
            exit_efficiency: Decimal::ZERO,
        })
    }

    pub fn is_win(&self) -> bool {
        self.net_pl > Decimal::ZERO
    }
}

/// Builds the identifier of a trade from its closing time, symbol, entry
/// price and volume.
///
/// The result is a pure function of those four values, so importing the
/// same statement twice yields the same identifiers and the store can reject
/// duplicates. Decimals are normalized first (`2.50` and `2.5` agree).
pub fn trade_id(time: DateTime<Utc>, symbol: &str, entry_price: Decimal, volume: Decimal) -> String {
    format!(
        "{}-{}-{}-{}",
        time.timestamp_millis(),
        symbol,
        entry_price.normalize(),
        volume.normalize()
    )
}

/// Percentage of the maximum favorable excursion that ended up realized.
///
/// Clamped to `[0, 100]` and rounded to two decimal places. Zero whenever
/// the MFE is missing or not positive.
pub fn exit_efficiency(net_pl: Decimal, mfe: Option<Decimal>) -> Decimal {
    match mfe {
        Some(mfe) if mfe > Decimal::ZERO => {
            // An overflowing ratio is far outside the range either way.
            let saturated = if net_pl > Decimal::ZERO { Decimal::ONE_HUNDRED } else { Decimal::ZERO };
            net_pl
                .checked_div(mfe)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                .unwrap_or(saturated)
                .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        }
        _ => Decimal::ZERO,
    }
}

/// User-entered fields for a trade that was not part of an import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualEntry {
    pub symbol: String,
    pub direction: Direction,
    pub time: DateTime<Utc>,
    pub entry_price: Decimal,
    pub closing_price: Decimal,
    pub volume: Option<Decimal>,
    pub net_pl: Decimal,
}

/// Optional metadata attached to a trade after it was recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeAnnotation {
    pub entry_reason: Option<String>,
    pub image_url: Option<String>,
    pub ai_analysis: Option<String>,
}

impl TradeAnnotation {
    pub fn is_empty(&self) -> bool {
        self.entry_reason.is_none() && self.image_url.is_none() && self.ai_analysis.is_none()
    }
}

/// A trade together with whatever annotation the user or the assistant
/// attached to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedTrade {
    #[serde(flatten)]
    pub trade: TradeRecord,
    #[serde(flatten)]
    pub annotation: TradeAnnotation,
}

impl AnnotatedTrade {
    /// Overlays annotations onto trades, keyed by trade id. Order is kept;
    /// trades without an annotation get an empty one.
    pub fn annotate(
        trades: &[TradeRecord],
        annotations: &HashMap<String, TradeAnnotation>,
    ) -> Vec<AnnotatedTrade> {
        trades
            .iter()
            .map(|trade| AnnotatedTrade {
                trade: trade.clone(),
                annotation: annotations.get(&trade.id).cloned().unwrap_or_default(),
            })
            .collect()
    }
}

/// A forward-looking scenario for one asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingPlan {
    pub id: String,
    pub timeframe: PlanTimeframe,
    pub asset: String,
    pub scenario: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn closed_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 10, 27, 6, 30, 0).unwrap()
    }

    #[test]
    fn trade_id_uses_normalized_decimals() {
        let id = trade_id(closed_at(), "XAUUSD", dec!(2000.50), dec!(2.50));
        assert_eq!(id, format!("{}-XAUUSD-2000.5-2.5", closed_at().timestamp_millis()));
    }

    #[test]
    fn exit_efficiency_rounds_and_clamps() {
        assert_eq!(exit_efficiency(dec!(100), Some(dec!(120))), dec!(83.33));
        assert_eq!(exit_efficiency(dec!(500), Some(dec!(100))), dec!(100));
        assert_eq!(exit_efficiency(dec!(-40), Some(dec!(10))), dec!(0));
        assert_eq!(exit_efficiency(dec!(40), Some(dec!(0))), dec!(0));
        assert_eq!(exit_efficiency(dec!(40), None), dec!(0));
    }

    #[test]
    fn manual_entry_uppercases_and_defaults() {
        let record = TradeRecord::from_manual(ManualEntry {
            symbol: " xauusd ".to_string(),
            direction: Direction::Short,
            time: closed_at(),
            entry_price: dec!(2010),
            closing_price: dec!(2000),
            volume: None,
            net_pl: dec!(1000),
        })
        .unwrap();

        assert_eq!(record.symbol, "XAUUSD");
        assert_eq!(record.volume, Decimal::ZERO);
        assert_eq!(record.balance, Decimal::ZERO);
        assert_eq!(record.exit_efficiency, Decimal::ZERO);
        assert_eq!(record.mae, None);
        assert_eq!(record.id, trade_id(closed_at(), "XAUUSD", dec!(2010), dec!(0)));
    }

    #[test]
    fn manual_entry_requires_symbol() {
        let result = TradeRecord::from_manual(ManualEntry {
            symbol: "   ".to_string(),
            direction: Direction::Long,
            time: closed_at(),
            entry_price: dec!(1),
            closing_price: dec!(1),
            volume: Some(dec!(1)),
            net_pl: dec!(0),
        });
        assert!(matches!(result, Err(CoreError::InvalidInput(field, _)) if field == "symbol"));
    }

    #[test]
    fn annotate_keeps_order_and_fills_missing() {
        let base = TradeRecord::from_manual(ManualEntry {
            symbol: "EURUSD".to_string(),
            direction: Direction::Long,
            time: closed_at(),
            entry_price: dec!(1.1),
            closing_price: dec!(1.2),
            volume: Some(dec!(1)),
            net_pl: dec!(100),
        })
        .unwrap();
        let mut other = base.clone();
        other.id = "other".to_string();

        let mut notes = HashMap::new();
        notes.insert(
            base.id.clone(),
            TradeAnnotation {
                entry_reason: Some("breakout retest".to_string()),
                ..Default::default()
            },
        );

        let annotated = AnnotatedTrade::annotate(&[other.clone(), base.clone()], &notes);
        assert_eq!(annotated[0].trade.id, "other");
        assert!(annotated[0].annotation.is_empty());
        assert_eq!(annotated[1].annotation.entry_reason.as_deref(), Some("breakout retest"));
    }

    #[test]
    fn annotated_trade_serializes_flat() {
        let trade = TradeRecord::from_manual(ManualEntry {
            symbol: "btcusd".to_string(),
            direction: Direction::Long,
            time: closed_at(),
            entry_price: dec!(60000),
            closing_price: dec!(61000),
            volume: Some(dec!(0.1)),
            net_pl: dec!(100),
        })
        .unwrap();
        let value = serde_json::to_value(AnnotatedTrade {
            trade,
            annotation: TradeAnnotation {
                ai_analysis: Some("clean exit".to_string()),
                ..Default::default()
            },
        })
        .unwrap();
        assert_eq!(value["symbol"], "BTCUSD");
        assert_eq!(value["ai_analysis"], "clean exit");
    }

    proptest! {
        #[test]
        fn trade_id_is_reproducible(
            secs in 0i64..4_000_000_000,
            symbol in "[A-Z]{3,8}",
            entry in 0i64..10_000_000,
            volume in 0i64..100_000,
        ) {
            let time = Utc.timestamp_opt(secs, 0).unwrap();
            let entry = Decimal::new(entry, 2);
            let volume = Decimal::new(volume, 2);
            prop_assert_eq!(
                trade_id(time, &symbol, entry, volume),
                trade_id(time, &symbol.clone(), entry, volume)
            );
        }
    }
}
