//! Validation of structured replies from the assistant.
//!
//! Replies are treated as untrusted: every field is optional, loosely typed
//! and checked before it reaches a domain type.

use crate::error::AdvisorError;
use chrono::{DateTime, Utc};
use core_types::{Direction, TradeRecord, trade_id};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

/// Symbol used when a screenshot scan could not read one.
pub const UNKNOWN_SYMBOL: &str = "UNKNOWN";

/// The reply to a screenshot scan, as the assistant is asked to return it.
// Using `#[serde(rename_all = "camelCase")]` to map the JSON field names.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScannedTradeResponse {
    symbol: Option<Value>,
    direction: Option<Value>,
    entry_price: Option<Value>,
    closing_price: Option<Value>,
    volume: Option<Value>,
    #[serde(rename = "netPL")]
    net_pl: Option<Value>,
    time: Option<Value>,
}

/// Outcome of a correlation check across the assets being planned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrelationAnalysis {
    pub has_risk: bool,
    pub correlated_pairs: Vec<String>,
    pub explanation: String,
}

impl CorrelationAnalysis {
    /// The answer given when no analysis could be obtained.
    pub fn unavailable() -> Self {
        Self {
            has_risk: false,
            correlated_pairs: Vec::new(),
            explanation: "Correlation analysis is temporarily unavailable.".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CorrelationResponse {
    has_risk: Option<Value>,
    correlated_pairs: Option<Value>,
    explanation: Option<Value>,
}

/// Removes markdown code fences the assistant sometimes wraps JSON in.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

fn parse_object<T: DeserializeOwned>(text: &str) -> Result<T, AdvisorError> {
    let value: Value = serde_json::from_str(&strip_code_fences(text))
        .map_err(|e| AdvisorError::Deserialization(e.to_string()))?;
    if !value.is_object() {
        return Err(AdvisorError::InvalidData(format!("expected a JSON object, got {value}")));
    }
    serde_json::from_value(value).map_err(|e| AdvisorError::Deserialization(e.to_string()))
}

/// Reads a number that may have been sent as a JSON number or a string.
fn as_decimal(value: Option<&Value>) -> Option<Decimal> {
    let text = match value? {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().replace(',', ""),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

fn as_text(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Converts a screenshot-scan reply into a trade record.
///
/// Missing or invalid fields fall back instead of failing: the symbol
/// becomes `UNKNOWN`, numbers become zero, the direction is guessed from the
/// sign of the P&L, and the closing time becomes `now`. Only text that is
/// not a JSON object is an error.
pub fn parse_scanned_trade(text: &str, now: DateTime<Utc>) -> Result<TradeRecord, AdvisorError> {
    let reply: ScannedTradeResponse = parse_object(text)?;

    let symbol = as_text(reply.symbol.as_ref())
        .map(str::to_uppercase)
        .unwrap_or_else(|| UNKNOWN_SYMBOL.to_string());
    let entry_price = as_decimal(reply.entry_price.as_ref()).unwrap_or_default();
    let closing_price = as_decimal(reply.closing_price.as_ref()).unwrap_or_default();
    let volume = as_decimal(reply.volume.as_ref()).unwrap_or_default();
    let net_pl = as_decimal(reply.net_pl.as_ref()).unwrap_or_default();

    let direction = as_text(reply.direction.as_ref())
        .and_then(|d| d.parse::<Direction>().ok())
        .unwrap_or(if net_pl > Decimal::ZERO { Direction::Long } else { Direction::Short });

    let time = match as_text(reply.time.as_ref()) {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|t| t.with_timezone(&Utc))
            .unwrap_or_else(|_| {
                tracing::warn!(time = raw, "Scanned trade has an unreadable time, using now.");
                now
            }),
        None => now,
    };

    Ok(TradeRecord {
        id: trade_id(time, &symbol, entry_price, volume),
        symbol,
        direction,
        time,
        entry_price,
        closing_price,
        volume,
        net_pl,
        balance: Decimal::ZERO,
        mae: None,
        mfe: None,
        exit_efficiency: Decimal::ZERO,
    })
}

/// Converts a correlation-check reply, falling back to
/// [`CorrelationAnalysis::unavailable`] when the reply is unusable.
pub fn parse_correlation(text: &str) -> CorrelationAnalysis {
    let reply: CorrelationResponse = match parse_object(text) {
        Ok(reply) => reply,
        Err(e) => {
            tracing::warn!(error = %e, "Discarding malformed correlation reply.");
            return CorrelationAnalysis::unavailable();
        }
    };

    let correlated_pairs: Vec<String> = match reply.correlated_pairs {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| as_text(Some(item)))
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    };
    let has_risk = match reply.has_risk {
        Some(Value::Bool(flag)) => flag,
        _ => !correlated_pairs.is_empty(),
    };
    let explanation = as_text(reply.explanation.as_ref())
        .map(str::to_string)
        .unwrap_or_default();

    CorrelationAnalysis {
        has_risk,
        correlated_pairs,
        explanation,
    }
}
