//! Cleanup and parsing of individual statement cells.

use crate::error::RowError;
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Layouts seen in broker statements. The statement's wall-clock offset is
/// applied to all of them.
const NAIVE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y.%m.%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M",
];

pub fn parse_decimal(column: &'static str, raw: &str) -> Result<Decimal, RowError> {
    let value = raw.trim();
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .map_err(|_| RowError::InvalidNumber {
            column,
            value: raw.to_string(),
        })
}

/// Parses a closing quantity such as `"2.50 Lots"`.
pub fn parse_volume(column: &'static str, raw: &str) -> Result<Decimal, RowError> {
    let value = raw.trim();
    let value = value.strip_suffix("Lots").unwrap_or(value);
    parse_decimal(column, value)
}

/// Parses a balance such as `"10,234.56 "` or `"10 234.56"`.
pub fn parse_balance(column: &'static str, raw: &str) -> Result<Decimal, RowError> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();
    parse_decimal(column, &cleaned).map_err(|_| RowError::InvalidNumber {
        column,
        value: raw.to_string(),
    })
}

/// Parses a closing time written in the statement's wall clock.
///
/// RFC 3339 values carry their own offset and are taken as-is.
pub fn parse_closing_time(raw: &str, offset: FixedOffset) -> Result<DateTime<Utc>, RowError> {
    let value = raw.trim();
    if let Ok(time) = DateTime::parse_from_rfc3339(value) {
        return Ok(time.with_timezone(&Utc));
    }

    NAIVE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .and_then(|naive| offset.from_local_datetime(&naive).single())
        .map(|time| time.with_timezone(&Utc))
        .ok_or_else(|| RowError::InvalidTime(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn utc8() -> FixedOffset {
        FixedOffset::east_opt(8 * 3600).unwrap()
    }

    #[test]
    fn volume_strips_lots_suffix() {
        assert_eq!(parse_volume("Closing Quantity", "2.50 Lots").unwrap(), dec!(2.5));
        assert_eq!(parse_volume("Closing Quantity", "0.01").unwrap(), dec!(0.01));
    }

    #[test]
    fn balance_strips_separators_and_whitespace() {
        assert_eq!(parse_balance("Balance USD", "10,234.56 ").unwrap(), dec!(10234.56));
        assert_eq!(parse_balance("Balance USD", " 1 000 000.5").unwrap(), dec!(1000000.5));
    }

    #[test]
    fn invalid_numbers_keep_the_raw_value() {
        assert_eq!(
            parse_decimal("Net USD", "n/a"),
            Err(RowError::InvalidNumber {
                column: "Net USD",
                value: "n/a".to_string()
            })
        );
        assert!(parse_decimal("Net USD", "").is_err());
    }

    #[test]
    fn closing_time_applies_statement_offset() {
        let time = parse_closing_time("2024/10/27 14:30:00", utc8()).unwrap();
        assert_eq!(time.to_rfc3339(), "2024-10-27T06:30:00+00:00");

        let time = parse_closing_time("2024-10-27 14:30:00.250", utc8()).unwrap();
        assert_eq!(time.timestamp_millis() % 1000, 250);
    }

    #[test]
    fn closing_time_honours_explicit_offset() {
        let time = parse_closing_time("2024-10-27T14:30:00Z", utc8()).unwrap();
        assert_eq!(time.to_rfc3339(), "2024-10-27T14:30:00+00:00");
    }

    #[test]
    fn closing_time_rejects_garbage() {
        assert_eq!(
            parse_closing_time("yesterday", utc8()),
            Err(RowError::InvalidTime("yesterday".to_string()))
        );
        assert!(parse_closing_time("2024-13-45 25:61:00", utc8()).is_err());
    }
}
