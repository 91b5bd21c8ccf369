use crate::columns::{self, ColumnMap, MIN_COLUMNS};
use crate::error::RowError;
use crate::excursion;
use crate::fields;
use chrono::{FixedOffset, Offset, Utc};
use core_types::{Direction, TradeRecord, exit_efficiency, trade_id};
use csv::{ReaderBuilder, StringRecord};

/// Hours east of UTC that the supported statement format writes its
/// closing times in, matching its `Closing Time (UTC+8)` column.
pub const DEFAULT_OFFSET_HOURS: i32 = 8;

/// A row that was dropped during ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line number within the trimmed statement text.
    pub line: usize,
    pub reason: RowError,
}

/// Everything the parser learned from one statement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    /// 1-based line number of the header, `None` if the text is not a statement.
    pub header_line: Option<usize>,
    /// Parsed trades, most recent first.
    pub trades: Vec<TradeRecord>,
    pub skipped: Vec<SkippedRow>,
}

impl ParseReport {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Converts broker statement exports into trade records.
///
/// Parsing is best-effort: the header is located anywhere in the text,
/// columns are resolved by name, and any row that cannot be turned into a
/// trade is dropped without failing the import.
#[derive(Debug, Clone, Copy)]
pub struct StatementParser {
    offset: FixedOffset,
}

impl Default for StatementParser {
    fn default() -> Self {
        Self::with_offset_hours(DEFAULT_OFFSET_HOURS).unwrap_or(Self { offset: Utc.fix() })
    }
}

impl StatementParser {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Returns `None` when `hours` is not a valid UTC offset.
    pub fn with_offset_hours(hours: i32) -> Option<Self> {
        hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .map(Self::new)
    }

    /// Parses a statement and returns its trades, most recent first.
    ///
    /// Returns an empty vector when the text has no recognizable header.
    pub fn parse_trades(&self, text: &str) -> Vec<TradeRecord> {
        self.parse(text).trades
    }

    /// Parses a statement, keeping track of every row that was skipped.
    pub fn parse(&self, text: &str) -> ParseReport {
        let lines: Vec<&str> = text.trim().lines().collect();

        let Some(header_idx) = lines.iter().position(|line| columns::is_header(line)) else {
            tracing::debug!(lines = lines.len(), "No statement header found.");
            return ParseReport::default();
        };

        let header = match tokenize(lines[header_idx]) {
            Ok(record) => record,
            Err(e) => {
                tracing::debug!(error = %e, "Statement header could not be tokenized.");
                return ParseReport::default();
            }
        };
        let columns = ColumnMap::from_header(header.iter());
        tracing::debug!(line = header_idx + 1, ?columns, "Located statement header.");

        let mut report = ParseReport {
            header_line: Some(header_idx + 1),
            ..ParseReport::default()
        };

        for (idx, line) in lines.iter().enumerate().skip(header_idx + 1) {
            if line.trim().is_empty() {
                continue;
            }

            match tokenize(line).and_then(|record| self.build_trade(&record, &columns)) {
                Ok(trade) => report.trades.push(trade),
                Err(reason) => {
                    tracing::debug!(line = idx + 1, %reason, "Skipping statement row.");
                    report.skipped.push(SkippedRow { line: idx + 1, reason });
                }
            }
        }

        // Downstream balance lookups read the first element as the latest trade.
        report.trades.sort_by(|a, b| b.time.cmp(&a.time));

        tracing::debug!(
            parsed = report.trades.len(),
            skipped = report.skipped.len(),
            "Statement parsed."
        );
        report
    }

    fn build_trade(&self, record: &StringRecord, columns: &ColumnMap) -> Result<TradeRecord, RowError> {
        if record.len() < MIN_COLUMNS {
            return Err(RowError::TooFewColumns(record.len()));
        }

        let field = |index: usize, column: &'static str| {
            record
                .get(index)
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .ok_or(RowError::MissingField(column))
        };
        let optional = |index: Option<usize>, column: &'static str| {
            index
                .and_then(|i| record.get(i))
                .and_then(|raw| fields::parse_decimal(column, raw).ok())
        };

        let symbol = field(columns.symbol()?, columns::SYMBOL)?.to_string();

        let raw_direction = field(columns.direction()?, columns::OPENING_DIRECTION)?;
        let direction: Direction = raw_direction
            .parse()
            .map_err(|_| RowError::InvalidDirection(raw_direction.to_string()))?;

        let time = fields::parse_closing_time(field(columns.time()?, columns::CLOSING_TIME)?, self.offset)?;

        let entry_price = fields::parse_decimal(
            columns::ENTRY_PRICE,
            field(columns.entry()?, columns::ENTRY_PRICE)?,
        )?;
        let closing_price = fields::parse_decimal(
            columns::CLOSING_PRICE,
            field(columns.closing()?, columns::CLOSING_PRICE)?,
        )?;
        let volume = fields::parse_volume(
            columns::CLOSING_QUANTITY,
            field(columns.volume()?, columns::CLOSING_QUANTITY)?,
        )?;
        let net_pl = fields::parse_decimal(columns::NET_USD, field(columns.net_pl()?, columns::NET_USD)?)?;
        let balance = fields::parse_balance(
            columns::BALANCE_USD,
            field(columns.balance()?, columns::BALANCE_USD)?,
        )?;

        let (mae, mfe) = excursion::synthesize(
            net_pl,
            optional(columns.mae, columns::MAE_USD),
            optional(columns.mfe, columns::MFE_USD),
        )?;

        Ok(TradeRecord {
            id: trade_id(time, &symbol, entry_price, volume),
            symbol,
            direction,
            time,
            entry_price,
            closing_price,
            volume,
            net_pl,
            balance,
            mae: Some(mae),
            mfe: Some(mfe),
            exit_efficiency: exit_efficiency(net_pl, Some(mfe)),
        })
    }
}

/// Parses a statement written in the default UTC+8 wall clock.
pub fn parse_trades(text: &str) -> Vec<TradeRecord> {
    StatementParser::default().parse_trades(text)
}

/// Like [`parse_trades`], but also reports which rows were skipped and why.
pub fn parse_report(text: &str) -> ParseReport {
    StatementParser::default().parse(text)
}

fn tokenize(line: &str) -> Result<StringRecord, RowError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());

    match reader.records().next() {
        Some(Ok(record)) => Ok(record),
        Some(Err(e)) => Err(RowError::Malformed(e.to_string())),
        None => Err(RowError::TooFewColumns(0)),
    }
}
