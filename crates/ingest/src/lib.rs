//! # Statement Ingestion
//!
//! Turns broker statement exports (comma-delimited text with a single header
//! row somewhere in the blob) into normalized `TradeRecord`s.
//!
//! ## Behaviour
//!
//! - **Best effort:** the header is found by scanning for the `Symbol` and
//!   `Opening Direction` markers, columns are resolved by name, and rows that
//!   cannot be parsed are skipped. Nothing here returns an error to the caller.
//! - **Ordering:** trades come back most recent first.
//! - **Identity:** each trade's id is derived from its closing time, symbol,
//!   entry price and volume, so re-importing a statement is idempotent.
//! - **Excursions:** statements without `MAE USD` / `MFE USD` columns get
//!   synthesized placeholder values (see [`excursion::synthesize`]).

pub mod columns;
pub mod error;
pub mod excursion;
pub mod fields;
pub mod parser;

pub use error::RowError;
pub use parser::{DEFAULT_OFFSET_HOURS, ParseReport, SkippedRow, StatementParser, parse_report, parse_trades};
