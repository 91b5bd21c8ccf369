use thiserror::Error;

/// Why a single statement row was not turned into a trade.
///
/// These never escape `parse_trades`; they are only surfaced through the
/// `ParseReport` for diagnostics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("Row has {0} columns, at least 8 are required")]
    TooFewColumns(usize),

    #[error("Header has no '{0}' column")]
    MissingColumn(&'static str),

    #[error("Row has no value for column '{0}'")]
    MissingField(&'static str),

    #[error("Invalid number in column '{column}': '{value}'")]
    InvalidNumber { column: &'static str, value: String },

    #[error("Unparseable closing time: '{0}'")]
    InvalidTime(String),

    #[error("Invalid direction: '{0}'")]
    InvalidDirection(String),

    #[error("Malformed row: {0}")]
    Malformed(String),
}
