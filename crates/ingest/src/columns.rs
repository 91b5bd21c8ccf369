use crate::error::RowError;

pub const SYMBOL: &str = "Symbol";
pub const OPENING_DIRECTION: &str = "Opening Direction";
pub const CLOSING_TIME: &str = "Closing Time (UTC+8)";
pub const ENTRY_PRICE: &str = "Entry price";
pub const CLOSING_PRICE: &str = "Closing Price";
pub const CLOSING_QUANTITY: &str = "Closing Quantity";
pub const NET_USD: &str = "Net USD";
pub const BALANCE_USD: &str = "Balance USD";
pub const MAE_USD: &str = "MAE USD";
pub const MFE_USD: &str = "MFE USD";

/// Rows shorter than this are never trades.
pub const MIN_COLUMNS: usize = 8;

/// True when a line carries the minimum signature of a statement header.
pub fn is_header(line: &str) -> bool {
    line.contains(SYMBOL) && line.contains(OPENING_DIRECTION)
}

/// Column positions resolved by name from the header row, so exports with a
/// different column order still parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    symbol: Option<usize>,
    direction: Option<usize>,
    time: Option<usize>,
    entry: Option<usize>,
    closing: Option<usize>,
    volume: Option<usize>,
    net_pl: Option<usize>,
    balance: Option<usize>,
    pub mae: Option<usize>,
    pub mfe: Option<usize>,
}

impl ColumnMap {
    pub fn from_header<'a>(headers: impl IntoIterator<Item = &'a str>) -> Self {
        let headers: Vec<&str> = headers.into_iter().map(str::trim).collect();
        let find = |name: &str| headers.iter().position(|h| *h == name);

        Self {
            symbol: find(SYMBOL),
            direction: find(OPENING_DIRECTION),
            time: find(CLOSING_TIME),
            entry: find(ENTRY_PRICE),
            closing: find(CLOSING_PRICE),
            volume: find(CLOSING_QUANTITY),
            net_pl: find(NET_USD),
            balance: find(BALANCE_USD),
            mae: find(MAE_USD),
            mfe: find(MFE_USD),
        }
    }

    pub fn symbol(&self) -> Result<usize, RowError> {
        self.symbol.ok_or(RowError::MissingColumn(SYMBOL))
    }

    pub fn direction(&self) -> Result<usize, RowError> {
        self.direction.ok_or(RowError::MissingColumn(OPENING_DIRECTION))
    }

    pub fn time(&self) -> Result<usize, RowError> {
        self.time.ok_or(RowError::MissingColumn(CLOSING_TIME))
    }

    pub fn entry(&self) -> Result<usize, RowError> {
        self.entry.ok_or(RowError::MissingColumn(ENTRY_PRICE))
    }

    pub fn closing(&self) -> Result<usize, RowError> {
        self.closing.ok_or(RowError::MissingColumn(CLOSING_PRICE))
    }

    pub fn volume(&self) -> Result<usize, RowError> {
        self.volume.ok_or(RowError::MissingColumn(CLOSING_QUANTITY))
    }

    pub fn net_pl(&self) -> Result<usize, RowError> {
        self.net_pl.ok_or(RowError::MissingColumn(NET_USD))
    }

    pub fn balance(&self) -> Result<usize, RowError> {
        self.balance.ok_or(RowError::MissingColumn(BALANCE_USD))
    }
}
