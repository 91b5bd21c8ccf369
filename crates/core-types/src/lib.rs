pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{Direction, PlanTimeframe};
pub use error::CoreError;
pub use structs::{
    AnnotatedTrade, ManualEntry, TradeAnnotation, TradeRecord, TradingPlan, exit_efficiency,
    trade_id,
};
