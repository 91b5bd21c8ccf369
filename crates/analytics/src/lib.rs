//! # Tradebook Analytics Engine
//!
//! This crate reduces collections of closed trades into performance metrics.
//! It is the "unbiased judge" of the journal.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of external systems.
//!   It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** The `AnalyticsEngine` is a stateless calculator. It takes
//!   a slice of trades as input and produces a `TradingStats` as output. Filters and
//!   offsets are passed in explicitly, which makes every function here trivial to test.
//!
//! ## Public API
//!
//! - `AnalyticsEngine` / `calculate_stats`: aggregate metrics for a set of trades.
//! - `TraderScore` / `Grade`: the weighted 0-100 score derived from `TradingStats`.
//! - `breakdown`: symbol filter, symbol list, equity curve, per-symbol P&L.
//! - `calendar`: daily P&L and the weekday/hour session heatmap.

// Declare the modules that constitute this crate.
pub mod breakdown;
pub mod calendar;
pub mod engine;
pub mod error;
pub mod grade;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use breakdown::{
    EquityPoint, SymbolFilter, SymbolPerformance, equity_curve, filter_by_symbol,
    symbol_performance, unique_symbols,
};
pub use calendar::{DailyPnl, SessionCell, SessionHeatmap, daily_pnl, offset_from_hours, session_heatmap};
pub use engine::{AnalyticsEngine, calculate_stats};
pub use error::AnalyticsError;
pub use grade::{Grade, TraderScore};
pub use report::TradingStats;
