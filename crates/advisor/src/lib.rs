//! # Tradebook Advisor Bridge
//!
//! The seam between the journal and the generative assistant. This crate
//! never talks to the network: it renders the text the assistant is given
//! and validates the JSON it sends back, so that nothing the assistant says
//! reaches a domain type unchecked.

pub mod correlation;
pub mod error;
pub mod prompt;
pub mod responses;

pub use correlation::{correlation_precheck, correlation_prompt, plan_assets};
pub use error::AdvisorError;
pub use prompt::{coaching_context, risk_diagnosis_context, trade_review_context};
pub use responses::{CorrelationAnalysis, UNKNOWN_SYMBOL, parse_correlation, parse_scanned_trade, strip_code_fences};
