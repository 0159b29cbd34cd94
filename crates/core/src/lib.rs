//! Quantfolio Core - portfolio analytics engine.
//!
//! Pure, synchronous transformations from holdings, the trade ledger, and
//! price series into valuations, cash-flow-adjusted return series, risk
//! statistics, dividend-reinvested total return, and currency-unified
//! benchmark comparisons. The surrounding application fetches and persists
//! data; this crate only computes. Every function is idempotent and keeps
//! no state between calls, so callers may parallelize invocations freely.

pub mod assets;
pub mod constants;
pub mod errors;
pub mod fx;
pub mod market_data;
pub mod portfolio;
pub mod trades;

// Re-export common types from the asset and portfolio modules
pub use assets::*;
pub use portfolio::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
