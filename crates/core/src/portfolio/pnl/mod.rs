//! Realized/unrealized P&L reconciliation from the trade ledger.

mod pnl_allocator;
mod pnl_model;

pub use pnl_allocator::*;
pub use pnl_model::*;
