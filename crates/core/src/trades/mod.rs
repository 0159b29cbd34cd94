//! Trade ledger model - the append-only record realized P&L and cash
//! flows are derived from.

mod trades_model;

pub use trades_model::*;
