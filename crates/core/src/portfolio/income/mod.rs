//! Dividend records and the reinvestment simulator.

mod dividend_simulator;
mod income_model;

pub use dividend_simulator::*;
pub use income_model::*;
