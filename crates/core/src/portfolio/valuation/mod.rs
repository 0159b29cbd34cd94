//! Position valuation and portfolio summaries, per currency and unified.

mod valuation_calculator;
mod valuation_model;

pub use valuation_calculator::*;
pub use valuation_model::*;

#[cfg(test)]
mod valuation_calculator_tests;
