//! Cash-flow-adjusted benchmark comparison curve.

mod benchmark_model;
mod benchmark_tracker;

pub use benchmark_model::*;
pub use benchmark_tracker::*;
