//! Price series model and date-indexed lookups.

mod market_data_model;

pub use market_data_model::*;
