//! Currency unification over a caller-supplied exchange-rate map.

mod currency_converter;
mod fx_errors;
mod fx_model;

pub use currency_converter::*;
pub use fx_errors::*;
pub use fx_model::*;
