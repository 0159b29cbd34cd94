//! Asset and holding models.

mod assets_model;

pub use assets_model::*;
