pub mod allocation;
pub mod benchmark;
pub mod history;
pub mod income;
pub mod performance;
pub mod pnl;
pub mod valuation;

pub use allocation::*;
pub use benchmark::*;
pub use history::*;
pub use income::*;
pub use performance::*;
pub use pnl::*;
pub use valuation::*;
