/// Decimal precision for valuation calculations
pub const DECIMAL_PRECISION: u32 = 6;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Trading days per year, used to annualize daily return statistics
pub const TRADING_DAYS_PER_YEAR: u32 = 252;

/// Calendar day-count basis for CAGR and money-weighted return calculations
pub const DAYS_PER_YEAR: u32 = 365;

/// Quantity threshold for significant positions
pub const QUANTITY_THRESHOLD: &str = "0.00000001";
