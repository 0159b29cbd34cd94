use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::constants::{DAYS_PER_YEAR, TRADING_DAYS_PER_YEAR};

/// Configuration for performance statistics. Passed explicitly into every
/// function; the engine keeps no ambient state.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetricsConfig {
    /// Annual risk-free rate used by Sharpe and Sortino.
    pub risk_free_rate: Decimal,
    /// Annualization factor for daily return statistics.
    pub trading_days_per_year: u32,
    /// Calendar day-count basis for CAGR and XIRR.
    pub days_per_year: u32,
    /// Minimum aligned asset/benchmark dates required for beta.
    pub min_beta_observations: usize,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        MetricsConfig {
            risk_free_rate: dec!(0.025),
            trading_days_per_year: TRADING_DAYS_PER_YEAR,
            days_per_year: DAYS_PER_YEAR,
            min_beta_observations: 30,
        }
    }
}

/// Partial-results metrics object. Every field is independent: a metric
/// that cannot be computed from the given data is `None` and never blocks
/// the others. No field is ever NaN or infinite.
///
/// CAGR, XIRR and volatility are annualized fractions; max drawdown is a
/// percentage in [-100, 0].
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    pub cagr: Option<Decimal>,
    pub xirr: Option<Decimal>,
    pub max_drawdown: Option<Decimal>,
    pub volatility: Option<Decimal>,
    pub sharpe_ratio: Option<Decimal>,
    pub sortino_ratio: Option<Decimal>,
    pub beta: Option<Decimal>,
}
