use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One day of the simulated benchmark position.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkPoint {
    pub date: NaiveDate,
    /// Notional value of the simulated benchmark position in the
    /// reporting currency; directly comparable to the portfolio value.
    pub value: Decimal,
    pub shares: Decimal,
}
