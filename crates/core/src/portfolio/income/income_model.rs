use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A cash dividend event, per share, in the holding's currency.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DividendRecord {
    pub date: NaiveDate,
    pub amount_per_share: Decimal,
}

/// One point of the dividend-reinvested total-return curve.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReinvestedPricePoint {
    pub date: NaiveDate,
    /// Value of the simulated position: `total_shares * close`.
    pub adjusted_value: Decimal,
    pub total_shares: Decimal,
    /// Total return versus the first price, in percent.
    pub return_percent: Decimal,
}
