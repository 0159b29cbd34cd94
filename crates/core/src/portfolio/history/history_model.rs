use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One day of raw portfolio history, as supplied by the collaborator.
///
/// `liquid_value`/`liquid_cash_flow` exclude illiquid asset classes and
/// treat purchases of those as withdrawals from the liquid sleeve, so risk
/// statistics are not distorted by illiquid marks. For any entry holding
/// illiquid positions, `liquid_value <= value`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioHistoryEntry {
    pub date: NaiveDate,
    /// Market value plus cash at close of day.
    pub value: Decimal,
    /// Cumulative capital put in as of this day.
    pub invested: Decimal,
    /// External flow recorded on this day; deposits positive,
    /// withdrawals negative.
    pub cash_flow: Decimal,
    pub liquid_value: Decimal,
    pub liquid_cash_flow: Decimal,
}

/// Which (value, cash flow) pair of the raw history to adjust.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueBasis {
    Total,
    /// Liquid sleeve only; use this for volatility-family statistics.
    Liquid,
}

/// One day of the flow-neutral index derived from the raw history.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdjustedValuePoint {
    pub date: NaiveDate,
    /// Index compounded from daily returns, seeded at the first positive
    /// raw value.
    pub adjusted_value: Decimal,
    pub daily_return: Decimal,
}
