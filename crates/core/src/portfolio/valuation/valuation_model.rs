use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::assets::AssetKind;

/// Valuation of one holding in its own currency (or, after unification,
/// in the reporting currency).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HoldingValuation {
    pub symbol: String,
    pub kind: AssetKind,
    pub currency: String,
    pub quantity: Decimal,
    /// `quantity * purchase_price`
    pub invested: Decimal,
    /// `quantity * current_price`
    pub current_value: Decimal,
    pub gain_loss: Decimal,
    /// Zero when nothing was invested, never a division blowup.
    pub gain_loss_percent: Decimal,
}

/// Aggregate over a set of holdings sharing one currency.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub currency: String,
    pub current_value: Decimal,
    pub total_invested: Decimal,
    pub total_gain_loss: Decimal,
    pub total_gain_loss_percent: Decimal,
    pub holdings_count: usize,
    pub dividends_collected: Decimal,
}

impl PortfolioSummary {
    /// Explicit zero-filled summary; an empty portfolio is a result, not
    /// an error.
    pub fn empty(currency: impl Into<String>) -> Self {
        PortfolioSummary {
            currency: currency.into(),
            current_value: Decimal::ZERO,
            total_invested: Decimal::ZERO,
            total_gain_loss: Decimal::ZERO,
            total_gain_loss_percent: Decimal::ZERO,
            holdings_count: 0,
            dividends_collected: Decimal::ZERO,
        }
    }
}
