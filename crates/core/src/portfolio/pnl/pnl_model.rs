use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::QUANTITY_THRESHOLD;

/// Whether a quantity is large enough to keep as an open lot. Proportional
/// cost splits can leave sub-satoshi residues behind a near-total sell.
pub fn is_quantity_significant(quantity: &Decimal) -> bool {
    let threshold =
        Decimal::from_str_radix(QUANTITY_THRESHOLD, 10).unwrap_or_else(|_| Decimal::new(1, 8));
    quantity.abs() >= threshold
}

/// An open acquisition lot. Cost basis is the total paid for the lot,
/// including buy-side fees.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TradeLot {
    pub quantity: Decimal,
    pub cost_basis: Decimal,
    pub acquisition_date: NaiveDate,
}

/// P&L reconciliation for one `KIND:symbol:currency` key.
///
/// `realized_pnl + unrealized_pnl == total_pnl` always holds, for open and
/// fully-closed positions alike; a closed position has zero unrealized.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssetPnl {
    pub asset_key: String,
    pub realized_pnl: Decimal,
    pub unrealized_pnl: Decimal,
    pub total_pnl: Decimal,
    /// Cumulative buy cost from the ledger, the ROI denominator for
    /// positions with no open holding left.
    pub invested_from_trades: Decimal,
    pub open_quantity: Decimal,
    /// Remaining lots after FIFO relief, oldest first.
    pub open_lots: Vec<TradeLot>,
    pub roi_percent: Decimal,
}

/// Portfolio-wide P&L rollup across all asset keys, closed ones included.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PnlReport {
    pub assets: Vec<AssetPnl>,
    pub total_realized: Decimal,
    pub total_unrealized: Decimal,
    pub total_pnl: Decimal,
}
