use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::assets::AssetKind;

/// One asset-class bucket of the allocation table.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssetAllocation {
    pub kind: AssetKind,
    pub value: Decimal,
    /// Number of holdings in the bucket.
    pub count: usize,
    /// Share of total portfolio value, in percent. Buckets of a non-empty
    /// portfolio sum to ~100 within floating tolerance.
    pub percentage: Decimal,
}
