use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::assets::AssetKind;
use crate::portfolio::valuation::HoldingValuation;

use super::AssetAllocation;

/// Buckets valuations by asset class. Percentages are relative to the
/// total current value and zero when the total is zero; callers that mix
/// currencies should pass unified valuations.
pub fn allocate_by_kind(valuations: &[HoldingValuation]) -> Vec<AssetAllocation> {
    let mut buckets: HashMap<AssetKind, (Decimal, usize)> = HashMap::new();
    for valuation in valuations {
        let bucket = buckets
            .entry(valuation.kind)
            .or_insert((Decimal::ZERO, 0));
        bucket.0 += valuation.current_value;
        bucket.1 += 1;
    }

    let total_value: Decimal = buckets.values().map(|(value, _)| *value).sum();

    let mut allocations: Vec<AssetAllocation> = buckets
        .into_iter()
        .map(|(kind, (value, count))| {
            let percentage = if total_value > Decimal::ZERO {
                value / total_value * dec!(100)
            } else {
                Decimal::ZERO
            };
            AssetAllocation {
                kind,
                value,
                count,
                percentage,
            }
        })
        .collect();

    // Largest bucket first; ties broken by name for stable output.
    allocations.sort_by(|a, b| {
        b.value
            .cmp(&a.value)
            .then_with(|| a.kind.as_str().cmp(b.kind.as_str()))
    });
    allocations
}
