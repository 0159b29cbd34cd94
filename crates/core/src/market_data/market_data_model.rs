use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One daily closing price, keyed by exchange-local calendar day.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceDataPoint {
    pub date: NaiveDate,
    pub close: Decimal,
}

/// Sorts a price series ascending by date and de-duplicates per calendar
/// day, keeping the last point recorded for each date.
///
/// Callers are expected to hand the engine clean series, but sorting here
/// is cheap enough to do defensively.
pub fn normalize_price_series(mut series: Vec<PriceDataPoint>) -> Vec<PriceDataPoint> {
    series.sort_by_key(|p| p.date);
    series.dedup_by(|next, prev| {
        if next.date == prev.date {
            // Later entry wins for the same day.
            prev.close = next.close;
            true
        } else {
            false
        }
    });
    series
}

/// Most recent close on or before `date`. Gaps in a series are resolved by
/// carrying the prior point forward, never by interpolation.
///
/// Requires `series` sorted ascending (see [`normalize_price_series`]).
pub fn close_on_or_before(series: &[PriceDataPoint], date: NaiveDate) -> Option<Decimal> {
    let idx = series.partition_point(|p| p.date <= date);
    if idx == 0 {
        None
    } else {
        Some(series[idx - 1].close)
    }
}
