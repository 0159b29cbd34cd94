//! Total-return simulation: dividends buy fractional shares at the next
//! available price.

use chrono::NaiveDate;
use log::debug;
use num_traits::Zero;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::constants::DECIMAL_PRECISION;
use crate::market_data::{normalize_price_series, PriceDataPoint};

use super::{DividendRecord, ReinvestedPricePoint};

/// Keeps only dividend events on or after the purchase date, sorted
/// ascending. Events before the position existed must not be reinvested.
pub fn filter_dividends(
    records: &[DividendRecord],
    purchase_date: NaiveDate,
) -> Vec<DividendRecord> {
    let mut filtered: Vec<DividendRecord> = records
        .iter()
        .filter(|r| r.date >= purchase_date)
        .copied()
        .collect();
    filtered.sort_by_key(|r| r.date);
    filtered
}

/// Total per-share dividends on or after `purchase_date`, scaled by the
/// held quantity.
pub fn dividends_collected(
    quantity: Decimal,
    purchase_date: NaiveDate,
    records: &[DividendRecord],
) -> Decimal {
    let per_share: Decimal = records
        .iter()
        .filter(|r| r.date >= purchase_date)
        .map(|r| r.amount_per_share)
        .sum();
    if quantity.is_zero() || per_share.is_zero() {
        return Decimal::zero();
    }
    quantity * per_share
}

/// Simulates a single-share position with dividend reinvestment.
///
/// Walks the price series in date order. Each dividend is processed at most
/// once, in date order, against the first price on or after its event date;
/// the per-share amount buys additional fractional shares at that price.
/// Every price point emits the simulated position value, so the output is a
/// total-return curve directly comparable to the raw price curve. Purely
/// derived from its inputs; identical inputs yield identical output.
pub fn simulate_reinvestment(
    prices: &[PriceDataPoint],
    dividends: &[DividendRecord],
) -> Vec<ReinvestedPricePoint> {
    let prices = normalize_price_series(prices.to_vec());
    if prices.is_empty() {
        return Vec::new();
    }

    let mut dividends = dividends.to_vec();
    dividends.sort_by_key(|d| d.date);

    let start_value = prices[0].close;
    let mut shares = Decimal::ONE;
    let mut next_dividend = 0;
    let mut curve = Vec::with_capacity(prices.len());

    for price in &prices {
        // Reinvest every pending dividend at this price: it is the first
        // one on or after the event date, since earlier points already
        // consumed everything due before them.
        while next_dividend < dividends.len() && dividends[next_dividend].date <= price.date {
            if price.close > Decimal::ZERO {
                shares += dividends[next_dividend].amount_per_share / price.close;
            } else {
                debug!(
                    "Skipping dividend reinvestment on {}: non-positive price {}",
                    price.date, price.close
                );
            }
            next_dividend += 1;
        }

        let adjusted_value = shares * price.close;
        let return_percent = if start_value > Decimal::ZERO {
            ((adjusted_value / start_value) - Decimal::ONE) * dec!(100)
        } else {
            Decimal::ZERO
        };

        curve.push(ReinvestedPricePoint {
            date: price.date,
            adjusted_value: adjusted_value.round_dp(DECIMAL_PRECISION),
            total_shares: shares,
            return_percent: return_percent.round_dp(DECIMAL_PRECISION),
        });
    }

    curve
}
