//! Converts raw daily (value, cash-flow) history into a flow-neutral index
//! whose returns reflect market performance only, not deposit timing.

use rust_decimal::Decimal;

use crate::constants::DECIMAL_PRECISION;

use super::{AdjustedValuePoint, PortfolioHistoryEntry, ValueBasis};

/// Sorts history ascending by date and drops duplicate days, keeping the
/// last entry recorded for each date. History is append-only upstream, so
/// this is normally a no-op.
pub fn normalize_history(mut entries: Vec<PortfolioHistoryEntry>) -> Vec<PortfolioHistoryEntry> {
    entries.sort_by_key(|e| e.date);
    entries.dedup_by(|next, prev| {
        if next.date == prev.date {
            *prev = *next;
            true
        } else {
            false
        }
    });
    entries
}

fn basis_value(entry: &PortfolioHistoryEntry, basis: ValueBasis) -> Decimal {
    match basis {
        ValueBasis::Total => entry.value,
        ValueBasis::Liquid => entry.liquid_value,
    }
}

fn basis_cash_flow(entry: &PortfolioHistoryEntry, basis: ValueBasis) -> Decimal {
    match basis {
        ValueBasis::Total => entry.cash_flow,
        ValueBasis::Liquid => entry.liquid_cash_flow,
    }
}

/// Builds the cash-flow-adjusted value series for the chosen basis.
///
/// The day's raw return is `(value_t - (value_{t-1} + cash_flow_t)) /
/// value_{t-1}` when the previous value is positive, and 0 otherwise: a day
/// starting from a zero or negative basis has no defined percentage return,
/// and must not poison the compounding that follows. Returns compound onto
/// an index seeded at the first positive value; days before that seed are
/// skipped. Purely derived from its input, so the series can be recomputed
/// from scratch at any time.
pub fn build_adjusted_series(
    entries: &[PortfolioHistoryEntry],
    basis: ValueBasis,
) -> Vec<AdjustedValuePoint> {
    let entries = normalize_history(entries.to_vec());

    let Some(start) = entries
        .iter()
        .position(|e| basis_value(e, basis) > Decimal::ZERO)
    else {
        return Vec::new();
    };

    let mut points = Vec::with_capacity(entries.len() - start);
    let mut index = basis_value(&entries[start], basis);
    points.push(AdjustedValuePoint {
        date: entries[start].date,
        adjusted_value: index.round_dp(DECIMAL_PRECISION),
        daily_return: Decimal::ZERO,
    });

    for window in entries[start..].windows(2) {
        let prev_value = basis_value(&window[0], basis);
        let value = basis_value(&window[1], basis);
        let cash_flow = basis_cash_flow(&window[1], basis);

        let daily_return = if prev_value > Decimal::ZERO {
            (value - (prev_value + cash_flow)) / prev_value
        } else {
            // Zero-basis safeguard.
            Decimal::ZERO
        };

        index *= Decimal::ONE + daily_return;
        points.push(AdjustedValuePoint {
            date: window[1].date,
            adjusted_value: index.round_dp(DECIMAL_PRECISION),
            daily_return: daily_return.round_dp(DECIMAL_PRECISION),
        });
    }

    points
}
