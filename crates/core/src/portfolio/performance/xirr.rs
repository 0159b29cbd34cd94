//! Money-weighted return over an irregular cash-flow schedule.
//!
//! This is a generic root-finder with no dependency on portfolio types:
//! given signed flows (money in negative, money out and terminal value
//! positive), it finds the annualized discount rate that zeroes the
//! schedule's net present value.

use chrono::NaiveDate;
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// One dated, signed cash flow.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CashFlow {
    pub date: NaiveDate,
    pub amount: Decimal,
}

const MAX_NEWTON_ITERATIONS: usize = 100;
const MAX_BISECTION_ITERATIONS: usize = 200;
const RATE_TOLERANCE: Decimal = dec!(0.0000001);
const NPV_TOLERANCE: Decimal = dec!(0.000001);
/// Bisection bracket: -99% to +1000% annualized.
const MIN_RATE: Decimal = dec!(-0.99);
const MAX_RATE: Decimal = dec!(10);
const DAYS_PER_YEAR: Decimal = dec!(365);

/// Net present value of the schedule at `rate`, discounting each flow by
/// `(1 + rate)^(days/365)` from the earliest flow date. `None` when the
/// rate cannot be evaluated (base <= 0, or the power over/underflows).
fn net_present_value(flows: &[CashFlow], t0: NaiveDate, rate: Decimal) -> Option<Decimal> {
    let base = Decimal::ONE + rate;
    if base <= Decimal::ZERO {
        return None;
    }

    let mut npv = Decimal::ZERO;
    for flow in flows {
        let years = Decimal::from((flow.date - t0).num_days()) / DAYS_PER_YEAR;
        let factor = base.checked_powd(years)?;
        if factor.is_zero() {
            return None;
        }
        npv = npv.checked_add(flow.amount.checked_div(factor)?)?;
    }
    Some(npv)
}

/// Analytic derivative of the NPV with respect to the rate:
/// `d/dr [cf * (1+r)^(-y)] = -y * cf * (1+r)^(-y-1)`.
fn npv_derivative(flows: &[CashFlow], t0: NaiveDate, rate: Decimal) -> Option<Decimal> {
    let base = Decimal::ONE + rate;
    if base <= Decimal::ZERO {
        return None;
    }

    let mut derivative = Decimal::ZERO;
    for flow in flows {
        let years = Decimal::from((flow.date - t0).num_days()) / DAYS_PER_YEAR;
        if years.is_zero() {
            continue;
        }
        let factor = base.checked_powd(years + Decimal::ONE)?;
        if factor.is_zero() {
            return None;
        }
        let term = (years * flow.amount).checked_div(factor)?;
        derivative = derivative.checked_sub(term)?;
    }
    Some(derivative)
}

fn newton_raphson(flows: &[CashFlow], t0: NaiveDate) -> Option<Decimal> {
    let mut rate = dec!(0.1);

    for _ in 0..MAX_NEWTON_ITERATIONS {
        let npv = net_present_value(flows, t0, rate)?;
        if npv.abs() < NPV_TOLERANCE {
            return Some(rate);
        }

        let derivative = npv_derivative(flows, t0, rate)?;
        if derivative.is_zero() {
            return None;
        }

        let next = rate.checked_sub(npv.checked_div(derivative)?)?;
        if next <= Decimal::NEGATIVE_ONE {
            // Stepped out of the evaluable domain; hand over to bisection.
            return None;
        }
        if (next - rate).abs() < RATE_TOLERANCE {
            return Some(next);
        }
        rate = next;
    }

    None
}

fn bisection(flows: &[CashFlow], t0: NaiveDate) -> Option<Decimal> {
    let mut low = MIN_RATE;
    let mut high = MAX_RATE;
    let mut npv_low = net_present_value(flows, t0, low)?;
    let npv_high = net_present_value(flows, t0, high)?;

    if npv_low.abs() < NPV_TOLERANCE {
        return Some(low);
    }
    if npv_high.abs() < NPV_TOLERANCE {
        return Some(high);
    }
    // No root bracketed in the bounded rate range.
    if (npv_low.is_sign_negative()) == (npv_high.is_sign_negative()) {
        return None;
    }

    for _ in 0..MAX_BISECTION_ITERATIONS {
        let mid = (low + high) / dec!(2);
        let npv_mid = net_present_value(flows, t0, mid)?;

        if npv_mid.abs() < NPV_TOLERANCE || (high - low) / dec!(2) < RATE_TOLERANCE {
            return Some(mid);
        }

        if npv_mid.is_sign_negative() == npv_low.is_sign_negative() {
            low = mid;
            npv_low = npv_mid;
        } else {
            high = mid;
        }
    }

    None
}

/// Annualized money-weighted return of an irregular cash-flow schedule.
///
/// Tries Newton-Raphson with an analytic derivative first; when that
/// diverges, oscillates past its iteration budget, or hits a non-evaluable
/// rate, falls back to bisection over [-99%, +1000%]. Returns `None` for
/// degenerate schedules: fewer than two flows, all flows of one sign, or
/// both solvers failing.
pub fn xirr(flows: &[CashFlow]) -> Option<Decimal> {
    if flows.len() < 2 {
        return None;
    }

    let any_positive = flows.iter().any(|f| f.amount > Decimal::ZERO);
    let any_negative = flows.iter().any(|f| f.amount < Decimal::ZERO);
    if !any_positive || !any_negative {
        return None;
    }

    let t0 = flows.iter().map(|f| f.date).min()?;

    newton_raphson(flows, t0).or_else(|| bisection(flows, t0))
}
