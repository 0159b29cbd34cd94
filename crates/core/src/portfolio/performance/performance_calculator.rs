//! Risk and performance statistics over the cash-flow-adjusted history.
//!
//! Every function is pure and returns `None` instead of NaN or infinity on
//! degenerate input. A metric that cannot be computed never prevents the
//! others from being computed.

use std::collections::HashMap;

use chrono::NaiveDate;
use log::debug;
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

use crate::constants::DECIMAL_PRECISION;
use crate::market_data::{normalize_price_series, PriceDataPoint};
use crate::portfolio::history::AdjustedValuePoint;

use super::{xirr, CashFlow, MetricsConfig, PerformanceMetrics};

/// Absurd-growth guard for CAGR: anything above 10^6 percent annualized is
/// treated as a numerically meaningless artifact of a tiny time span.
const MAX_SANE_CAGR: Decimal = dec!(10000);

fn mean(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    let sum: Decimal = values.iter().sum();
    Some(sum / Decimal::from(values.len()))
}

/// Sample standard deviation; `None` below two observations.
fn sample_std_dev(values: &[Decimal]) -> Option<Decimal> {
    if values.len() < 2 {
        return None;
    }
    let avg = mean(values)?;
    let sum_squared_diff: Decimal = values
        .iter()
        .map(|v| {
            let diff = *v - avg;
            diff * diff
        })
        .sum();
    let variance = sum_squared_diff / Decimal::from(values.len() - 1);
    variance.sqrt()
}

/// Daily returns of the adjusted series, excluding the seed point.
pub fn daily_returns(points: &[AdjustedValuePoint]) -> Vec<Decimal> {
    points.iter().skip(1).map(|p| p.daily_return).collect()
}

/// Compound annual growth rate between the first positive point and the
/// last point of the adjusted series.
///
/// Requires a span of at least one day; the result is discarded when the
/// exponentiation fails or the growth rate is absurd.
pub fn cagr(points: &[AdjustedValuePoint], config: &MetricsConfig) -> Option<Decimal> {
    let start = points.iter().find(|p| p.adjusted_value > Decimal::ZERO)?;
    let end = points.last()?;

    let days = (end.date - start.date).num_days();
    if days < 1 {
        return None;
    }
    let years = Decimal::from(days) / Decimal::from(config.days_per_year);

    if end.adjusted_value <= Decimal::ZERO {
        return None;
    }
    let ratio = end.adjusted_value / start.adjusted_value;
    let growth = ratio.checked_powd(Decimal::ONE / years)? - Decimal::ONE;

    if growth > MAX_SANE_CAGR {
        debug!("Discarding absurd CAGR {growth} over {days} days");
        return None;
    }
    Some(growth.round_dp(DECIMAL_PRECISION))
}

/// Annualized volatility: sample standard deviation of daily returns
/// scaled by the square root of the trading-day count.
pub fn annualized_volatility(
    returns: &[Decimal],
    config: &MetricsConfig,
) -> Option<Decimal> {
    let daily = sample_std_dev(returns)?;
    let factor = Decimal::from(config.trading_days_per_year).sqrt()?;
    Some((daily * factor).round_dp(DECIMAL_PRECISION))
}

/// Sharpe ratio: annualized excess return over annualized volatility.
/// `None` when volatility is zero (the ratio is undefined, not infinite).
pub fn sharpe_ratio(returns: &[Decimal], config: &MetricsConfig) -> Option<Decimal> {
    let volatility = annualized_volatility(returns, config)?;
    if volatility.is_zero() {
        return None;
    }
    let annualized_mean = mean(returns)? * Decimal::from(config.trading_days_per_year);
    Some(((annualized_mean - config.risk_free_rate) / volatility).round_dp(DECIMAL_PRECISION))
}

/// Sortino ratio: like Sharpe, but the denominator is the annualized
/// deviation of negative daily returns only. `None` when the window has no
/// negative-return days, or when the downside deviation is zero.
pub fn sortino_ratio(returns: &[Decimal], config: &MetricsConfig) -> Option<Decimal> {
    if returns.is_empty() {
        return None;
    }
    let negatives: Vec<Decimal> = returns
        .iter()
        .filter(|r| **r < Decimal::ZERO)
        .copied()
        .collect();
    if negatives.is_empty() {
        return None;
    }

    let avg = mean(&negatives)?;
    let sum_squared_diff: Decimal = negatives
        .iter()
        .map(|v| {
            let diff = *v - avg;
            diff * diff
        })
        .sum();
    let downside_daily = (sum_squared_diff / Decimal::from(negatives.len())).sqrt()?;
    let downside = downside_daily * Decimal::from(config.trading_days_per_year).sqrt()?;
    if downside.is_zero() {
        return None;
    }

    let annualized_mean = mean(returns)? * Decimal::from(config.trading_days_per_year);
    Some(((annualized_mean - config.risk_free_rate) / downside).round_dp(DECIMAL_PRECISION))
}

/// Maximum drawdown of the adjusted series, as a percentage in [-100, 0]:
/// a single forward pass tracking the running peak and keeping the most
/// negative `(value - peak) / peak`.
pub fn max_drawdown(points: &[AdjustedValuePoint]) -> Option<Decimal> {
    if points.is_empty() {
        return None;
    }

    let mut peak = Decimal::ZERO;
    let mut worst = Decimal::ZERO;
    for point in points {
        if point.adjusted_value > peak {
            peak = point.adjusted_value;
        }
        if peak > Decimal::ZERO {
            let drawdown = (point.adjusted_value - peak) / peak;
            if drawdown < worst {
                worst = drawdown;
            }
        }
    }

    Some((worst * dec!(100)).max(dec!(-100)).round_dp(DECIMAL_PRECISION))
}

/// Beta of the adjusted series against a benchmark price series.
///
/// Series are aligned by common dates (inner join, never interpolation);
/// fewer aligned dates than `config.min_beta_observations`, or a
/// zero-variance benchmark, yields `None`.
pub fn beta(
    points: &[AdjustedValuePoint],
    benchmark: &[PriceDataPoint],
    config: &MetricsConfig,
) -> Option<Decimal> {
    let benchmark = normalize_price_series(benchmark.to_vec());
    let closes_by_date: HashMap<NaiveDate, Decimal> =
        benchmark.iter().map(|p| (p.date, p.close)).collect();

    let aligned: Vec<(Decimal, Decimal)> = points
        .iter()
        .filter_map(|p| {
            closes_by_date
                .get(&p.date)
                .map(|close| (p.adjusted_value, *close))
        })
        .collect();

    if aligned.len() < config.min_beta_observations {
        debug!(
            "Beta skipped: {} aligned dates, need {}",
            aligned.len(),
            config.min_beta_observations
        );
        return None;
    }

    let mut asset_returns = Vec::with_capacity(aligned.len() - 1);
    let mut benchmark_returns = Vec::with_capacity(aligned.len() - 1);
    for window in aligned.windows(2) {
        let (prev_asset, prev_bench) = window[0];
        let (curr_asset, curr_bench) = window[1];
        if prev_asset <= Decimal::ZERO || prev_bench <= Decimal::ZERO {
            continue;
        }
        asset_returns.push(curr_asset / prev_asset - Decimal::ONE);
        benchmark_returns.push(curr_bench / prev_bench - Decimal::ONE);
    }
    if asset_returns.len() < 2 {
        return None;
    }

    let asset_mean = mean(&asset_returns)?;
    let benchmark_mean = mean(&benchmark_returns)?;
    let n = Decimal::from(asset_returns.len());

    let covariance: Decimal = asset_returns
        .iter()
        .zip(benchmark_returns.iter())
        .map(|(a, b)| (*a - asset_mean) * (*b - benchmark_mean))
        .sum::<Decimal>()
        / n;
    let variance: Decimal = benchmark_returns
        .iter()
        .map(|b| {
            let diff = *b - benchmark_mean;
            diff * diff
        })
        .sum::<Decimal>()
        / n;

    if variance.is_zero() {
        return None;
    }
    Some((covariance / variance).round_dp(DECIMAL_PRECISION))
}

/// Computes the full partial-results metrics object. Each metric degrades
/// to `None` on its own; nothing here short-circuits.
pub fn calculate_performance(
    points: &[AdjustedValuePoint],
    flows: &[CashFlow],
    benchmark: Option<&[PriceDataPoint]>,
    config: &MetricsConfig,
) -> PerformanceMetrics {
    let returns = daily_returns(points);

    PerformanceMetrics {
        cagr: cagr(points, config),
        xirr: xirr(flows),
        max_drawdown: max_drawdown(points),
        volatility: annualized_volatility(&returns, config),
        sharpe_ratio: sharpe_ratio(&returns, config),
        sortino_ratio: sortino_ratio(&returns, config),
        beta: benchmark.and_then(|b| beta(points, b, config)),
    }
}
