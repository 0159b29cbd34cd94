use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::market_data::PriceDataPoint;
use crate::portfolio::history::AdjustedValuePoint;

use super::*;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn point(date: NaiveDate, value: Decimal, daily_return: Decimal) -> AdjustedValuePoint {
    AdjustedValuePoint {
        date,
        adjusted_value: value,
        daily_return,
    }
}

/// Series of adjusted points with the given values on consecutive days,
/// daily returns derived from the values.
fn series(start: NaiveDate, values: &[Decimal]) -> Vec<AdjustedValuePoint> {
    let mut points = Vec::with_capacity(values.len());
    for (i, value) in values.iter().enumerate() {
        let daily_return = if i == 0 || values[i - 1].is_zero() {
            Decimal::ZERO
        } else {
            *value / values[i - 1] - Decimal::ONE
        };
        points.push(point(start + Duration::days(i as i64), *value, daily_return));
    }
    points
}

#[test]
fn cagr_of_a_doubling_year_is_one() {
    let points = vec![
        point(d(2023, 1, 1), dec!(100), dec!(0)),
        point(d(2024, 1, 1), dec!(200), dec!(0)),
    ];
    assert_eq!(cagr(&points, &MetricsConfig::default()), Some(dec!(1)));
}

#[test]
fn cagr_requires_at_least_one_day() {
    let points = vec![
        point(d(2024, 1, 1), dec!(100), dec!(0)),
        point(d(2024, 1, 1), dec!(110), dec!(0)),
    ];
    assert_eq!(cagr(&points, &MetricsConfig::default()), None);
}

#[test]
fn cagr_discards_absurd_short_span_blowups() {
    let points = vec![
        point(d(2024, 1, 1), dec!(100), dec!(0)),
        point(d(2024, 1, 2), dec!(10000), dec!(0)),
    ];
    assert_eq!(cagr(&points, &MetricsConfig::default()), None);
}

#[test]
fn cagr_starts_from_first_positive_value() {
    let points = vec![
        point(d(2022, 12, 1), dec!(0), dec!(0)),
        point(d(2023, 1, 1), dec!(100), dec!(0)),
        point(d(2024, 1, 1), dec!(110), dec!(0)),
    ];
    let growth = cagr(&points, &MetricsConfig::default()).unwrap();
    assert!((growth - dec!(0.1)).abs() < dec!(0.0001));
}

#[test]
fn volatility_needs_two_returns() {
    let config = MetricsConfig::default();
    assert_eq!(annualized_volatility(&[dec!(0.01)], &config), None);
    assert!(annualized_volatility(&[dec!(0.01), dec!(-0.02)], &config).is_some());
}

#[test]
fn constant_returns_have_zero_volatility_and_no_sharpe() {
    let config = MetricsConfig::default();
    let returns = vec![dec!(0.01); 10];
    assert_eq!(annualized_volatility(&returns, &config), Some(dec!(0)));
    assert_eq!(sharpe_ratio(&returns, &config), None);
}

#[test]
fn sharpe_is_positive_for_returns_above_the_risk_free_rate() {
    let config = MetricsConfig::default();
    let returns = vec![dec!(0.01), dec!(0.02), dec!(-0.005), dec!(0.015)];
    let sharpe = sharpe_ratio(&returns, &config).unwrap();
    assert!(sharpe > Decimal::ZERO);
}

#[test]
fn sortino_is_none_without_negative_days() {
    let config = MetricsConfig::default();
    let returns = vec![dec!(0.01), dec!(0), dec!(0.02)];
    assert_eq!(sortino_ratio(&returns, &config), None);
}

#[test]
fn sortino_uses_downside_deviation_only() {
    let config = MetricsConfig::default();
    let returns = vec![dec!(0.02), dec!(-0.01), dec!(0.03), dec!(-0.02), dec!(0.01)];
    let sortino = sortino_ratio(&returns, &config).unwrap();
    let sharpe = sharpe_ratio(&returns, &config).unwrap();
    // Downside deviation is smaller than total deviation here, so the
    // Sortino ratio must exceed the Sharpe ratio.
    assert!(sortino > sharpe);
}

#[test]
fn max_drawdown_tracks_the_running_peak() {
    let values = [dec!(100), dec!(120), dec!(60), dec!(90)];
    let points = series(d(2024, 1, 1), &values);
    assert_eq!(max_drawdown(&points), Some(dec!(-50)));
}

#[test]
fn max_drawdown_of_monotonic_growth_is_zero() {
    let values = [dec!(100), dec!(110), dec!(120)];
    let points = series(d(2024, 1, 1), &values);
    assert_eq!(max_drawdown(&points), Some(dec!(0)));
}

#[test]
fn max_drawdown_of_empty_series_is_none() {
    assert_eq!(max_drawdown(&[]), None);
}

fn alternating_values(len: usize) -> Vec<Decimal> {
    (0..len)
        .map(|i| {
            if i % 2 == 0 {
                Decimal::from(100 + i as i64)
            } else {
                Decimal::from(95 + i as i64)
            }
        })
        .collect()
}

#[test]
fn beta_of_a_series_against_itself_is_one() {
    let values = alternating_values(40);
    let points = series(d(2024, 1, 1), &values);
    let benchmark: Vec<PriceDataPoint> = points
        .iter()
        .map(|p| PriceDataPoint {
            date: p.date,
            close: p.adjusted_value,
        })
        .collect();

    let beta = beta(&points, &benchmark, &MetricsConfig::default()).unwrap();
    assert_eq!(beta, dec!(1));
}

#[test]
fn beta_requires_thirty_aligned_dates() {
    let values = alternating_values(20);
    let points = series(d(2024, 1, 1), &values);
    let benchmark: Vec<PriceDataPoint> = points
        .iter()
        .map(|p| PriceDataPoint {
            date: p.date,
            close: p.adjusted_value,
        })
        .collect();

    assert_eq!(beta(&points, &benchmark, &MetricsConfig::default()), None);
}

#[test]
fn beta_is_none_for_flat_benchmark() {
    let values = alternating_values(40);
    let points = series(d(2024, 1, 1), &values);
    let benchmark: Vec<PriceDataPoint> = points
        .iter()
        .map(|p| PriceDataPoint {
            date: p.date,
            close: dec!(500),
        })
        .collect();

    assert_eq!(beta(&points, &benchmark, &MetricsConfig::default()), None);
}

#[test]
fn disjoint_benchmark_dates_do_not_align() {
    let values = alternating_values(40);
    let points = series(d(2024, 1, 1), &values);
    // Benchmark quotes live on entirely different dates.
    let benchmark: Vec<PriceDataPoint> = (0..40)
        .map(|i| PriceDataPoint {
            date: d(2020, 1, 1) + Duration::days(i),
            close: Decimal::from(100 + i),
        })
        .collect();

    assert_eq!(beta(&points, &benchmark, &MetricsConfig::default()), None);
}

#[test]
fn one_failing_metric_leaves_the_others_intact() {
    let values = [dec!(100), dec!(105), dec!(103), dec!(108)];
    let points = series(d(2023, 1, 1), &values);
    // Degenerate XIRR schedule and no benchmark.
    let metrics = calculate_performance(&points, &[], None, &MetricsConfig::default());

    assert_eq!(metrics.xirr, None);
    assert_eq!(metrics.beta, None);
    assert!(metrics.max_drawdown.is_some());
    assert!(metrics.volatility.is_some());
    assert!(metrics.sortino_ratio.is_some());
}
