//! Simulates holding the benchmark through the portfolio's own cash flows.
//!
//! A portfolio that received a large deposit would spuriously "outperform"
//! a passive benchmark that never compounds new capital. The tracker
//! therefore mirrors every buy and sell into benchmark shares, producing a
//! value curve comparable to the portfolio's notional value rather than a
//! normalized percentage line.

use std::collections::HashMap;

use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;

use crate::constants::DECIMAL_PRECISION;
use crate::errors::Result;
use crate::fx::{CurrencyConverter, ExchangeRateMap};
use crate::market_data::{close_on_or_before, normalize_price_series, PriceDataPoint};
use crate::portfolio::history::{normalize_history, PortfolioHistoryEntry};
use crate::trades::{Trade, TradeType};

use super::BenchmarkPoint;

/// Builds the cash-flow-adjusted benchmark value series.
///
/// Seeding: shares are set so that `shares * benchmark_price = portfolio
/// value` on the first day both are positive (equal starting basis). Each
/// subsequent day first lets the benchmark's own price move the position,
/// then translates that day's buys into additional shares at the day's
/// price and sells into a proportional share reduction. Trade values are
/// unified into the reporting currency of `rates` before translation.
pub fn build_benchmark_series(
    history: &[PortfolioHistoryEntry],
    benchmark: &[PriceDataPoint],
    trades: &[Trade],
    rates: &ExchangeRateMap,
) -> Result<Vec<BenchmarkPoint>> {
    let history = normalize_history(history.to_vec());
    let benchmark = normalize_price_series(benchmark.to_vec());
    let converter = CurrencyConverter::new(rates);

    let mut trades_by_date: HashMap<NaiveDate, Vec<&Trade>> = HashMap::new();
    for trade in trades.iter().filter(|t| t.is_market_trade()) {
        trades_by_date.entry(trade.trade_date).or_default().push(trade);
    }

    // Seed on the first day with both a positive portfolio value and an
    // available positive benchmark price.
    let seed = history.iter().position(|entry| {
        entry.value > Decimal::ZERO
            && close_on_or_before(&benchmark, entry.date)
                .is_some_and(|close| close > Decimal::ZERO)
    });
    let Some(seed) = seed else {
        debug!("Benchmark series skipped: no day with positive value and benchmark price");
        return Ok(Vec::new());
    };

    let mut last_price = close_on_or_before(&benchmark, history[seed].date)
        .unwrap_or(Decimal::ONE);
    let mut shares = history[seed].value / last_price;

    let mut points = Vec::with_capacity(history.len() - seed);
    points.push(BenchmarkPoint {
        date: history[seed].date,
        value: history[seed].value.round_dp(DECIMAL_PRECISION),
        shares,
    });

    for entry in &history[seed + 1..] {
        // The benchmark's own return: shares are unchanged, the price moves.
        if let Some(close) = close_on_or_before(&benchmark, entry.date) {
            if close > Decimal::ZERO {
                last_price = close;
            }
        }

        if let Some(day_trades) = trades_by_date.get(&entry.date) {
            for trade in day_trades {
                let value = converter.to_reporting(trade.market_value(), &trade.currency)?;
                match trade.trade_type {
                    TradeType::Buy => {
                        shares += value / last_price;
                    }
                    TradeType::Sell => {
                        let benchmark_value = shares * last_price;
                        if benchmark_value > Decimal::ZERO {
                            let fraction =
                                (value / benchmark_value).min(Decimal::ONE);
                            shares *= Decimal::ONE - fraction;
                        }
                    }
                    TradeType::Deposit | TradeType::Withdrawal => {}
                }
            }
        }

        points.push(BenchmarkPoint {
            date: entry.date,
            value: (shares * last_price).round_dp(DECIMAL_PRECISION),
            shares,
        });
    }

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetKind;
    use rust_decimal_macros::dec;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn entry(day: u32, value: Decimal) -> PortfolioHistoryEntry {
        PortfolioHistoryEntry {
            date: d(day),
            value,
            invested: Decimal::ZERO,
            cash_flow: Decimal::ZERO,
            liquid_value: value,
            liquid_cash_flow: Decimal::ZERO,
        }
    }

    fn price(day: u32, close: Decimal) -> PriceDataPoint {
        PriceDataPoint { date: d(day), close }
    }

    fn buy(day: u32, quantity: Decimal, unit_price: Decimal) -> Trade {
        Trade {
            kind: AssetKind::Stock,
            symbol: "AAPL".to_string(),
            currency: "USD".to_string(),
            trade_type: TradeType::Buy,
            quantity,
            price: unit_price,
            total_amount: quantity * unit_price,
            trade_date: d(day),
            fees: Decimal::ZERO,
        }
    }

    #[test]
    fn seeds_at_equal_starting_basis() {
        let history = vec![entry(1, dec!(1000)), entry(2, dec!(1000))];
        let benchmark = vec![price(1, dec!(50)), price(2, dec!(55))];
        let rates = ExchangeRateMap::new("USD");

        let points = build_benchmark_series(&history, &benchmark, &[], &rates).unwrap();
        assert_eq!(points[0].value, dec!(1000));
        assert_eq!(points[0].shares, dec!(20));
        // 20 shares * 55 = 1100: the benchmark's own 10% day.
        assert_eq!(points[1].value, dec!(1100));
    }

    #[test]
    fn buys_add_shares_at_that_days_price() {
        let history = vec![entry(1, dec!(1000)), entry(2, dec!(1550))];
        let benchmark = vec![price(1, dec!(50)), price(2, dec!(55))];
        // 500 worth of stock bought on day 2.
        let trades = vec![buy(2, dec!(10), dec!(50))];
        let rates = ExchangeRateMap::new("USD");

        let points = build_benchmark_series(&history, &benchmark, &trades, &rates).unwrap();
        // 20 seed shares + 500/55 bought.
        let expected_shares = dec!(20) + dec!(500) / dec!(55);
        assert_eq!(points[1].shares, expected_shares);
        assert_eq!(points[1].value, (expected_shares * dec!(55)).round_dp(6));
    }

    #[test]
    fn sells_remove_a_proportional_fraction() {
        let history = vec![entry(1, dec!(1000)), entry(2, dec!(500))];
        let benchmark = vec![price(1, dec!(50)), price(2, dec!(50))];
        let mut sell = buy(2, dec!(10), dec!(50));
        sell.trade_type = TradeType::Sell;
        let rates = ExchangeRateMap::new("USD");

        let points = build_benchmark_series(&history, &benchmark, &[sell], &rates).unwrap();
        // 500 sold out of a 1000 benchmark position: half the shares go.
        assert_eq!(points[1].shares, dec!(10));
        assert_eq!(points[1].value, dec!(500));
    }

    #[test]
    fn benchmark_gaps_carry_the_prior_price() {
        let history = vec![entry(1, dec!(1000)), entry(2, dec!(1000)), entry(3, dec!(1000))];
        // No quote on day 2 (weekend); day 3 gaps up.
        let benchmark = vec![price(1, dec!(50)), price(3, dec!(60))];
        let rates = ExchangeRateMap::new("USD");

        let points = build_benchmark_series(&history, &benchmark, &[], &rates).unwrap();
        assert_eq!(points[1].value, dec!(1000));
        assert_eq!(points[2].value, dec!(1200));
    }

    #[test]
    fn foreign_trades_are_unified_before_translation() {
        let history = vec![entry(1, dec!(1000)), entry(2, dec!(1000))];
        let benchmark = vec![price(1, dec!(50)), price(2, dec!(50))];
        let mut foreign = buy(2, dec!(100), dec!(140));
        foreign.currency = "PKR".to_string();
        foreign.total_amount = dec!(14000);
        let rates = ExchangeRateMap::new("USD").with_rate("PKR", dec!(280));

        let points =
            build_benchmark_series(&history, &benchmark, &[foreign], &rates).unwrap();
        // 14000 PKR = 50 USD = 1 extra share at 50.
        assert_eq!(points[1].shares, dec!(21));
    }

    #[test]
    fn empty_history_yields_empty_series() {
        let rates = ExchangeRateMap::new("USD");
        let points =
            build_benchmark_series(&[], &[price(1, dec!(50))], &[], &rates).unwrap();
        assert!(points.is_empty());
    }
}
