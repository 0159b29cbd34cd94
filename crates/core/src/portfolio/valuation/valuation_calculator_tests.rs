use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::assets::{AssetClass, Holding};
use crate::fx::ExchangeRateMap;
use crate::portfolio::income::DividendRecord;

use super::*;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn stock(symbol: &str, quantity: Decimal, purchase: Decimal, current: Decimal) -> Holding {
    Holding {
        symbol: symbol.to_string(),
        asset: AssetClass::Stock,
        quantity,
        purchase_price: purchase,
        purchase_date: d(2024, 1, 1),
        current_price: current,
        currency: "USD".to_string(),
        notes: None,
    }
}

#[test]
fn values_a_single_holding() {
    let holding = stock("AAPL", dec!(10), dec!(100), dec!(150));
    let valuation = value_holding(&holding);

    assert_eq!(valuation.invested, dec!(1000));
    assert_eq!(valuation.current_value, dec!(1500));
    assert_eq!(valuation.gain_loss, dec!(500));
    assert_eq!(valuation.gain_loss_percent, dec!(50));
}

#[test]
fn zero_invested_yields_zero_percent() {
    let holding = stock("FREE", dec!(5), dec!(0), dec!(10));
    let valuation = value_holding(&holding);

    assert_eq!(valuation.invested, dec!(0));
    assert_eq!(valuation.gain_loss, dec!(50));
    assert_eq!(valuation.gain_loss_percent, dec!(0));
}

#[test]
fn combines_duplicate_keys_with_weighted_average_price() {
    let mut second = stock("AAPL", dec!(10), dec!(200), dec!(150));
    second.purchase_date = d(2024, 2, 1);
    let holdings = vec![stock("AAPL", dec!(30), dec!(100), dec!(140)), second];

    let combined = combine_holdings(&holdings);
    assert_eq!(combined.len(), 1);
    assert_eq!(combined[0].quantity, dec!(40));
    // (30*100 + 10*200) / 40 = 125
    assert_eq!(combined[0].purchase_price, dec!(125));
    // Current price from the later purchase.
    assert_eq!(combined[0].current_price, dec!(150));
}

#[test]
fn distinct_currencies_are_not_combined() {
    let mut pkr = stock("OGDC", dec!(100), dec!(90), dec!(95));
    pkr.currency = "PKR".to_string();
    let usd = stock("OGDC", dec!(10), dec!(5), dec!(6));

    assert_eq!(combine_holdings(&[pkr, usd]).len(), 2);
}

#[test]
fn empty_holdings_produce_zero_filled_unified_summary() {
    let rates = ExchangeRateMap::new("USD");
    let summary = unified_summary(&[], &rates, &HashMap::new()).unwrap();
    assert_eq!(summary, PortfolioSummary::empty("USD"));
}

#[test]
fn summarizes_per_currency() {
    let mut pkr = stock("OGDC", dec!(100), dec!(90), dec!(95));
    pkr.currency = "PKR".to_string();
    let holdings = vec![stock("AAPL", dec!(10), dec!(100), dec!(150)), pkr];

    let summaries = summarize_by_currency(&holdings, &HashMap::new());
    assert_eq!(summaries.len(), 2);
    // Sorted by currency code.
    assert_eq!(summaries[0].currency, "PKR");
    assert_eq!(summaries[0].current_value, dec!(9500));
    assert_eq!(summaries[1].currency, "USD");
    assert_eq!(summaries[1].total_gain_loss, dec!(500));
}

#[test]
fn unified_summary_converts_into_reporting_currency() {
    let mut pkr = stock("OGDC", dec!(100), dec!(140), dec!(280));
    pkr.currency = "PKR".to_string();
    let holdings = vec![stock("AAPL", dec!(10), dec!(100), dec!(150)), pkr];
    let rates = ExchangeRateMap::new("USD").with_rate("PKR", dec!(280));

    let summary = unified_summary(&holdings, &rates, &HashMap::new()).unwrap();
    assert_eq!(summary.currency, "USD");
    // 1000 USD + 14000/280 PKR = 1050
    assert_eq!(summary.total_invested, dec!(1050));
    // 1500 USD + 28000/280 PKR = 1600
    assert_eq!(summary.current_value, dec!(1600));
    assert_eq!(summary.holdings_count, 2);
}

#[test]
fn unified_summary_fails_on_missing_rate() {
    let mut eur = stock("SAP", dec!(1), dec!(100), dec!(100));
    eur.currency = "EUR".to_string();
    let rates = ExchangeRateMap::new("USD");

    assert!(unified_summary(&[eur], &rates, &HashMap::new()).is_err());
}

#[test]
fn dividends_collected_respect_purchase_date_filter() {
    let holdings = vec![stock("AAPL", dec!(10), dec!(100), dec!(150))];
    let mut dividends = HashMap::new();
    dividends.insert(
        "AAPL".to_string(),
        vec![
            DividendRecord { date: d(2023, 12, 15), amount_per_share: dec!(1) },
            DividendRecord { date: d(2024, 3, 15), amount_per_share: dec!(0.25) },
        ],
    );

    let summaries = summarize_by_currency(&holdings, &dividends);
    assert_eq!(summaries[0].dividends_collected, dec!(2.5));
}
