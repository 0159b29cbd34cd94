//! Pure valuation functions over holdings. No side effects, no hidden
//! state; repeated invocation with the same inputs returns the same values.

use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::assets::Holding;
use crate::constants::{DECIMAL_PRECISION, DISPLAY_DECIMAL_PRECISION};
use crate::errors::Result;
use crate::fx::{CurrencyConverter, ExchangeRateMap};
use crate::portfolio::income::{dividends_collected, DividendRecord};

use super::{HoldingValuation, PortfolioSummary};

/// Merges holdings that share a `kind:symbol:currency` key.
///
/// Quantities are summed and the purchase price becomes the
/// quantity-weighted average. The merged purchase date is the earliest
/// (position inception); the current price comes from the most recently
/// purchased entry, since the freshest refresh wins.
pub fn combine_holdings(holdings: &[Holding]) -> Vec<Holding> {
    let mut combined: Vec<Holding> = Vec::new();
    let mut latest_purchase: Vec<chrono::NaiveDate> = Vec::new();
    let mut index_by_key: HashMap<String, usize> = HashMap::new();

    for holding in holdings {
        match index_by_key.get(&holding.asset_key()) {
            Some(&i) => {
                let existing = &mut combined[i];
                let total_quantity = existing.quantity + holding.quantity;
                if total_quantity > Decimal::ZERO {
                    existing.purchase_price = (existing.quantity * existing.purchase_price
                        + holding.quantity * holding.purchase_price)
                        / total_quantity;
                }
                existing.quantity = total_quantity;
                if holding.purchase_date >= latest_purchase[i] {
                    existing.current_price = holding.current_price;
                    latest_purchase[i] = holding.purchase_date;
                }
                existing.purchase_date = existing.purchase_date.min(holding.purchase_date);
            }
            None => {
                index_by_key.insert(holding.asset_key(), combined.len());
                latest_purchase.push(holding.purchase_date);
                combined.push(holding.clone());
            }
        }
    }

    combined
}

/// Values a single holding in its own currency.
pub fn value_holding(holding: &Holding) -> HoldingValuation {
    // Round invested and current value once; gain/loss is the exact
    // difference of the rounded figures.
    let invested = (holding.quantity * holding.purchase_price).round_dp(DECIMAL_PRECISION);
    let current_value = (holding.quantity * holding.current_price).round_dp(DECIMAL_PRECISION);
    let gain_loss = current_value - invested;
    let gain_loss_percent = if invested > Decimal::ZERO {
        (gain_loss / invested * dec!(100)).round_dp(DECIMAL_PRECISION)
    } else {
        Decimal::ZERO
    };

    HoldingValuation {
        symbol: holding.symbol.clone(),
        kind: holding.kind(),
        currency: holding.currency.clone(),
        quantity: holding.quantity,
        invested,
        current_value,
        gain_loss,
        gain_loss_percent,
    }
}

pub fn value_holdings(holdings: &[Holding]) -> Vec<HoldingValuation> {
    holdings.iter().map(value_holding).collect()
}

/// Values every holding in the reporting currency of `rates`.
pub fn unified_valuations(
    holdings: &[Holding],
    rates: &ExchangeRateMap,
) -> Result<Vec<HoldingValuation>> {
    let converter = CurrencyConverter::new(rates);
    let mut valuations = Vec::with_capacity(holdings.len());

    for holding in holdings {
        let mut valuation = value_holding(holding);
        valuation.invested = converter
            .to_reporting(valuation.invested, &holding.currency)?
            .round_dp(DECIMAL_PRECISION);
        valuation.current_value = converter
            .to_reporting(valuation.current_value, &holding.currency)?
            .round_dp(DECIMAL_PRECISION);
        valuation.gain_loss = valuation.current_value - valuation.invested;
        valuation.currency = converter.reporting_currency().to_string();
        valuations.push(valuation);
    }

    Ok(valuations)
}

fn summarize(
    valuations: &[HoldingValuation],
    currency: &str,
    dividends: Decimal,
) -> PortfolioSummary {
    let total_invested: Decimal = valuations.iter().map(|v| v.invested).sum();
    let current_value: Decimal = valuations.iter().map(|v| v.current_value).sum();
    let total_gain_loss = current_value - total_invested;
    let total_gain_loss_percent = if total_invested > Decimal::ZERO {
        (total_gain_loss / total_invested * dec!(100)).round_dp(DECIMAL_PRECISION)
    } else {
        Decimal::ZERO
    };

    PortfolioSummary {
        currency: currency.to_string(),
        current_value,
        total_invested,
        total_gain_loss,
        total_gain_loss_percent,
        holdings_count: valuations.len(),
        // Collected income is a display figure, not a valuation input.
        dividends_collected: dividends.round_dp(DISPLAY_DECIMAL_PRECISION),
    }
}

/// Per-currency summaries, sorted by currency code for stable output.
/// Dividend records are looked up per symbol and filtered to each
/// holding's purchase date.
pub fn summarize_by_currency(
    holdings: &[Holding],
    dividends_by_symbol: &HashMap<String, Vec<DividendRecord>>,
) -> Vec<PortfolioSummary> {
    let mut by_currency: HashMap<&str, (Vec<HoldingValuation>, Decimal)> = HashMap::new();

    for holding in holdings {
        let dividends = dividends_by_symbol
            .get(&holding.symbol)
            .map(|records| dividends_collected(holding.quantity, holding.purchase_date, records))
            .unwrap_or(Decimal::ZERO);

        let entry = by_currency
            .entry(holding.currency.as_str())
            .or_insert_with(|| (Vec::new(), Decimal::ZERO));
        entry.0.push(value_holding(holding));
        entry.1 += dividends;
    }

    let mut summaries: Vec<PortfolioSummary> = by_currency
        .into_iter()
        .map(|(currency, (valuations, dividends))| summarize(&valuations, currency, dividends))
        .collect();
    summaries.sort_by(|a, b| a.currency.cmp(&b.currency));
    summaries
}

/// Single summary over all holdings, converted into the reporting currency
/// of `rates`. Structurally identical to the per-currency summary.
pub fn unified_summary(
    holdings: &[Holding],
    rates: &ExchangeRateMap,
    dividends_by_symbol: &HashMap<String, Vec<DividendRecord>>,
) -> Result<PortfolioSummary> {
    if holdings.is_empty() {
        return Ok(PortfolioSummary::empty(rates.reporting_currency.clone()));
    }

    let converter = CurrencyConverter::new(rates);
    let valuations = unified_valuations(holdings, rates)?;

    let mut dividends = Decimal::ZERO;
    for holding in holdings {
        if let Some(records) = dividends_by_symbol.get(&holding.symbol) {
            let local = dividends_collected(holding.quantity, holding.purchase_date, records);
            dividends += converter.to_reporting(local, &holding.currency)?;
        }
    }

    Ok(summarize(
        &valuations,
        converter.reporting_currency(),
        dividends,
    ))
}
