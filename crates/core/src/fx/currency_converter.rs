use log::debug;
use rust_decimal::Decimal;

use super::{ExchangeRateMap, FxError};

/// Converts amounts into the reporting currency of an [`ExchangeRateMap`].
///
/// Rates are quoted as "1 reporting unit = rate x currency", so conversion
/// into the reporting currency divides by the rate.
pub struct CurrencyConverter<'a> {
    rates: &'a ExchangeRateMap,
}

impl<'a> CurrencyConverter<'a> {
    pub fn new(rates: &'a ExchangeRateMap) -> Self {
        CurrencyConverter { rates }
    }

    pub fn reporting_currency(&self) -> &str {
        &self.rates.reporting_currency
    }

    /// Converts `amount` denominated in `currency` into the reporting
    /// currency. Missing or non-positive rates are hard errors: a unified
    /// summary with silently skipped positions would be worse than none.
    pub fn to_reporting(&self, amount: Decimal, currency: &str) -> Result<Decimal, FxError> {
        if currency == self.rates.reporting_currency {
            return Ok(amount);
        }

        let rate = self
            .rates
            .rate_for(currency)
            .ok_or_else(|| FxError::RateNotFound(currency.to_string()))?;

        if rate <= Decimal::ZERO {
            return Err(FxError::InvalidRate(format!("{currency}: {rate}")));
        }

        debug!(
            "Converting {} {} to {} at rate {}",
            amount, currency, self.rates.reporting_currency, rate
        );
        Ok(amount / rate)
    }
}
