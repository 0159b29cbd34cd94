use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Exchange rates against one reporting currency.
///
/// Each entry reads "1 unit of the reporting currency = `rate` units of the
/// keyed currency". The reporting currency itself always maps to 1.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRateMap {
    pub reporting_currency: String,
    pub rates: HashMap<String, Decimal>,
}

impl ExchangeRateMap {
    pub fn new(reporting_currency: impl Into<String>) -> Self {
        let reporting_currency = reporting_currency.into();
        let mut rates = HashMap::new();
        rates.insert(reporting_currency.clone(), Decimal::ONE);
        ExchangeRateMap {
            reporting_currency,
            rates,
        }
    }

    pub fn with_rate(mut self, currency: impl Into<String>, rate: Decimal) -> Self {
        self.rates.insert(currency.into(), rate);
        self
    }

    pub fn rate_for(&self, currency: &str) -> Option<Decimal> {
        if currency == self.reporting_currency {
            return Some(Decimal::ONE);
        }
        self.rates.get(currency).copied()
    }
}
