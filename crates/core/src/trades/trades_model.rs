use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::assets::AssetKind;
use crate::errors::{Error, Result, ValidationError};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TradeType {
    Buy,
    Sell,
    Deposit,
    Withdrawal,
}

impl TradeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeType::Buy => "BUY",
            TradeType::Sell => "SELL",
            TradeType::Deposit => "DEPOSIT",
            TradeType::Withdrawal => "WITHDRAWAL",
        }
    }
}

/// A single ledger entry. Immutable once recorded; holdings are a
/// projection over the sorted ledger.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub kind: AssetKind,
    pub symbol: String,
    pub currency: String,
    pub trade_type: TradeType,
    pub quantity: Decimal,
    /// Per-unit execution price in `currency`.
    pub price: Decimal,
    /// Gross amount of the trade as recorded by the account.
    pub total_amount: Decimal,
    pub trade_date: NaiveDate,
    pub fees: Decimal,
}

impl Trade {
    /// Ledger key shared with holdings: `KIND:symbol:currency`.
    pub fn asset_key(&self) -> String {
        format!("{}:{}:{}", self.kind.as_str(), self.symbol, self.currency)
    }

    /// Estimated market value of the traded quantity, excluding fees.
    /// Falls back to the recorded total when the per-unit price is absent.
    pub fn market_value(&self) -> Decimal {
        let notional = self.quantity * self.price;
        if notional.is_zero() {
            self.total_amount
        } else {
            notional
        }
    }

    pub fn is_market_trade(&self) -> bool {
        matches!(self.trade_type, TradeType::Buy | TradeType::Sell)
    }

    /// Validates the ledger entry at the decode boundary.
    pub fn validate(&self) -> Result<()> {
        if self.currency.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "currency".to_string(),
            )));
        }
        if self.is_market_trade() && self.symbol.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "symbol".to_string(),
            )));
        }
        if self.quantity < Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Quantity cannot be negative: {}",
                self.quantity
            ))));
        }
        if self.fees < Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Fees cannot be negative: {}",
                self.fees
            ))));
        }
        Ok(())
    }
}
