use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// Flat asset-class discriminant, used as allocation bucket and ledger key.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum AssetKind {
    Stock,
    Etf,
    Crypto,
    Commodity,
    Cash,
    FixedDeposit,
}

impl AssetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Stock => "STOCK",
            AssetKind::Etf => "ETF",
            AssetKind::Crypto => "CRYPTO",
            AssetKind::Commodity => "COMMODITY",
            AssetKind::Cash => "CASH",
            AssetKind::FixedDeposit => "FIXED_DEPOSIT",
        }
    }

    /// Whether positions of this kind belong to the liquid sleeve.
    ///
    /// Commodities and fixed deposits are excluded: their marks are not
    /// daily market prices and would distort risk statistics computed on
    /// the liquid series.
    pub fn is_liquid(&self) -> bool {
        !matches!(self, AssetKind::Commodity | AssetKind::FixedDeposit)
    }
}

/// Asset classification with class-specific fields, decoded once at the
/// boundary. Fixed deposits carry their own terms instead of encoding them
/// in free-form notes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "assetType", rename_all = "camelCase")]
pub enum AssetClass {
    Stock,
    Etf,
    Crypto,
    Commodity,
    Cash,
    #[serde(rename_all = "camelCase")]
    FixedDeposit {
        principal: Decimal,
        annual_rate: Decimal,
        maturity_date: NaiveDate,
    },
}

impl AssetClass {
    pub fn kind(&self) -> AssetKind {
        match self {
            AssetClass::Stock => AssetKind::Stock,
            AssetClass::Etf => AssetKind::Etf,
            AssetClass::Crypto => AssetKind::Crypto,
            AssetClass::Commodity => AssetKind::Commodity,
            AssetClass::Cash => AssetKind::Cash,
            AssetClass::FixedDeposit { .. } => AssetKind::FixedDeposit,
        }
    }
}

/// An open position. Holdings are a materialized projection over the trade
/// ledger, not authoritative; a holding disappears when its quantity
/// reaches zero and the closed position survives only in the ledger.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub symbol: String,
    pub asset: AssetClass,
    /// Units held; never negative.
    pub quantity: Decimal,
    /// Per-unit acquisition price in `currency`.
    pub purchase_price: Decimal,
    pub purchase_date: NaiveDate,
    /// Per-unit latest price in `currency`.
    pub current_price: Decimal,
    pub currency: String,
    pub notes: Option<String>,
}

impl Holding {
    pub fn kind(&self) -> AssetKind {
        self.asset.kind()
    }

    /// Ledger key shared with trades: `KIND:symbol:currency`.
    pub fn asset_key(&self) -> String {
        format!("{}:{}:{}", self.kind().as_str(), self.symbol, self.currency)
    }

    /// Validates the holding at the decode boundary.
    pub fn validate(&self) -> Result<()> {
        if self.symbol.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "symbol".to_string(),
            )));
        }
        if self.currency.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "currency".to_string(),
            )));
        }
        if self.quantity < Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Quantity cannot be negative: {}",
                self.quantity
            ))));
        }
        if self.purchase_price < Decimal::ZERO || self.current_price < Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Prices cannot be negative".to_string(),
            )));
        }
        Ok(())
    }
}
