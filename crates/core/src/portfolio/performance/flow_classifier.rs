//! Flow classification for money-weighted return calculation.
//!
//! Only external flows (money crossing the portfolio boundary) enter the
//! XIRR schedule. Buys and sells reallocate money that is already inside
//! the portfolio and must not appear as flows.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::errors::Result;
use crate::fx::{CurrencyConverter, ExchangeRateMap};
use crate::trades::{Trade, TradeType};

use super::CashFlow;

/// Flow type for performance calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowType {
    /// Money crossing the portfolio boundary.
    External,
    /// Money moving within the portfolio.
    Internal,
}

/// Classify a ledger entry for money-weighted return purposes.
///
/// External: DEPOSIT, WITHDRAWAL. Internal: BUY, SELL.
pub fn classify_flow(trade: &Trade) -> FlowType {
    match trade.trade_type {
        TradeType::Deposit | TradeType::Withdrawal => FlowType::External,
        TradeType::Buy | TradeType::Sell => FlowType::Internal,
    }
}

pub fn is_external_flow(trade: &Trade) -> bool {
    classify_flow(trade) == FlowType::External
}

/// Builds the signed cash-flow schedule for XIRR from the trade ledger,
/// unified into the reporting currency of `rates`.
///
/// Investor convention: deposits are negative (money paid in), withdrawals
/// positive, and the terminal portfolio value is appended as a final
/// positive flow. The result is sorted by date.
pub fn external_flow_schedule(
    trades: &[Trade],
    rates: &ExchangeRateMap,
    terminal_value: Decimal,
    terminal_date: NaiveDate,
) -> Result<Vec<CashFlow>> {
    let converter = CurrencyConverter::new(rates);
    let mut flows = Vec::new();

    for trade in trades.iter().filter(|t| is_external_flow(t)) {
        let amount = converter.to_reporting(trade.total_amount, &trade.currency)?;
        let signed = match trade.trade_type {
            TradeType::Deposit => -amount,
            TradeType::Withdrawal => amount,
            TradeType::Buy | TradeType::Sell => continue,
        };
        flows.push(CashFlow {
            date: trade.trade_date,
            amount: signed,
        });
    }

    flows.push(CashFlow {
        date: terminal_date,
        amount: terminal_value,
    });
    flows.sort_by_key(|f| f.date);
    Ok(flows)
}
