//! Ledger replay with FIFO cost-basis matching.
//!
//! Matching discipline: first-in, first-out per asset key, applied
//! consistently to every sell. Buy fees are capitalized into the lot's
//! cost basis; sell fees reduce proceeds.

use std::collections::HashMap;

use log::warn;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::assets::Holding;
use crate::constants::DECIMAL_PRECISION;
use crate::portfolio::valuation::{combine_holdings, value_holding};
use crate::trades::{Trade, TradeType};

use super::{is_quantity_significant, AssetPnl, PnlReport, TradeLot};

#[derive(Default)]
struct LedgerPosition {
    lots: Vec<TradeLot>,
    realized_pnl: Decimal,
    invested_from_trades: Decimal,
}

/// Relieves `quantity` from the front of the lot queue.
/// Returns (matched quantity, matched cost basis).
fn reduce_lots_fifo(lots: &mut Vec<TradeLot>, quantity: Decimal) -> (Decimal, Decimal) {
    let mut remaining = quantity;
    let mut matched_quantity = Decimal::ZERO;
    let mut matched_cost = Decimal::ZERO;

    while remaining > Decimal::ZERO {
        let Some(lot) = lots.first_mut() else { break };

        if lot.quantity <= remaining {
            remaining -= lot.quantity;
            matched_quantity += lot.quantity;
            matched_cost += lot.cost_basis;
            lots.remove(0);
        } else {
            let cost_removed = lot.cost_basis * remaining / lot.quantity;
            lot.quantity -= remaining;
            lot.cost_basis -= cost_removed;
            matched_quantity += remaining;
            matched_cost += cost_removed;
            remaining = Decimal::ZERO;
            if !is_quantity_significant(&lot.quantity) {
                // Residue of a near-total relief; not a real open lot.
                lots.remove(0);
            }
        }
    }

    (matched_quantity, matched_cost)
}

fn replay_ledger(trades: &[Trade]) -> HashMap<String, LedgerPosition> {
    let mut sorted: Vec<&Trade> = trades.iter().filter(|t| t.is_market_trade()).collect();
    sorted.sort_by_key(|t| t.trade_date);

    let mut positions: HashMap<String, LedgerPosition> = HashMap::new();
    for trade in sorted {
        let position = positions.entry(trade.asset_key()).or_default();
        match trade.trade_type {
            TradeType::Buy => {
                let cost_basis = trade.quantity * trade.price + trade.fees;
                position.lots.push(TradeLot {
                    quantity: trade.quantity,
                    cost_basis,
                    acquisition_date: trade.trade_date,
                });
                position.invested_from_trades += cost_basis;
            }
            TradeType::Sell => {
                let available: Decimal = position.lots.iter().map(|l| l.quantity).sum();
                let mut quantity = trade.quantity;
                if quantity > available {
                    warn!(
                        "Sell of {} {} exceeds open quantity {}; clamping",
                        quantity,
                        trade.asset_key(),
                        available
                    );
                    quantity = available;
                }
                if quantity.is_zero() {
                    continue;
                }

                let (matched_quantity, matched_cost) =
                    reduce_lots_fifo(&mut position.lots, quantity);
                let proceeds = matched_quantity * trade.price - trade.fees;
                position.realized_pnl += proceeds - matched_cost;
            }
            TradeType::Deposit | TradeType::Withdrawal => {}
        }
    }

    positions
}

/// Reconciles realized P&L from the ledger with unrealized P&L from the
/// open holdings, per asset key and in total. Keys that exist only in the
/// ledger (fully closed) and keys that exist only as holdings both get an
/// entry, so the portfolio total covers everything.
pub fn allocate_pnl(trades: &[Trade], holdings: &[Holding]) -> PnlReport {
    let positions = replay_ledger(trades);

    let mut unrealized_by_key: HashMap<String, (Decimal, Decimal)> = HashMap::new();
    for holding in combine_holdings(holdings) {
        let valuation = value_holding(&holding);
        let entry = unrealized_by_key
            .entry(holding.asset_key())
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        entry.0 += valuation.gain_loss;
        entry.1 += holding.quantity;
    }

    let mut keys: Vec<String> = positions
        .keys()
        .chain(unrealized_by_key.keys())
        .cloned()
        .collect();
    keys.sort();
    keys.dedup();

    let mut assets = Vec::with_capacity(keys.len());
    let mut total_realized = Decimal::ZERO;
    let mut total_unrealized = Decimal::ZERO;

    for key in keys {
        let (realized, invested_from_trades, open_lots) = positions
            .get(&key)
            .map(|p| (p.realized_pnl, p.invested_from_trades, p.lots.clone()))
            .unwrap_or((Decimal::ZERO, Decimal::ZERO, Vec::new()));
        let (unrealized, open_quantity) = unrealized_by_key
            .get(&key)
            .copied()
            .unwrap_or((Decimal::ZERO, Decimal::ZERO));

        // Round the components once and derive every total from the
        // rounded values, so realized + unrealized == total holds exactly.
        let realized_pnl = realized.round_dp(DECIMAL_PRECISION);
        let unrealized_pnl = unrealized.round_dp(DECIMAL_PRECISION);
        let total_pnl = realized_pnl + unrealized_pnl;
        let roi_percent = if invested_from_trades > Decimal::ZERO {
            (total_pnl / invested_from_trades * dec!(100)).round_dp(DECIMAL_PRECISION)
        } else {
            Decimal::ZERO
        };

        total_realized += realized_pnl;
        total_unrealized += unrealized_pnl;

        assets.push(AssetPnl {
            asset_key: key,
            realized_pnl,
            unrealized_pnl,
            total_pnl,
            invested_from_trades: invested_from_trades.round_dp(DECIMAL_PRECISION),
            open_quantity,
            open_lots,
            roi_percent,
        });
    }

    PnlReport {
        total_pnl: total_realized + total_unrealized,
        total_realized,
        total_unrealized,
        assets,
    }
}
