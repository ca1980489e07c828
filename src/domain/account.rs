//! The account document: cash, positions, commission schedule, history.

use crate::domain::{Decimal, LedgerEvent, Symbol};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

fn default_commission_rate() -> Decimal {
    Decimal::parse("0.2").expect("static decimal")
}

fn default_commission_minimum() -> Decimal {
    Decimal::parse("10").expect("static decimal")
}

/// A single holding: share count and weighted-average cost per share.
///
/// A symbol present in the position map always has `quantity > 0`; selling a
/// position down to zero removes the entry entirely.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub quantity: u64,
    pub average_cost: Decimal,
}

impl Position {
    /// Merge a new buy into this position with a quantity-weighted average.
    pub fn merge_buy(&self, quantity: u64, price: Decimal) -> Position {
        let old_qty = Decimal::from_u64(self.quantity);
        let new_qty = Decimal::from_u64(quantity);
        let average_cost = (self.average_cost * old_qty + price * new_qty) / (old_qty + new_qty);
        Position {
            quantity: self.quantity + quantity,
            average_cost,
        }
    }

    /// Unrealized profit at `price`, before any commission.
    pub fn unrealized_pnl(&self, price: Decimal) -> Decimal {
        (price - self.average_cost) * Decimal::from_u64(self.quantity)
    }
}

/// The whole persisted account state.
///
/// Loaded as one document, mutated by exactly one operation per program
/// invocation, and saved back as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    #[serde(default)]
    pub cash_balance: Decimal,
    #[serde(default = "default_commission_rate")]
    pub commission_rate_percent: Decimal,
    #[serde(default = "default_commission_minimum")]
    pub commission_minimum: Decimal,
    #[serde(default)]
    pub commission_paid_total: Decimal,
    #[serde(default)]
    pub positions: BTreeMap<Symbol, Position>,
    #[serde(default)]
    pub history: Vec<LedgerEvent>,
}

impl Default for Account {
    fn default() -> Self {
        Account {
            cash_balance: Decimal::zero(),
            commission_rate_percent: default_commission_rate(),
            commission_minimum: default_commission_minimum(),
            commission_paid_total: Decimal::zero(),
            positions: BTreeMap::new(),
            history: Vec::new(),
        }
    }
}

impl Account {
    /// Shares currently held for `symbol` (0 if absent).
    pub fn held_quantity(&self, symbol: &Symbol) -> u64 {
        self.positions.get(symbol).map(|p| p.quantity).unwrap_or(0)
    }

    /// Sum of all deposits ever made, derived from history.
    pub fn total_added_funds(&self) -> Decimal {
        self.history
            .iter()
            .filter_map(LedgerEvent::deposit_amount)
            .fold(Decimal::zero(), |acc, amount| acc + amount)
    }

    /// Add shares bought at `price`, creating or merging the position.
    pub(crate) fn add_shares(&mut self, symbol: Symbol, quantity: u64, price: Decimal) {
        let position = match self.positions.get(&symbol) {
            Some(existing) => existing.merge_buy(quantity, price),
            None => Position {
                quantity,
                average_cost: price,
            },
        };
        self.positions.insert(symbol, position);
    }

    /// Remove sold shares; drops the entry when the position reaches zero.
    ///
    /// Callers must have verified `quantity <= held_quantity(symbol)`.
    pub(crate) fn remove_shares(&mut self, symbol: &Symbol, quantity: u64) {
        if let Some(position) = self.positions.get_mut(symbol) {
            position.quantity -= quantity;
            if position.quantity == 0 {
                self.positions.remove(symbol);
            }
        }
    }
}
