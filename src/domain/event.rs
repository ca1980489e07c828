//! Ledger events: the append-only history of everything that changed cash.

use crate::domain::{Decimal, Symbol};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single entry in the account history.
///
/// Events are appended in chronological order and never mutated, reordered,
/// or filtered afterwards; every balance in the account is derivable from
/// replaying them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LedgerEvent {
    /// Cash added to the account.
    Deposit {
        amount: Decimal,
        timestamp: DateTime<Utc>,
    },
    /// Shares bought at the quoted price.
    Buy {
        symbol: Symbol,
        quantity: u64,
        price: Decimal,
        notional: Decimal,
        commission: Decimal,
        timestamp: DateTime<Utc>,
    },
    /// Shares sold at the quoted price.
    Sell {
        symbol: Symbol,
        quantity: u64,
        price: Decimal,
        notional: Decimal,
        commission: Decimal,
        realized_pnl: Decimal,
        timestamp: DateTime<Utc>,
    },
}

impl LedgerEvent {
    /// The event timestamp.
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            LedgerEvent::Deposit { timestamp, .. }
            | LedgerEvent::Buy { timestamp, .. }
            | LedgerEvent::Sell { timestamp, .. } => *timestamp,
        }
    }

    /// Deposited amount, or None for trade events.
    pub fn deposit_amount(&self) -> Option<Decimal> {
        match self {
            LedgerEvent::Deposit { amount, .. } => Some(*amount),
            _ => None,
        }
    }
}
