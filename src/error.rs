use crate::domain::Decimal;
use thiserror::Error;

/// Errors surfaced by the accounting engine and its collaborators.
///
/// Every variant is detected before any account mutation, so a returned error
/// always means the document on disk is untouched.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Amount must be a positive whole number")]
    InvalidAmount,

    #[error("Symbol {0} not found")]
    SymbolNotFound(String),

    #[error("You cannot afford that. Your funds: {available}, funds required: {required}")]
    InsufficientFunds {
        available: Decimal,
        required: Decimal,
    },

    #[error("Amount too large. You own {held} shares of {symbol}")]
    OverSell { symbol: String, held: u64 },

    #[error("You do not own stock {0}")]
    NoSuchPosition(String),

    #[error("Ledger store error: {0}")]
    Store(#[from] crate::store::StoreError),
}
