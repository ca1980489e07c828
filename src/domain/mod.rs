//! Domain types for the paper-trading ledger.
//!
//! This module provides:
//! - Lossless numeric handling via the Decimal wrapper
//! - The Symbol ticker primitive
//! - The Account document with Position holdings
//! - LedgerEvent, the append-only history entry

pub mod account;
pub mod decimal;
pub mod event;
pub mod primitives;

pub use account::{Account, Position};
pub use decimal::Decimal;
pub use event::LedgerEvent;
pub use primitives::Symbol;
