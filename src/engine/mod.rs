//! Pure accounting operations and read-only reporting over the account.

pub mod accounting;
pub mod report;

pub use accounting::{buy, commission_for, deposit, precheck_buy, precheck_sell, sell};
pub use report::{history_lines, valuate, PositionValuation, Valuation};
