pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod quote;
pub mod store;

pub use cli::{Cli, Command};
pub use config::Config;
pub use domain::{Account, Decimal, LedgerEvent, Position, Symbol};
pub use error::LedgerError;
pub use quote::{HttpQuoteSource, MockQuoteSource, QuoteError, QuoteSource};
pub use store::{LedgerStore, StoreError};
