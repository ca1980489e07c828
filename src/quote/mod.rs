//! Quote source abstraction for looking up the latest trade price.

use crate::domain::{Decimal, Symbol};
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

pub mod http;
pub mod mock;

pub use http::HttpQuoteSource;
pub use mock::MockQuoteSource;

/// Looks up the latest trade price for a ticker symbol.
///
/// One call per lookup; no caching. Implementations own their retry policy,
/// but every failure mode surfaces to the caller the same way: the symbol
/// could not be priced right now.
#[async_trait]
pub trait QuoteSource: Send + Sync + fmt::Debug {
    /// Fetch the latest price for `symbol`.
    ///
    /// # Errors
    /// `QuoteError::NotFound` when the symbol is unknown or currently has no
    /// price; transport variants for network-level failures.
    async fn latest_price(&self, symbol: &Symbol) -> Result<Decimal, QuoteError>;
}

/// Error type for quote lookups.
#[derive(Debug, Clone, Error)]
pub enum QuoteError {
    #[error("symbol {0} not found")]
    NotFound(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },
    #[error("parse error: {0}")]
    Parse(String),
    #[error("rate limited")]
    RateLimited,
}
