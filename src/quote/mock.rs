//! Mock quote source for testing without network calls.

use super::{QuoteError, QuoteSource};
use crate::domain::{Decimal, Symbol};
use async_trait::async_trait;
use std::collections::HashMap;

/// Quote source that serves prices from an in-memory table.
///
/// Symbols without an entry behave like unknown tickers.
#[derive(Debug, Clone, Default)]
pub struct MockQuoteSource {
    prices: HashMap<Symbol, Decimal>,
}

impl MockQuoteSource {
    /// Create an empty mock quote source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a price for a symbol.
    pub fn with_price(mut self, symbol: impl AsRef<str>, price: Decimal) -> Self {
        self.prices.insert(Symbol::new(symbol), price);
        self
    }
}

#[async_trait]
impl QuoteSource for MockQuoteSource {
    async fn latest_price(&self, symbol: &Symbol) -> Result<Decimal, QuoteError> {
        self.prices
            .get(symbol)
            .copied()
            .ok_or_else(|| QuoteError::NotFound(symbol.to_string()))
    }
}
