//! Domain primitives: the Symbol ticker newtype.

use serde::{Deserialize, Serialize};

/// Stock ticker symbol (e.g., "AAPL", "NOKIA.HE").
///
/// Normalized to uppercase on construction so "aapl" and "AAPL" address the
/// same position entry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Symbol(String);

impl Symbol {
    /// Create a Symbol, trimming whitespace and uppercasing.
    pub fn new(symbol: impl AsRef<str>) -> Self {
        Symbol(symbol.as_ref().trim().to_uppercase())
    }

    /// Get the symbol as a string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
