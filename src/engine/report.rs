//! Reporting: point-in-time valuation and history rendering.
//!
//! Valuation fetches one fresh quote per held symbol and derives market
//! value, per-position unrealized P&L, and the total return since inception.
//! Everything here is read-only over the account.

use crate::domain::{Account, Decimal, LedgerEvent};
use crate::error::LedgerError;
use crate::quote::QuoteSource;
use tracing::debug;

/// One held symbol valued at the latest quote.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionValuation {
    pub symbol: String,
    pub quantity: u64,
    pub average_cost: Decimal,
    pub price: Decimal,
    pub unrealized_pnl: Decimal,
    pub unrealized_pnl_percent: Decimal,
}

/// The whole portfolio valued at latest quotes.
#[derive(Debug, Clone, PartialEq)]
pub struct Valuation {
    pub positions: Vec<PositionValuation>,
    pub market_value: Decimal,
    pub cash_balance: Decimal,
    pub total_value: Decimal,
    pub total_added_funds: Decimal,
    /// None when no funds were ever added (return is undefined).
    pub return_percent: Option<Decimal>,
}

/// Value every held position at a fresh quote.
///
/// A failed lookup for any held symbol aborts the valuation; transient and
/// permanent quote failures are reported identically.
pub async fn valuate(
    account: &Account,
    quotes: &dyn QuoteSource,
) -> Result<Valuation, LedgerError> {
    let mut positions = Vec::with_capacity(account.positions.len());
    let mut market_value = Decimal::zero();

    for (symbol, position) in &account.positions {
        let price = quotes
            .latest_price(symbol)
            .await
            .map_err(|e| {
                debug!(symbol = %symbol, error = %e, "quote lookup failed during valuation");
                LedgerError::SymbolNotFound(symbol.to_string())
            })?;

        let unrealized_pnl = position.unrealized_pnl(price);
        let unrealized_pnl_percent =
            (price / position.average_cost - Decimal::from_u64(1)) * Decimal::hundred();

        market_value += price * Decimal::from_u64(position.quantity);
        positions.push(PositionValuation {
            symbol: symbol.to_string(),
            quantity: position.quantity,
            average_cost: position.average_cost,
            price,
            unrealized_pnl,
            unrealized_pnl_percent,
        });
    }

    let total_added_funds = account.total_added_funds();
    let total_value = market_value + account.cash_balance;
    let return_percent = if total_added_funds.is_zero() {
        None
    } else {
        Some((total_value / total_added_funds - Decimal::from_u64(1)) * Decimal::hundred())
    };

    Ok(Valuation {
        positions,
        market_value,
        cash_balance: account.cash_balance,
        total_value,
        total_added_funds,
        return_percent,
    })
}

/// Render the history as human-readable lines, one per event, stored order.
///
/// The iterator is lazy and restartable; nothing is filtered or reordered.
pub fn history_lines(history: &[LedgerEvent]) -> impl Iterator<Item = String> + '_ {
    history.iter().map(render_event)
}

fn render_event(event: &LedgerEvent) -> String {
    match event {
        LedgerEvent::Deposit { amount, timestamp } => {
            format!(" - DEPOSIT {} {}", amount, timestamp.to_rfc3339())
        }
        LedgerEvent::Buy {
            symbol,
            quantity,
            price,
            timestamp,
            ..
        } => format!(
            " - BUY {} {} @ {} {}",
            symbol,
            quantity,
            price.round_dp(2),
            timestamp.to_rfc3339()
        ),
        LedgerEvent::Sell {
            symbol,
            quantity,
            price,
            realized_pnl,
            timestamp,
            ..
        } => format!(
            " - SELL {} {} @ {} pnl {} {}",
            symbol,
            quantity,
            price.round_dp(2),
            realized_pnl.round_dp(2),
            timestamp.to_rfc3339()
        ),
    }
}
