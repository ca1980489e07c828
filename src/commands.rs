//! Maps one CLI action to one engine or reporting call.
//!
//! All process-exit decisions stay in `main`; this layer returns errors and
//! prints results. Mutating commands hold the store lock for the whole
//! load-mutate-persist sequence and persist before printing the new event.

use crate::cli::Command;
use crate::domain::{Account, Decimal, LedgerEvent, Symbol};
use crate::engine::{self, Valuation};
use crate::error::LedgerError;
use crate::quote::QuoteSource;
use crate::store::LedgerStore;
use anyhow::Result;
use chrono::Utc;
use std::fmt::Write as _;
use tracing::warn;

/// Execute a single command against the ledger.
pub async fn run(cmd: Command, store: &LedgerStore, quotes: &dyn QuoteSource) -> Result<()> {
    match cmd {
        Command::Deposit { amount } => {
            let _lock = store.lock().map_err(LedgerError::Store)?;
            let mut account = store.load().map_err(LedgerError::Store)?;
            let event = engine::deposit(&mut account, amount, Utc::now())?.clone();
            store.save(&account).map_err(LedgerError::Store)?;
            print_event(&event)?;
        }
        Command::Buy { symbol, amount } => {
            let symbol = Symbol::new(symbol);
            let _lock = store.lock().map_err(LedgerError::Store)?;
            let mut account = store.load().map_err(LedgerError::Store)?;
            // Request validation comes before the quote lookup, so a bad
            // request is never masked as a failed lookup.
            engine::precheck_buy(amount)?;
            let price = resolve_price(quotes, &symbol).await?;
            let event = engine::buy(&mut account, symbol, amount, price, Utc::now())?.clone();
            store.save(&account).map_err(LedgerError::Store)?;
            print_event(&event)?;
        }
        Command::Sell { symbol, amount } => {
            let symbol = Symbol::new(symbol);
            let _lock = store.lock().map_err(LedgerError::Store)?;
            let mut account = store.load().map_err(LedgerError::Store)?;
            // Quantity and position checks precede the quote lookup.
            engine::precheck_sell(&account, &symbol, amount)?;
            let price = resolve_price(quotes, &symbol).await?;
            let event = engine::sell(&mut account, symbol, amount, price, Utc::now())?.clone();
            store.save(&account).map_err(LedgerError::Store)?;
            print_event(&event)?;
        }
        Command::List => {
            let account = store.load().map_err(LedgerError::Store)?;
            // With no funds ever added, valuation (and its quote calls) is
            // skipped entirely; history and commission totals still print.
            let valuation = if account.total_added_funds().is_zero() {
                None
            } else {
                Some(engine::valuate(&account, quotes).await?)
            };
            print!("{}", list_output(&account, valuation.as_ref()));
        }
        Command::Quote { symbol } => {
            let symbol = Symbol::new(symbol);
            let price = resolve_price(quotes, &symbol).await?;
            println!("Current price of stock {} is {}", symbol, price);
        }
    }
    Ok(())
}

/// Fetch the latest price; any lookup failure reports the symbol as not
/// found, transient or not.
async fn resolve_price(quotes: &dyn QuoteSource, symbol: &Symbol) -> Result<Decimal, LedgerError> {
    quotes.latest_price(symbol).await.map_err(|e| {
        warn!(symbol = %symbol, error = %e, "quote lookup failed");
        LedgerError::SymbolNotFound(symbol.to_string())
    })
}

fn print_event(event: &LedgerEvent) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(event)?);
    Ok(())
}

/// Render the `list` report: history, commission totals, and — when funds
/// were ever added — the valuation sections.
pub fn list_output(account: &Account, valuation: Option<&Valuation>) -> String {
    let mut out = String::new();

    out.push_str("History\n");
    for line in engine::history_lines(&account.history) {
        let _ = writeln!(out, "{}", line);
    }

    let _ = writeln!(
        out,
        "\nCommission percentage: {}",
        account.commission_rate_percent
    );
    let _ = writeln!(out, "Commission minimum: {}", account.commission_minimum);
    let _ = writeln!(out, "Commissions paid: {}", account.commission_paid_total);

    let Some(valuation) = valuation else {
        return out;
    };

    let _ = writeln!(
        out,
        "\nTotal added funds: {}",
        valuation.total_added_funds
    );
    let _ = writeln!(
        out,
        "Available funds: {}",
        valuation.cash_balance.round_dp(2)
    );
    let _ = writeln!(
        out,
        "\nMarket value: {}",
        valuation.market_value.round_dp(2)
    );
    match valuation.return_percent {
        Some(percent) => {
            let _ = writeln!(
                out,
                "Total value: {} ({}%)",
                valuation.total_value.round_dp(2),
                percent.round_dp(2)
            );
        }
        None => {
            let _ = writeln!(out, "Total value: {}", valuation.total_value.round_dp(2));
        }
    }

    out.push_str("\nYour portfolio\n");
    out.push_str("Symbol\t\tAmount\tPrice\tProfit\n");
    for position in &valuation.positions {
        let _ = writeln!(
            out,
            "{:<10}\t{}\t{}\t{} ({}%)",
            position.symbol,
            position.quantity,
            position.price.round_dp(2),
            position.unrealized_pnl.round_dp(2),
            position.unrealized_pnl_percent.round_dp(2)
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::PositionValuation;

    fn d(s: &str) -> Decimal {
        Decimal::parse(s).unwrap()
    }

    #[test]
    fn test_list_output_without_valuation_has_no_portfolio_section() {
        let account = Account::default();
        let out = list_output(&account, None);
        assert!(out.starts_with("History\n"));
        assert!(out.contains("Commission percentage: 0.2"));
        assert!(!out.contains("Market value"));
        assert!(!out.contains("Your portfolio"));
    }

    #[test]
    fn test_list_output_with_valuation() {
        let account = Account::default();
        let valuation = Valuation {
            positions: vec![PositionValuation {
                symbol: "AAPL".to_string(),
                quantity: 5,
                average_cost: d("100"),
                price: d("120"),
                unrealized_pnl: d("100"),
                unrealized_pnl_percent: d("20"),
            }],
            market_value: d("600"),
            cash_balance: d("590"),
            total_value: d("1190"),
            total_added_funds: d("1010"),
            return_percent: Some(d("17.8218")),
        };

        let out = list_output(&account, Some(&valuation));
        assert!(out.contains("Total added funds: 1010"));
        assert!(out.contains("Market value: 600"));
        assert!(out.contains("Total value: 1190 (17.82%)"));
        assert!(out.contains("AAPL"));
        assert!(out.contains("100 (20%)"));
    }
}
