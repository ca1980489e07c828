use crate::domain::Decimal;
use clap::{Parser, Subcommand};

/// Command surface: exactly one action per invocation.
#[derive(Parser)]
#[command(name = "paperfolio")]
#[command(about = "Simulate buying, holding, and selling stocks", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Add cash to the account
    Deposit {
        /// Amount of cash to add
        #[arg(long, short)]
        amount: Decimal,
    },

    /// Buy shares at the latest quoted price
    Buy {
        /// Ticker symbol
        #[arg(long, short)]
        symbol: String,

        /// Number of shares
        #[arg(long, short)]
        amount: u64,
    },

    /// Sell shares at the latest quoted price
    Sell {
        /// Ticker symbol
        #[arg(long, short)]
        symbol: String,

        /// Number of shares
        #[arg(long, short)]
        amount: u64,
    },

    /// Print ledger history, commission totals, and a portfolio valuation
    List,

    /// Look up the latest price of a symbol
    Quote {
        /// Ticker symbol
        #[arg(long, short)]
        symbol: String,
    },
}
