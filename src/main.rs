use clap::Parser;
use paperfolio::quote::HttpQuoteSource;
use paperfolio::{commands, Cli, Config, LedgerStore};

#[tokio::main]
async fn main() {
    // Initialize tracing; logs go to stderr so command output stays clean.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let cli = Cli::parse();
    let store = LedgerStore::new(&config.ledger_path);
    let quotes = HttpQuoteSource::new(config.quote_api_url.clone(), config.quote_timeout);

    if let Err(e) = commands::run(cli.cmd, &store, &quotes).await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
