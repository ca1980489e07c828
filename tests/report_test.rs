use chrono::{DateTime, Utc};
use paperfolio::engine::{buy, deposit, history_lines, sell, valuate};
use paperfolio::{Account, Decimal, LedgerError, MockQuoteSource, Symbol};

fn d(s: &str) -> Decimal {
    Decimal::parse(s).unwrap()
}

fn t(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000 + secs, 0).unwrap()
}

#[tokio::test]
async fn test_valuation_math() {
    let mut account = Account::default();
    deposit(&mut account, d("1010"), t(0)).unwrap();
    buy(&mut account, Symbol::new("AAPL"), 10, d("100"), t(1)).unwrap();
    sell(&mut account, Symbol::new("AAPL"), 5, d("120"), t(2)).unwrap();

    let quotes = MockQuoteSource::new().with_price("AAPL", d("120"));
    let valuation = valuate(&account, &quotes).await.unwrap();

    assert_eq!(valuation.positions.len(), 1);
    let position = &valuation.positions[0];
    assert_eq!(position.symbol, "AAPL");
    assert_eq!(position.quantity, 5);
    assert_eq!(position.unrealized_pnl, d("100"));
    assert_eq!(position.unrealized_pnl_percent, d("20"));

    assert_eq!(valuation.market_value, d("600"));
    assert_eq!(valuation.cash_balance, d("590"));
    assert_eq!(valuation.total_value, d("1190"));
    assert_eq!(valuation.total_added_funds, d("1010"));

    // (1190 / 1010 - 1) * 100, full precision then rounded for display.
    let expected = (d("1190") / d("1010") - Decimal::from_u64(1)) * Decimal::hundred();
    assert_eq!(valuation.return_percent, Some(expected));
}

#[tokio::test]
async fn test_valuation_with_no_deposits_has_undefined_return() {
    let account = Account::default();
    let quotes = MockQuoteSource::new();
    let valuation = valuate(&account, &quotes).await.unwrap();
    assert_eq!(valuation.return_percent, None);
    assert!(valuation.positions.is_empty());
    assert!(valuation.market_value.is_zero());
}

#[tokio::test]
async fn test_valuation_fails_when_a_held_symbol_cannot_be_priced() {
    let mut account = Account::default();
    deposit(&mut account, d("100000"), t(0)).unwrap();
    buy(&mut account, Symbol::new("AAPL"), 10, d("100"), t(1)).unwrap();
    buy(&mut account, Symbol::new("MSFT"), 10, d("200"), t(2)).unwrap();

    let quotes = MockQuoteSource::new().with_price("AAPL", d("110"));
    let err = valuate(&account, &quotes).await.unwrap_err();
    assert!(matches!(err, LedgerError::SymbolNotFound(s) if s == "MSFT"));
}

#[test]
fn test_history_lines_render_in_stored_order_unfiltered() {
    let mut account = Account::default();
    deposit(&mut account, d("5000"), t(0)).unwrap();
    buy(&mut account, Symbol::new("AAPL"), 10, d("100"), t(1)).unwrap();
    sell(&mut account, Symbol::new("AAPL"), 10, d("90"), t(2)).unwrap();
    deposit(&mut account, d("100"), t(3)).unwrap();

    let lines: Vec<String> = history_lines(&account.history).collect();
    assert_eq!(lines.len(), account.history.len());
    assert!(lines[0].contains("DEPOSIT 5000"));
    assert!(lines[1].contains("BUY AAPL 10"));
    assert!(lines[2].contains("SELL AAPL 10"));
    assert!(lines[2].contains("pnl -100"));
    assert!(lines[3].contains("DEPOSIT 100"));
}
