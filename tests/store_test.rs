use chrono::{DateTime, Utc};
use paperfolio::engine::{buy, deposit, sell};
use paperfolio::{Account, Decimal, LedgerStore, StoreError, Symbol};

fn d(s: &str) -> Decimal {
    Decimal::parse(s).unwrap()
}

fn t(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000 + secs, 0).unwrap()
}

fn populated_account() -> Account {
    let mut account = Account::default();
    deposit(&mut account, d("5000"), t(0)).unwrap();
    buy(&mut account, Symbol::new("AAPL"), 10, d("100"), t(1)).unwrap();
    buy(&mut account, Symbol::new("NOKIA.HE"), 200, d("4.15"), t(2)).unwrap();
    sell(&mut account, Symbol::new("AAPL"), 3, d("120"), t(3)).unwrap();
    account
}

#[test]
fn test_roundtrip_preserves_whole_account() {
    let dir = tempfile::tempdir().unwrap();
    let store = LedgerStore::new(dir.path().join("ledger.json"));

    let account = populated_account();
    store.save(&account).unwrap();
    let loaded = store.load().unwrap();

    // Cash, positions, history, and commission totals all survive.
    assert_eq!(loaded, account);
    assert_eq!(loaded.history.len(), 4);
    assert_eq!(loaded.positions.len(), 2);
}

#[test]
fn test_missing_file_loads_default_zeroed_account() {
    let dir = tempfile::tempdir().unwrap();
    let store = LedgerStore::new(dir.path().join("nonexistent.json"));
    let account = store.load().unwrap();
    assert_eq!(account, Account::default());
    assert!(!dir.path().join("nonexistent.json").exists());
}

#[test]
fn test_save_replaces_document_atomically() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.json");
    let store = LedgerStore::new(&path);

    store.save(&Account::default()).unwrap();
    let account = populated_account();
    store.save(&account).unwrap();

    assert_eq!(store.load().unwrap(), account);
    // No temp file residue after a completed save.
    assert!(!dir.path().join("ledger.json.tmp").exists());
}

#[test]
fn test_lock_prevents_concurrent_writer() {
    let dir = tempfile::tempdir().unwrap();
    let store = LedgerStore::new(dir.path().join("ledger.json"));

    let guard = store.lock().unwrap();
    let second = LedgerStore::new(dir.path().join("ledger.json"));
    assert!(matches!(second.lock(), Err(StoreError::Locked { .. })));

    drop(guard);
    second.lock().unwrap();
}

#[test]
fn test_document_is_readable_json_with_tagged_events() {
    let dir = tempfile::tempdir().unwrap();
    let store = LedgerStore::new(dir.path().join("ledger.json"));
    store.save(&populated_account()).unwrap();

    let raw = std::fs::read_to_string(store.path()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["history"][0]["type"], "DEPOSIT");
    assert_eq!(json["history"][1]["type"], "BUY");
    assert_eq!(json["history"][3]["type"], "SELL");
    assert!(json["positions"]["AAPL"]["quantity"].is_number());
}
