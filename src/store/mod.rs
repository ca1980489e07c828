//! Persistence for the account document.
//!
//! The whole account is one JSON file. Saves go through a temp file in the
//! same directory followed by a rename, so readers never observe a partial
//! document. An advisory lock file brackets the load-mutate-persist sequence
//! of a mutating command; a second concurrent writer fails fast instead of
//! clobbering the file.

use crate::domain::Account;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Error type for ledger store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Ledger file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Ledger {path} is locked by another process (stale lock file? remove {lock})")]
    Locked { path: PathBuf, lock: PathBuf },
}

/// Load/save boundary for the account document.
#[derive(Debug, Clone)]
pub struct LedgerStore {
    path: PathBuf,
}

impl LedgerStore {
    /// Create a store for the given ledger file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The ledger file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the account, or a default zeroed account if no file exists yet.
    pub fn load(&self) -> Result<Account, StoreError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no ledger file, starting from a fresh account");
            return Ok(Account::default());
        }

        let bytes = fs::read(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Persist the whole account atomically (temp file + rename).
    pub fn save(&self, account: &Account) -> Result<(), StoreError> {
        let json =
            serde_json::to_vec_pretty(account).map_err(|source| StoreError::Corrupt {
                path: self.path.clone(),
                source,
            })?;

        let tmp_path = self.path.with_extension("json.tmp");
        let io_err = |source| StoreError::Io {
            path: tmp_path.clone(),
            source,
        };

        let mut tmp = fs::File::create(&tmp_path).map_err(io_err)?;
        tmp.write_all(&json).map_err(io_err)?;
        tmp.sync_all().map_err(io_err)?;
        drop(tmp);

        fs::rename(&tmp_path, &self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), "ledger saved");
        Ok(())
    }

    /// Take the advisory lock for a load-mutate-persist sequence.
    ///
    /// Fails immediately if another process holds it; one writer at a time
    /// is the contract, not a queue.
    pub fn lock(&self) -> Result<StoreLock, StoreError> {
        let lock_path = self.path.with_extension("json.lock");
        match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&lock_path)
        {
            Ok(_) => Ok(StoreLock { path: lock_path }),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Err(StoreError::Locked {
                path: self.path.clone(),
                lock: lock_path,
            }),
            Err(source) => Err(StoreError::Io {
                path: lock_path,
                source,
            }),
        }
    }
}

/// Guard for the advisory lock file; removes it on drop.
#[derive(Debug)]
pub struct StoreLock {
    path: PathBuf,
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Decimal;

    #[test]
    fn test_load_missing_file_yields_default_account() {
        let dir = tempfile::tempdir().unwrap();
        let store = LedgerStore::new(dir.path().join("ledger.json"));
        let account = store.load().unwrap();
        assert_eq!(account, Account::default());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = LedgerStore::new(dir.path().join("ledger.json"));

        let mut account = Account::default();
        account.cash_balance = Decimal::parse("123.45").unwrap();
        store.save(&account).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, account);
    }

    #[test]
    fn test_corrupt_file_is_an_error_not_a_reset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        fs::write(&path, b"{ not json").unwrap();

        let store = LedgerStore::new(&path);
        assert!(matches!(store.load(), Err(StoreError::Corrupt { .. })));
    }

    #[test]
    fn test_lock_excludes_second_writer_and_releases_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let store = LedgerStore::new(dir.path().join("ledger.json"));

        let guard = store.lock().unwrap();
        assert!(matches!(store.lock(), Err(StoreError::Locked { .. })));
        drop(guard);
        store.lock().unwrap();
    }
}
