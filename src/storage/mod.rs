//! Persistence boundary: the ledger document is saved and loaded as a whole,
//! so every mutation commits atomically and balances can never be persisted
//! out of step with the transaction history.

pub mod json_backend;

use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::Result;
use crate::ledger::Ledger;

pub use json_backend::JsonStorage;

/// Abstracts the document store the ledger core writes through.
pub trait StorageBackend: Send + Sync {
    fn save(&self, ledger: &Ledger, name: &str) -> Result<()>;
    fn load(&self, name: &str) -> Result<Ledger>;
    fn ledger_path(&self, name: &str) -> PathBuf;
}

pub(crate) fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Default application data directory, with a relative fallback for
/// environments without a platform data dir.
pub fn default_base_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("frugalflow"))
        .unwrap_or_else(|| PathBuf::from(".frugalflow"))
}
