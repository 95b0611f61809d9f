use std::result::Result as StdResult;

use thiserror::Error;
use uuid::Uuid;

/// Unified error type for the ledger, aggregation, and storage layers.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Ledger not loaded")]
    LedgerNotLoaded,
    #[error("Transaction not found: {0}")]
    TransactionNotFound(Uuid),
    #[error("Budget goal not found: {0}")]
    BudgetNotFound(Uuid),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Persistence error: {0}")]
    StorageError(String),
}

pub type Result<T> = StdResult<T, CoreError>;

impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        CoreError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::StorageError(err.to_string())
    }
}
