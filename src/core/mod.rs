//! Coordination layer between ledger state and persistence.

pub mod ledger_manager;

pub use ledger_manager::{LedgerManager, LoadMetadata};
