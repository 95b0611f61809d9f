#![doc(test(attr(deny(warnings))))]

//! Frugal Core is the ledger, budgeting, and reporting engine behind the
//! FrugalFlow personal finance tracker: transaction history with balance
//! maintenance, per-category budget consumption, and period-scoped report
//! aggregates.

pub mod budget;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod export;
pub mod ledger;
pub mod report;
pub mod storage;
pub mod suggest;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Frugal Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
