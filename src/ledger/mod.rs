//! The ledger document: transaction store, account registry, budget goals,
//! and the reporting clock, with balance maintenance built into every
//! insert/delete.

#[allow(clippy::module_inception)]
pub mod ledger;

pub use ledger::{Ledger, CURRENT_SCHEMA_VERSION};
