//! Value types shared across the ledger, aggregation, and export layers.

pub mod account;
pub mod budget;
pub mod category;
pub mod clock;
pub mod transaction;

pub use account::{Account, AccountId, ALL_ACCOUNTS};
pub use budget::{BudgetGoal, BudgetGoalView};
pub use category::{Category, ALL_CATEGORIES, EXPENSE_CATEGORIES, INCOME_CATEGORIES};
pub use clock::SystemClock;
pub use transaction::{Transaction, TransactionKind};
