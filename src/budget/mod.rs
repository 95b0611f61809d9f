//! Budget aggregation: category spend for a calendar month, recomputed from
//! the transaction set on every read.

use chrono::Datelike;

use crate::domain::{BudgetGoal, BudgetGoalView, Category, Transaction, TransactionKind};

/// Sum of expense amounts for the category within the given calendar month.
/// Bucketing is by the transaction date's month/year component, not a rolling
/// window. Pure and commutative; traversal order never matters.
pub fn spent_amount(
    transactions: &[Transaction],
    category: Category,
    month: u32,
    year: i32,
) -> f64 {
    transactions
        .iter()
        .filter(|txn| {
            txn.kind == TransactionKind::Expense
                && txn.category == category
                && txn.date.month0() == month
                && txn.date.year() == year
        })
        .map(|txn| txn.amount)
        .sum()
}

/// Materializes the goal with its consumption for the given month. Always
/// recomputed; no caching lives here, so a stale `spent` cannot be observed.
pub fn attach_spent(
    goal: &BudgetGoal,
    transactions: &[Transaction],
    month: u32,
    year: i32,
) -> BudgetGoalView {
    BudgetGoalView {
        id: goal.id,
        category: goal.category,
        limit: goal.limit,
        spent: spent_amount(transactions, goal.category, month, year),
    }
}
