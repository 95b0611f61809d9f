use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Account, AccountId, BudgetGoal, SystemClock, Transaction};
use crate::errors::{CoreError, Result};
use crate::report::ReportRange;

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// Incremental balance updates and a fresh re-sum can disagree in the last
/// few ulps, so discrepancies are judged at half-cent scale.
const BALANCE_TOLERANCE: f64 = 0.005;

/// The persisted ledger document: transaction history, account registry,
/// budget goals, and the reporting clock.
///
/// Every insert or delete adjusts the routed account's balance within the
/// same call, so the in-memory document is never visible in a state where
/// history and balances disagree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    pub name: String,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub budgets: Vec<BudgetGoal>,
    #[serde(default)]
    pub clock: SystemClock,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Ledger::schema_version_default")]
    pub schema_version: u8,
}

impl Ledger {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            transactions: Vec::new(),
            accounts: Vec::new(),
            budgets: Vec::new(),
            clock: SystemClock::current(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    // --- transaction store ---

    /// Stores a transaction and applies its signed amount to the routed
    /// account, creating the account at zero on first reference.
    pub fn add_transaction(&mut self, transaction: Transaction) -> Uuid {
        let id = transaction.id;
        let account = transaction.account;
        let delta = transaction.signed_amount();
        self.transactions.push(transaction);
        self.account_entry(account).balance += delta;
        self.touch();
        id
    }

    /// Removes the transaction and applies the exact inverse adjustment.
    pub fn remove_transaction(&mut self, id: Uuid) -> Result<Transaction> {
        let pos = self
            .transactions
            .iter()
            .position(|txn| txn.id == id)
            .ok_or(CoreError::TransactionNotFound(id))?;
        let removed = self.transactions.remove(pos);
        self.account_entry(removed.account).balance -= removed.signed_amount();
        self.touch();
        Ok(removed)
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    /// Stable insertion-order filter over the transaction set.
    pub fn query<F>(&self, predicate: F) -> Vec<&Transaction>
    where
        F: Fn(&Transaction) -> bool,
    {
        self.transactions
            .iter()
            .filter(|txn| predicate(txn))
            .collect()
    }

    /// Display ordering. Aggregation never depends on this; all reducers are
    /// commutative sums.
    pub fn transactions_by_date_desc(&self) -> Vec<&Transaction> {
        let mut sorted: Vec<&Transaction> = self.transactions.iter().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    // --- account registry ---

    pub fn account(&self, id: AccountId) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id == id)
    }

    /// Stored balance for the account; zero when it was never referenced.
    pub fn balance(&self, id: AccountId) -> f64 {
        self.account(id).map(|account| account.balance).unwrap_or(0.0)
    }

    fn account_entry(&mut self, id: AccountId) -> &mut Account {
        let pos = match self.accounts.iter().position(|account| account.id == id) {
            Some(pos) => pos,
            None => {
                self.accounts.push(Account::new(id));
                self.accounts.len() - 1
            }
        };
        &mut self.accounts[pos]
    }

    /// Administrative override. Bypasses transaction-derived computation and
    /// touches no transaction.
    pub fn set_balance(&mut self, id: AccountId, balance: f64) -> Result<()> {
        if !balance.is_finite() {
            return Err(CoreError::InvalidInput(format!(
                "balance must be a finite number, got {balance}"
            )));
        }
        self.account_entry(id).balance = balance;
        self.touch();
        Ok(())
    }

    pub fn reset_balance(&mut self, id: AccountId) {
        self.account_entry(id).balance = 0.0;
        self.touch();
    }

    pub fn rename_account(&mut self, id: AccountId, name: impl Into<String>) {
        self.account_entry(id).name = name.into();
        self.touch();
    }

    /// The balance as re-derived from transaction history alone, ignoring the
    /// stored running total.
    pub fn derived_balance(&self, id: AccountId) -> f64 {
        self.transactions
            .iter()
            .filter(|txn| txn.account == id)
            .map(|txn| txn.signed_amount())
            .sum()
    }

    /// Repair operation: replaces the stored balance with the derived sum and
    /// returns it. Discards any manual override.
    pub fn recompute_balance(&mut self, id: AccountId) -> f64 {
        let derived = self.derived_balance(id);
        self.account_entry(id).balance = derived;
        self.touch();
        derived
    }

    /// Compares stored balances against derived sums and reports any
    /// discrepancy. A non-empty result points at a manual override or a
    /// latent integrity problem; `recompute_balance` repairs the latter.
    pub fn verify_balances(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        for account in &self.accounts {
            let derived = self.derived_balance(account.id);
            if (account.balance - derived).abs() > BALANCE_TOLERANCE {
                let warning = format!(
                    "account {} balance {:.2} differs from transaction-derived {:.2}",
                    account.id, account.balance, derived
                );
                tracing::warn!("{warning}");
                warnings.push(warning);
            }
        }
        warnings
    }

    // --- budget goals ---

    /// Stores a budget goal. Duplicates per category are tolerated; each is
    /// aggregated independently.
    pub fn add_budget(&mut self, goal: BudgetGoal) -> Uuid {
        let id = goal.id;
        self.budgets.push(goal);
        self.touch();
        id
    }

    pub fn update_budget(&mut self, goal: BudgetGoal) -> Result<()> {
        let existing = self
            .budgets
            .iter_mut()
            .find(|candidate| candidate.id == goal.id)
            .ok_or(CoreError::BudgetNotFound(goal.id))?;
        *existing = goal;
        self.touch();
        Ok(())
    }

    pub fn remove_budget(&mut self, id: Uuid) -> Result<BudgetGoal> {
        let pos = self
            .budgets
            .iter()
            .position(|goal| goal.id == id)
            .ok_or(CoreError::BudgetNotFound(id))?;
        let removed = self.budgets.remove(pos);
        self.touch();
        Ok(removed)
    }

    pub fn budget(&self, id: Uuid) -> Option<&BudgetGoal> {
        self.budgets.iter().find(|goal| goal.id == id)
    }

    // --- reporting clock ---

    pub fn clock(&self) -> SystemClock {
        self.clock
    }

    pub fn set_clock(&mut self, month: u32, year: i32) -> Result<()> {
        self.clock = SystemClock::new(month, year)?;
        self.touch();
        Ok(())
    }

    /// The clock month as a report range, the default window for
    /// month-scoped aggregation.
    pub fn current_period(&self) -> Result<ReportRange> {
        ReportRange::month(self.clock.month, self.clock.year)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, TransactionKind};
    use chrono::TimeZone;

    fn expense(amount: f64, account: AccountId) -> Transaction {
        let date = Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap();
        Transaction::new(
            date,
            "Groceries",
            amount,
            Category::Food,
            TransactionKind::Expense,
            account,
        )
        .unwrap()
    }

    #[test]
    fn accounts_are_created_lazily_at_zero() {
        let mut ledger = Ledger::new("Household");
        assert!(ledger.account(AccountId::Cash).is_none());
        ledger.add_transaction(expense(20.0, AccountId::Cash));
        let cash = ledger.account(AccountId::Cash).expect("created on first use");
        assert_eq!(cash.balance, -20.0);
        assert_eq!(cash.name, "Cash");
    }

    #[test]
    fn remove_unknown_transaction_fails() {
        let mut ledger = Ledger::new("Household");
        let err = ledger
            .remove_transaction(Uuid::new_v4())
            .expect_err("nothing stored yet");
        assert!(matches!(err, CoreError::TransactionNotFound(_)));
    }

    #[test]
    fn query_preserves_insertion_order() {
        let mut ledger = Ledger::new("Household");
        let first = ledger.add_transaction(expense(10.0, AccountId::Primary));
        let second = ledger.add_transaction(expense(20.0, AccountId::Primary));
        let matches = ledger.query(|txn| txn.account == AccountId::Primary);
        assert_eq!(matches[0].id, first);
        assert_eq!(matches[1].id, second);
    }

    #[test]
    fn verify_balances_flags_manual_override() {
        let mut ledger = Ledger::new("Household");
        ledger.add_transaction(expense(30.0, AccountId::Primary));
        assert!(ledger.verify_balances().is_empty());

        ledger.set_balance(AccountId::Primary, 500.0).unwrap();
        let warnings = ledger.verify_balances();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("primary"));

        assert_eq!(ledger.recompute_balance(AccountId::Primary), -30.0);
        assert!(ledger.verify_balances().is_empty());
    }

    #[test]
    fn verify_balances_tolerates_float_rounding_from_incremental_updates() {
        let mut ledger = Ledger::new("Household");
        // Mixing magnitudes makes the incremental running total and a fresh
        // re-sum land on different last bits.
        let big = ledger.add_transaction(expense(100_000_000.01, AccountId::Primary));
        ledger.add_transaction(expense(0.01, AccountId::Primary));
        ledger.remove_transaction(big).unwrap();

        assert!(ledger.verify_balances().is_empty());
        assert!((ledger.balance(AccountId::Primary) + 0.01).abs() < 0.005);
    }

    #[test]
    fn update_budget_requires_existing_goal() {
        let mut ledger = Ledger::new("Household");
        let goal = BudgetGoal::new(Category::Food, 400.0).unwrap();
        let err = ledger.update_budget(goal).expect_err("goal never added");
        assert!(matches!(err, CoreError::BudgetNotFound(_)));
    }
}
