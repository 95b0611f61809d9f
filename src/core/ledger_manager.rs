use std::path::PathBuf;

use uuid::Uuid;

use crate::budget::attach_spent;
use crate::config::Config;
use crate::domain::{AccountId, BudgetGoal, BudgetGoalView, SystemClock, Transaction};
use crate::errors::{CoreError, Result};
use crate::export::Snapshot;
use crate::ledger::{Ledger, CURRENT_SCHEMA_VERSION};
use crate::storage::StorageBackend;

/// Metadata describing the outcome of a load operation.
#[derive(Debug, Clone)]
pub struct LoadMetadata {
    pub warnings: Vec<String>,
    pub path: PathBuf,
    pub name: String,
    pub schema_version: u8,
    pub clock_advanced: bool,
}

/// Facade that coordinates ledger state and persistence.
///
/// Every mutation is applied to a cloned snapshot that is committed through
/// storage before it replaces the in-memory state, so a failed write leaves
/// both the file and the current ledger untouched. That single commit is what
/// keeps balances and transaction history from ever desyncing across a crash.
pub struct LedgerManager {
    current: Option<Ledger>,
    current_name: Option<String>,
    storage: Box<dyn StorageBackend>,
    auto_advance_to_real_date: bool,
}

impl LedgerManager {
    pub fn new(storage: Box<dyn StorageBackend>, config: &Config) -> Self {
        Self {
            current: None,
            current_name: None,
            storage,
            auto_advance_to_real_date: config.auto_advance_to_real_date,
        }
    }

    pub fn storage(&self) -> &dyn StorageBackend {
        self.storage.as_ref()
    }

    pub fn current(&self) -> Result<&Ledger> {
        self.current.as_ref().ok_or(CoreError::LedgerNotLoaded)
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current_name.as_deref()
    }

    /// Creates and persists a fresh ledger under the given name.
    pub fn create(&mut self, name: &str) -> Result<()> {
        let ledger = Ledger::new(name);
        self.storage.save(&ledger, name)?;
        self.current = Some(ledger);
        self.current_name = Some(name.to_string());
        Ok(())
    }

    pub fn load(&mut self, name: &str) -> Result<LoadMetadata> {
        let mut ledger = self.storage.load(name)?;
        if ledger.schema_version > CURRENT_SCHEMA_VERSION {
            return Err(CoreError::StorageError(format!(
                "ledger schema v{} is newer than supported v{}",
                ledger.schema_version, CURRENT_SCHEMA_VERSION
            )));
        }

        let mut warnings = Vec::new();
        // The clock fields come straight off disk, so a hand-edited or
        // corrupted document can carry values new() would have rejected.
        if SystemClock::new(ledger.clock.month, ledger.clock.year).is_err() {
            let bad = ledger.clock;
            ledger.clock = SystemClock::current();
            ledger.touch();
            self.storage.save(&ledger, name)?;
            tracing::warn!(
                "persisted system clock {}/{} is out of range; reset to the real date",
                bad.month,
                bad.year
            );
            warnings.push(format!(
                "persisted system clock {}/{} is out of range; reset to the real date",
                bad.month, bad.year
            ));
        }
        warnings.extend(ledger.verify_balances());
        let mut clock_advanced = false;
        if self.auto_advance_to_real_date {
            let real = SystemClock::current();
            if ledger.clock() != real {
                let stale = ledger.clock();
                ledger.clock = real;
                ledger.touch();
                self.storage.save(&ledger, name)?;
                tracing::info!(
                    "system clock advanced from {}/{} to {}/{}",
                    stale.month,
                    stale.year,
                    real.month,
                    real.year
                );
                warnings.push(format!(
                    "system clock advanced from {}/{} to the real date {}/{}",
                    stale.month, stale.year, real.month, real.year
                ));
                clock_advanced = true;
            }
        }

        let schema_version = ledger.schema_version;
        self.current = Some(ledger);
        self.current_name = Some(name.to_string());
        Ok(LoadMetadata {
            warnings,
            path: self.storage.ledger_path(name),
            name: name.to_string(),
            schema_version,
            clock_advanced,
        })
    }

    fn apply<T>(&mut self, mutate: impl FnOnce(&mut Ledger) -> Result<T>) -> Result<T> {
        let mut next = self.current.clone().ok_or(CoreError::LedgerNotLoaded)?;
        let name = self
            .current_name
            .clone()
            .ok_or_else(|| CoreError::StorageError("current ledger is unnamed".into()))?;
        let value = mutate(&mut next)?;
        self.storage.save(&next, &name)?;
        self.current = Some(next);
        Ok(value)
    }

    // --- transactions ---

    pub fn add_transaction(&mut self, transaction: Transaction) -> Result<Uuid> {
        self.apply(|ledger| Ok(ledger.add_transaction(transaction)))
    }

    pub fn remove_transaction(&mut self, id: Uuid) -> Result<Transaction> {
        self.apply(|ledger| ledger.remove_transaction(id))
    }

    // --- accounts ---

    pub fn set_balance(&mut self, id: AccountId, balance: f64) -> Result<()> {
        self.apply(|ledger| ledger.set_balance(id, balance))
    }

    pub fn reset_balance(&mut self, id: AccountId) -> Result<()> {
        self.apply(|ledger| {
            ledger.reset_balance(id);
            Ok(())
        })
    }

    pub fn rename_account(&mut self, id: AccountId, name: String) -> Result<()> {
        self.apply(|ledger| {
            ledger.rename_account(id, name);
            Ok(())
        })
    }

    pub fn recompute_balance(&mut self, id: AccountId) -> Result<f64> {
        self.apply(|ledger| Ok(ledger.recompute_balance(id)))
    }

    // --- budget goals ---

    pub fn add_budget(&mut self, goal: BudgetGoal) -> Result<Uuid> {
        self.apply(|ledger| Ok(ledger.add_budget(goal)))
    }

    pub fn update_budget(&mut self, goal: BudgetGoal) -> Result<()> {
        self.apply(|ledger| ledger.update_budget(goal))
    }

    pub fn remove_budget(&mut self, id: Uuid) -> Result<BudgetGoal> {
        self.apply(|ledger| ledger.remove_budget(id))
    }

    /// Budget goals with their spend recomputed against the clock period.
    pub fn budget_views(&self) -> Result<Vec<BudgetGoalView>> {
        let ledger = self.current()?;
        let clock = ledger.clock();
        Ok(ledger
            .budgets
            .iter()
            .map(|goal| attach_spent(goal, &ledger.transactions, clock.month, clock.year))
            .collect())
    }

    // --- reporting clock ---

    pub fn set_clock(&mut self, month: u32, year: i32) -> Result<()> {
        self.apply(|ledger| ledger.set_clock(month, year))
    }

    /// Full export snapshot assembled from one consistent state.
    pub fn snapshot(&self) -> Result<Snapshot> {
        Ok(Snapshot::capture(self.current()?))
    }
}
