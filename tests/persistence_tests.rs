use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{TimeZone, Utc};
use frugal_core::{
    config::Config,
    core::LedgerManager,
    domain::{AccountId, BudgetGoal, Category, SystemClock, Transaction, TransactionKind},
    errors::CoreError,
    ledger::{Ledger, CURRENT_SCHEMA_VERSION},
    storage::{JsonStorage, StorageBackend},
};
use tempfile::tempdir;

fn groceries() -> Transaction {
    let date = Utc.with_ymd_and_hms(2024, 3, 5, 9, 0, 0).unwrap();
    Transaction::new(
        date,
        "Groceries",
        75.50,
        Category::Food,
        TransactionKind::Expense,
        AccountId::Primary,
    )
    .unwrap()
}

fn manager_in(dir: PathBuf, config: &Config) -> LedgerManager {
    let storage = JsonStorage::new(Some(dir)).expect("json storage");
    LedgerManager::new(Box::new(storage), config)
}

#[test]
fn create_mutate_and_reload_roundtrip() {
    let temp = tempdir().unwrap();
    let config = Config::default();

    let mut manager = manager_in(temp.path().to_path_buf(), &config);
    manager.create("household").unwrap();
    manager.add_transaction(groceries()).unwrap();
    manager
        .add_budget(BudgetGoal::new(Category::Food, 400.0).unwrap())
        .unwrap();

    let mut reloaded = manager_in(temp.path().to_path_buf(), &config);
    let metadata = reloaded.load("household").unwrap();
    assert_eq!(metadata.schema_version, CURRENT_SCHEMA_VERSION);
    let ledger = reloaded.current().unwrap();
    assert_eq!(ledger.transaction_count(), 1);
    assert_eq!(ledger.balance(AccountId::Primary), -75.50);
    assert_eq!(ledger.budgets.len(), 1);
}

#[test]
fn budget_views_recompute_spend_for_the_clock_period() {
    let temp = tempdir().unwrap();
    let config = Config::default();
    let mut manager = manager_in(temp.path().to_path_buf(), &config);
    manager.create("household").unwrap();
    manager.set_clock(2, 2024).unwrap();
    manager.add_transaction(groceries()).unwrap();
    manager
        .add_budget(BudgetGoal::new(Category::Food, 400.0).unwrap())
        .unwrap();

    let views = manager.budget_views().unwrap();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].spent, 75.50);

    let snapshot = manager.snapshot().unwrap();
    assert_eq!(snapshot.system_month, 2);
    assert_eq!(snapshot.system_year, 2024);
    assert_eq!(snapshot.budgets[0].spent, 75.50);
}

struct FailingStorage {
    inner: JsonStorage,
    fail_saves: AtomicBool,
}

impl StorageBackend for FailingStorage {
    fn save(&self, ledger: &Ledger, name: &str) -> Result<(), CoreError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(CoreError::StorageError("disk unavailable".into()));
        }
        self.inner.save(ledger, name)
    }

    fn load(&self, name: &str) -> Result<Ledger, CoreError> {
        self.inner.load(name)
    }

    fn ledger_path(&self, name: &str) -> PathBuf {
        self.inner.ledger_path(name)
    }
}

#[test]
fn failed_commit_leaves_memory_and_disk_untouched() {
    let temp = tempdir().unwrap();
    let config = Config::default();

    let mut seeder = manager_in(temp.path().to_path_buf(), &config);
    seeder.create("household").unwrap();
    seeder.add_transaction(groceries()).unwrap();
    let before = seeder.current().unwrap().clone();

    let storage = FailingStorage {
        inner: JsonStorage::new(Some(temp.path().to_path_buf())).unwrap(),
        fail_saves: AtomicBool::new(true),
    };
    let mut manager = LedgerManager::new(Box::new(storage), &config);
    manager.load("household").unwrap();

    let err = manager
        .add_transaction(groceries())
        .expect_err("save must fail");
    assert!(matches!(err, CoreError::StorageError(_)));

    // In-memory state unchanged by the failed commit.
    let current = manager.current().unwrap();
    assert_eq!(current.transaction_count(), before.transaction_count());
    assert_eq!(
        current.balance(AccountId::Primary),
        before.balance(AccountId::Primary)
    );

    // On-disk state also unchanged.
    let mut verifier = manager_in(temp.path().to_path_buf(), &config);
    verifier.load("household").unwrap();
    assert_eq!(
        verifier.current().unwrap().transaction_count(),
        before.transaction_count()
    );
}

#[test]
fn stale_clock_is_advanced_on_load_when_configured() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::new(Some(temp.path().to_path_buf())).unwrap();

    let mut ledger = Ledger::new("household");
    ledger.set_clock(0, 2000).unwrap();
    storage.save(&ledger, "household").unwrap();

    let config = Config::default();
    assert!(config.auto_advance_to_real_date);
    let mut manager = manager_in(temp.path().to_path_buf(), &config);
    let metadata = manager.load("household").unwrap();
    assert!(metadata.clock_advanced);
    assert!(metadata.warnings.iter().any(|w| w.contains("advanced")));
    assert_eq!(manager.current().unwrap().clock(), SystemClock::current());

    // The advanced clock was persisted, not just patched in memory.
    let reloaded = storage.load("household").unwrap();
    assert_eq!(reloaded.clock(), SystemClock::current());
}

#[test]
fn explicit_clock_override_survives_when_auto_advance_is_off() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::new(Some(temp.path().to_path_buf())).unwrap();

    let mut ledger = Ledger::new("household");
    ledger.set_clock(0, 2000).unwrap();
    storage.save(&ledger, "household").unwrap();

    let mut config = Config::default();
    config.auto_advance_to_real_date = false;
    let mut manager = manager_in(temp.path().to_path_buf(), &config);
    let metadata = manager.load("household").unwrap();
    assert!(!metadata.clock_advanced);
    assert_eq!(
        manager.current().unwrap().clock(),
        SystemClock::new(0, 2000).unwrap()
    );
}

#[test]
fn out_of_range_persisted_clock_is_reset_with_a_warning() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::new(Some(temp.path().to_path_buf())).unwrap();

    // Serde alone cannot reject this; the fields are plain numbers on disk.
    let mut ledger = Ledger::new("household");
    ledger.clock = SystemClock {
        month: 12,
        year: 2024,
    };
    storage.save(&ledger, "household").unwrap();

    let mut config = Config::default();
    config.auto_advance_to_real_date = false;
    let mut manager = manager_in(temp.path().to_path_buf(), &config);
    let metadata = manager.load("household").unwrap();
    assert!(metadata.warnings.iter().any(|w| w.contains("out of range")));

    let current = manager.current().unwrap();
    assert_eq!(current.clock(), SystemClock::current());
    assert!(current.current_period().is_ok());

    // The repaired clock was persisted, not just patched in memory.
    let reloaded = storage.load("household").unwrap();
    assert_eq!(reloaded.clock(), SystemClock::current());
}

#[test]
fn newer_schema_versions_are_rejected() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::new(Some(temp.path().to_path_buf())).unwrap();

    let mut ledger = Ledger::new("future");
    ledger.schema_version = CURRENT_SCHEMA_VERSION + 5;
    storage.save(&ledger, "future").unwrap();

    let config = Config::default();
    let mut manager = manager_in(temp.path().to_path_buf(), &config);
    let err = manager.load("future").expect_err("future schema must fail");
    match err {
        CoreError::StorageError(message) => {
            assert!(message.contains("newer"), "unexpected error: {message}")
        }
        other => panic!("expected storage error, got {other:?}"),
    }
}

#[test]
fn mutations_require_a_loaded_ledger() {
    let temp = tempdir().unwrap();
    let config = Config::default();
    let mut manager = manager_in(temp.path().to_path_buf(), &config);
    let err = manager
        .add_transaction(groceries())
        .expect_err("nothing loaded");
    assert!(matches!(err, CoreError::LedgerNotLoaded));
}
