//! Snapshot assembly for the export collaborator. The snapshot is built from
//! a single in-memory state, so all fields are consistent as of one point in
//! time; budget spend is recomputed during capture, never read from storage.

use serde::Serialize;

use crate::budget::attach_spent;
use crate::domain::{Account, BudgetGoalView, Transaction};
use crate::ledger::Ledger;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<BudgetGoalView>,
    pub accounts: Vec<Account>,
    pub system_month: u32,
    pub system_year: i32,
}

impl Snapshot {
    pub fn capture(ledger: &Ledger) -> Self {
        let clock = ledger.clock();
        let budgets = ledger
            .budgets
            .iter()
            .map(|goal| attach_spent(goal, &ledger.transactions, clock.month, clock.year))
            .collect();
        Self {
            transactions: ledger.transactions.clone(),
            budgets,
            accounts: ledger.accounts.clone(),
            system_month: clock.month,
            system_year: clock.year,
        }
    }
}
