use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{CoreError, Result};

use super::category::Category;

/// A per-category monthly spending cap. The consumed amount is never stored
/// here; see [`crate::budget::attach_spent`] for the derived view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetGoal {
    pub id: Uuid,
    pub category: Category,
    pub limit: f64,
}

impl BudgetGoal {
    pub fn new(category: Category, limit: f64) -> Result<Self> {
        if !limit.is_finite() || limit <= 0.0 {
            return Err(CoreError::InvalidInput(format!(
                "budget limit must be a positive number, got {limit}"
            )));
        }
        if !category.is_expense() {
            return Err(CoreError::InvalidInput(format!(
                "budget goals track spending; {category} is not an expense category"
            )));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            category,
            limit,
        })
    }
}

/// A budget goal with its consumption recomputed from the ledger for a
/// specific month. Produced on read, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetGoalView {
    pub id: Uuid,
    pub category: Category,
    pub limit: f64,
    pub spent: f64,
}

impl BudgetGoalView {
    pub fn remaining(&self) -> f64 {
        self.limit - self.spent
    }

    pub fn percent_used(&self) -> Option<f64> {
        if self.limit > 0.0 {
            Some((self.spent / self.limit) * 100.0)
        } else {
            None
        }
    }
}
