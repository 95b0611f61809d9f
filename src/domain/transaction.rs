use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{CoreError, Result};

use super::{account::AccountId, category::Category};

/// Whether a transaction adds to or draws from an account.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

/// A single recorded movement of money. Immutable once stored; corrections
/// are delete plus re-insert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub description: String,
    pub amount: f64,
    pub category: Category,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(rename = "accountId")]
    pub account: AccountId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
}

impl Transaction {
    /// Builds a validated transaction. The amount must be strictly positive
    /// and finite; the category must belong to the kind's partition. The sign
    /// is derived from the kind, never stored.
    pub fn new(
        date: DateTime<Utc>,
        description: impl Into<String>,
        amount: f64,
        category: Category,
        kind: TransactionKind,
        account: AccountId,
    ) -> Result<Self> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(CoreError::InvalidInput(format!(
                "transaction amount must be a positive number, got {amount}"
            )));
        }
        if !category.valid_for(kind) {
            return Err(CoreError::InvalidInput(format!(
                "category {} is not valid for {:?} transactions",
                category, kind
            )));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            date,
            description: description.into(),
            amount,
            category,
            kind,
            account,
            vendor: None,
        })
    }

    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = Some(vendor.into());
        self
    }

    /// The amount as it affects the routed account's balance.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}
