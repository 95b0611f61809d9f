use serde::{Deserialize, Serialize};

/// The fixed set of balance-holding accounts transactions are routed through.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AccountId {
    Primary,
    Cash,
}

pub const ALL_ACCOUNTS: &[AccountId] = &[AccountId::Primary, AccountId::Cash];

impl AccountId {
    pub fn display_name(&self) -> &'static str {
        match self {
            AccountId::Primary => "Main Account",
            AccountId::Cash => "Cash",
        }
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountId::Primary => f.write_str("primary"),
            AccountId::Cash => f.write_str("cash"),
        }
    }
}

/// A balance-holding account. Created lazily at zero the first time a
/// transaction references it; never deleted, only reset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub balance: f64,
}

impl Account {
    /// Creates the account with a zero balance and its default display name.
    pub fn new(id: AccountId) -> Self {
        Self {
            id,
            name: id.display_name().to_string(),
            balance: 0.0,
        }
    }
}
