use serde::{Deserialize, Serialize};

use super::transaction::TransactionKind;

/// Closed set of labels a transaction can carry. The expense and income
/// partitions overlap (e.g. Gifts, Investments, Other are valid for both).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Food,
    #[serde(rename = "Rent/Mortgage")]
    RentMortgage,
    Transportation,
    Utilities,
    Healthcare,
    Entertainment,
    Shopping,
    Salary,
    Investments,
    Gifts,
    Freelance,
    Dividends,
    #[serde(rename = "Side Hustle")]
    SideHustle,
    Education,
    #[serde(rename = "Personal Care")]
    PersonalCare,
    Subscriptions,
    Travel,
    #[serde(rename = "Air Fresheners")]
    AirFresheners,
    #[serde(rename = "FD Returns")]
    FdReturns,
    #[serde(rename = "Investment Returns")]
    InvestmentReturns,
    Other,
}

pub const ALL_CATEGORIES: &[Category] = &[
    Category::Food,
    Category::RentMortgage,
    Category::Transportation,
    Category::Utilities,
    Category::Healthcare,
    Category::Entertainment,
    Category::Shopping,
    Category::Salary,
    Category::Investments,
    Category::Gifts,
    Category::Freelance,
    Category::Dividends,
    Category::SideHustle,
    Category::Education,
    Category::PersonalCare,
    Category::Subscriptions,
    Category::Travel,
    Category::AirFresheners,
    Category::FdReturns,
    Category::InvestmentReturns,
    Category::Other,
];

pub const EXPENSE_CATEGORIES: &[Category] = &[
    Category::Food,
    Category::RentMortgage,
    Category::Transportation,
    Category::Utilities,
    Category::Healthcare,
    Category::Entertainment,
    Category::Shopping,
    Category::Gifts,
    Category::Education,
    Category::PersonalCare,
    Category::Subscriptions,
    Category::Travel,
    Category::AirFresheners,
    Category::Investments,
    Category::Other,
];

pub const INCOME_CATEGORIES: &[Category] = &[
    Category::Salary,
    Category::Freelance,
    Category::Dividends,
    Category::SideHustle,
    Category::Gifts,
    Category::FdReturns,
    Category::InvestmentReturns,
    Category::Other,
];

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::RentMortgage => "Rent/Mortgage",
            Category::Transportation => "Transportation",
            Category::Utilities => "Utilities",
            Category::Healthcare => "Healthcare",
            Category::Entertainment => "Entertainment",
            Category::Shopping => "Shopping",
            Category::Salary => "Salary",
            Category::Investments => "Investments",
            Category::Gifts => "Gifts",
            Category::Freelance => "Freelance",
            Category::Dividends => "Dividends",
            Category::SideHustle => "Side Hustle",
            Category::Education => "Education",
            Category::PersonalCare => "Personal Care",
            Category::Subscriptions => "Subscriptions",
            Category::Travel => "Travel",
            Category::AirFresheners => "Air Fresheners",
            Category::FdReturns => "FD Returns",
            Category::InvestmentReturns => "Investment Returns",
            Category::Other => "Other",
        }
    }

    pub fn is_expense(&self) -> bool {
        EXPENSE_CATEGORIES.contains(self)
    }

    pub fn is_income(&self) -> bool {
        INCOME_CATEGORIES.contains(self)
    }

    /// Whether this label is usable for a transaction of the given kind.
    pub fn valid_for(&self, kind: TransactionKind) -> bool {
        match kind {
            TransactionKind::Expense => self.is_expense(),
            TransactionKind::Income => self.is_income(),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
