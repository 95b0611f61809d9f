//! Report aggregation: pure reducers over an explicit date range. Every
//! function re-derives its result from the full transaction set it is given;
//! there is no incremental state.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Category, Transaction, TransactionKind};
use crate::errors::{CoreError, Result};

/// An inclusive date range. The end is clamped to 23:59:59.999 of its day at
/// construction, so a transaction stamped at that instant is included and one
/// a millisecond later is not.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl ReportRange {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Self> {
        let to = end_of_day(to.date_naive())?;
        if to < from {
            return Err(CoreError::InvalidDate(
                "range end must not precede its start".into(),
            ));
        }
        Ok(Self { from, to })
    }

    /// Full-day range between two calendar dates, both inclusive.
    pub fn days(from: NaiveDate, to: NaiveDate) -> Result<Self> {
        let start = from
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| CoreError::InvalidDate("invalid start of day".into()))?
            .and_utc();
        Self::new(start, end_of_day(to)?)
    }

    /// One whole calendar month. `month` is zero-based.
    pub fn month(month: u32, year: i32) -> Result<Self> {
        let first = NaiveDate::from_ymd_opt(year, month + 1, 1).ok_or_else(|| {
            CoreError::InvalidDate(format!("no month {month} in year {year}"))
        })?;
        let next_first = if month == 11 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 2, 1)
        };
        let last = next_first
            .and_then(|date| date.pred_opt())
            .ok_or_else(|| CoreError::InvalidDate(format!("no month {month} in year {year}")))?;
        Self::days(first, last)
    }

    /// One whole calendar year.
    pub fn year(year: i32) -> Result<Self> {
        let first = NaiveDate::from_ymd_opt(year, 1, 1)
            .ok_or_else(|| CoreError::InvalidDate(format!("invalid year {year}")))?;
        let last = NaiveDate::from_ymd_opt(year, 12, 31)
            .ok_or_else(|| CoreError::InvalidDate(format!("invalid year {year}")))?;
        Self::days(first, last)
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.from && at <= self.to
    }

    /// The same range shifted back exactly one year in both endpoints, the
    /// comparison baseline for [`period_over_period`]. Leap-day endpoints
    /// clamp the way the calendar arithmetic does by default.
    pub fn shift_back_one_year(&self) -> Self {
        Self {
            from: self
                .from
                .checked_sub_months(Months::new(12))
                .unwrap_or(self.from),
            to: self
                .to
                .checked_sub_months(Months::new(12))
                .unwrap_or(self.to),
        }
    }
}

fn end_of_day(day: NaiveDate) -> Result<DateTime<Utc>> {
    day.and_hms_milli_opt(23, 59, 59, 999)
        .map(|at| at.and_utc())
        .ok_or_else(|| CoreError::InvalidDate("invalid end of day".into()))
}

/// Income and expense sums for one period.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Totals {
    pub income: f64,
    pub expense: f64,
}

/// Sums amounts by kind within the range.
pub fn totals(transactions: &[Transaction], range: &ReportRange) -> Totals {
    let mut result = Totals::default();
    for txn in transactions.iter().filter(|txn| range.contains(txn.date)) {
        match txn.kind {
            TransactionKind::Income => result.income += txn.amount,
            TransactionKind::Expense => result.expense += txn.amount,
        }
    }
    result
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: f64,
}

/// Expense sums per category within the range, sorted descending by total
/// (ties broken by category name for a deterministic order). Empty input
/// yields an empty vec.
pub fn category_breakdown(transactions: &[Transaction], range: &ReportRange) -> Vec<CategoryTotal> {
    let mut sums: BTreeMap<Category, f64> = BTreeMap::new();
    for txn in transactions.iter().filter(|txn| {
        txn.kind == TransactionKind::Expense && range.contains(txn.date)
    }) {
        *sums.entry(txn.category).or_insert(0.0) += txn.amount;
    }
    let mut breakdown: Vec<CategoryTotal> = sums
        .into_iter()
        .map(|(category, total)| CategoryTotal { category, total })
        .collect();
    breakdown.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.category.as_str().cmp(b.category.as_str()))
    });
    breakdown
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MonthlyTotals {
    pub month: u32,
    pub income: f64,
    pub expense: f64,
}

/// One entry per calendar month 0..11 of the year, in order, zero-filled for
/// months with no activity.
pub fn monthly_series(transactions: &[Transaction], year: i32) -> Vec<MonthlyTotals> {
    let mut series: Vec<MonthlyTotals> = (0..12)
        .map(|month| MonthlyTotals {
            month,
            income: 0.0,
            expense: 0.0,
        })
        .collect();
    for txn in transactions.iter().filter(|txn| txn.date.year() == year) {
        let slot = &mut series[txn.date.month0() as usize];
        match txn.kind {
            TransactionKind::Income => slot.income += txn.amount,
            TransactionKind::Expense => slot.expense += txn.amount,
        }
    }
    series
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PeriodComparison {
    pub current: Totals,
    pub previous: Totals,
    pub previous_range: ReportRange,
}

/// Totals for the range against the same range one year earlier.
pub fn period_over_period(transactions: &[Transaction], range: &ReportRange) -> PeriodComparison {
    let previous_range = range.shift_back_one_year();
    PeriodComparison {
        current: totals(transactions, range),
        previous: totals(transactions, &previous_range),
        previous_range,
    }
}
