use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{CoreError, Result};

pub const MONTH_MAX: u32 = 11;
pub const YEAR_MIN: i32 = 1900;
pub const YEAR_MAX: i32 = 2100;

/// The mutable (month, year) pair used as the default reporting period,
/// decoupled from the wall-clock date. Months are zero-based (0 = January).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SystemClock {
    pub month: u32,
    pub year: i32,
}

impl SystemClock {
    pub fn new(month: u32, year: i32) -> Result<Self> {
        if month > MONTH_MAX {
            return Err(CoreError::InvalidDate(format!(
                "month must be in 0..=11, got {month}"
            )));
        }
        if !(YEAR_MIN..=YEAR_MAX).contains(&year) {
            return Err(CoreError::InvalidDate(format!(
                "year must be in {YEAR_MIN}..={YEAR_MAX}, got {year}"
            )));
        }
        Ok(Self { month, year })
    }

    /// The real calendar month/year, used for initialization and for the
    /// opt-in advance-on-load policy.
    pub fn current() -> Self {
        let now = Utc::now();
        Self {
            month: now.month0(),
            year: now.year(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::current()
    }
}
