use core::str::FromStr;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use kiosk_core::{DomainError, DomainResult};

/// Wire format of a due date (`19-10-2026`).
pub const DUE_DATE_FORMAT: &str = "%d-%m-%Y";

/// Standard loan period.
pub const DEFAULT_LOAN_DAYS: u64 = 14;

/// Calendar date a loan must be returned by.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DueDate(NaiveDate);

impl DueDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// `borrowed_on + loan_days`.
    pub fn after(borrowed_on: NaiveDate, loan_days: u64) -> DomainResult<Self> {
        borrowed_on
            .checked_add_days(Days::new(loan_days))
            .map(Self)
            .ok_or_else(|| DomainError::validation("due date is out of range"))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Overdue from the start of the due date onwards.
    pub fn is_overdue(&self, as_of: NaiveDate) -> bool {
        self.0 <= as_of
    }

    /// Whole days past due; zero when not overdue.
    pub fn days_overdue(&self, as_of: NaiveDate) -> i64 {
        (as_of - self.0).num_days().max(0)
    }
}

impl core::fmt::Display for DueDate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0.format(DUE_DATE_FORMAT))
    }
}

impl FromStr for DueDate {
    type Err = DomainError;

    /// Strict `DD-MM-YYYY`; anything chrono would leniently accept but that does
    /// not format back to the same text (e.g. `1-2-2026`) is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::validation(format!("due_date {s:?} is not DD-MM-YYYY"));
        let date = NaiveDate::parse_from_str(s, DUE_DATE_FORMAT).map_err(|_| invalid())?;
        let due = Self(date);
        if due.to_string() != s {
            return Err(invalid());
        }
        Ok(due)
    }
}

impl Serialize for DueDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DueDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
