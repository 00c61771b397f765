//! Financial year representation
//!
//! A financial year runs from its books-start date to March 31 of the
//! following calendar year, and is backed by a single database file.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;

/// A financial year and the database file that holds its ledger
///
/// Two financial years are equal iff their start years match, regardless of
/// file path or books-start date; the data directory is expected to hold at
/// most one file per start year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialYear {
    /// Calendar year the financial year starts in
    pub start_year: i32,

    /// Date the ledger opens (first bookable date)
    pub books_start_date: NaiveDate,

    /// Path to this year's database file
    pub file_path: PathBuf,
}

impl FinancialYear {
    pub fn new(start_year: i32, books_start_date: NaiveDate, file_path: PathBuf) -> Self {
        Self {
            start_year,
            books_start_date,
            file_path,
        }
    }

    /// Calendar year the financial year ends in
    pub fn end_year(&self) -> i32 {
        self.start_year + 1
    }

    /// Last day of the financial year: March 31 of the end year
    pub fn end_date(&self) -> NaiveDate {
        // March 31 exists in every year
        NaiveDate::from_ymd_opt(self.end_year(), 3, 31).unwrap()
    }

    /// Earliest bookable date
    pub fn min_date(&self) -> NaiveDate {
        self.books_start_date
    }

    /// Latest bookable date: today, capped at the year's end date
    pub fn max_date(&self) -> NaiveDate {
        let today = Local::now().date_naive();
        today.min(self.end_date())
    }

    /// Check if a date falls within the bookable range
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.min_date() && date <= self.end_date()
    }
}

impl fmt::Display for FinancialYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start_year, self.end_year())
    }
}

impl PartialEq for FinancialYear {
    fn eq(&self, other: &Self) -> bool {
        self.start_year == other.start_year
    }
}

impl Eq for FinancialYear {}

impl Hash for FinancialYear {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.start_year.hash(state);
    }
}

impl Ord for FinancialYear {
    fn cmp(&self, other: &Self) -> Ordering {
        self.start_year.cmp(&other.start_year)
    }
}

impl PartialOrd for FinancialYear {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
