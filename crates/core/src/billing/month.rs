//! Calendar months and month sequence generation.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use thiserror::Error;

use super::error::BillingError;

/// A calendar month, written `YYYY-MM`.
///
/// Internally anchored on the first day of the month, so ordering is
/// chronological.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, SerializeDisplay, DeserializeFromStr,
)]
pub struct YearMonth(NaiveDate);

/// Error returned when a month key is not in `YYYY-MM` form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid month key {0:?}, expected YYYY-MM")]
pub struct ParseYearMonthError(String);

impl YearMonth {
    /// Creates a month from a year and a 1-based month number.
    #[must_use]
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    /// Returns the month containing `date`.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date - Days::new(u64::from(date.day0())))
    }

    /// Calendar year.
    #[must_use]
    pub fn year(self) -> i32 {
        self.0.year()
    }

    /// Month number, 1 to 12.
    #[must_use]
    pub fn month(self) -> u32 {
        self.0.month()
    }

    /// First day of the month.
    #[must_use]
    pub const fn first_day(self) -> NaiveDate {
        self.0
    }

    /// Last day of the month.
    #[must_use]
    pub fn last_day(self) -> NaiveDate {
        // Only the very last representable month has no successor, and its
        // last day is NaiveDate::MAX.
        self.0
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    /// The following month. December rolls over to January.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        self.0.checked_add_months(Months::new(1)).map(Self)
    }

    /// The month `count` months earlier.
    #[must_use]
    pub fn months_back(self, count: u32) -> Option<Self> {
        self.0.checked_sub_months(Months::new(count)).map(Self)
    }

    /// Returns true if `date` falls within this month.
    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        Self::from_date(date) == self
    }

    /// Iterates from this month through `end`, inclusive.
    ///
    /// Empty when `end` is earlier than `self`.
    #[must_use]
    pub fn through(self, end: Self) -> MonthRange {
        MonthRange {
            cursor: Some(self),
            end,
        }
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl std::str::FromStr for YearMonth {
    type Err = ParseYearMonthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseYearMonthError(s.to_string());

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        let digits = |part: &str, len: usize| {
            part.len() == len && part.bytes().all(|b| b.is_ascii_digit())
        };
        if !digits(year, 4) || !digits(month, 2) {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }
}

/// Inclusive iterator over consecutive calendar months.
#[derive(Debug, Clone)]
pub struct MonthRange {
    cursor: Option<YearMonth>,
    end: YearMonth,
}

impl Iterator for MonthRange {
    type Item = YearMonth;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.cursor.filter(|month| *month <= self.end)?;
        self.cursor = current.next();
        Some(current)
    }
}

/// Generates every calendar month from `start`'s month through `end`'s month.
///
/// `start` is normalized to the first of its month, so a tenancy starting on
/// the 15th still bills that month. The result is a pure function of the
/// inputs.
///
/// # Errors
///
/// Returns `BillingError::InvalidRange` if `end` is before `start`.
pub fn generate_months(start: NaiveDate, end: NaiveDate) -> Result<Vec<YearMonth>, BillingError> {
    if end < start {
        return Err(BillingError::InvalidRange { start, end });
    }

    Ok(YearMonth::from_date(start)
        .through(YearMonth::from_date(end))
        .collect())
}
