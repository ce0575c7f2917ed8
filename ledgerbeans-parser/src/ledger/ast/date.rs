//! Calendar dates for journal entries
//!
//!     Transaction headers carry a primary date and optionally an auxiliary
//!     date. Either may be a full `(year, month, day)` date or a partial
//!     `(month, day)` date without a year, used for recurring entries.
//!
//!     Both forms are immutable value types and validate their fields on
//!     construction: the month must be in 1..=12 and the day must fit the
//!     month. Full dates take the year into account for February; partial
//!     dates have no year to consult and tolerate day 29.

use std::fmt;

use serde::Serialize;

/// Days per month, 1-indexed. February is set to 29; callers that know the
/// year tighten this to 28 in non-leap years.
const DAYS_IN_MONTH: [u32; 13] = [0, 31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// A full calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Date {
    year: i32,
    month: u32,
    day: u32,
}

impl Date {
    /// Construct a validated date. Returns `None` when the year is outside
    /// 1..=9999, the month is outside 1..=12, or the day does not exist in
    /// that month of that year.
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        if !(1..=9999).contains(&year) || !(1..=12).contains(&month) {
            return None;
        }
        let mut dim = DAYS_IN_MONTH[month as usize];
        if month == 2 && !is_leap_year(year) {
            dim = 28;
        }
        if !(1..=dim).contains(&day) {
            return None;
        }
        Some(Self { year, month, day })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// A month/day pair without a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PartialDate {
    month: u32,
    day: u32,
}

impl PartialDate {
    /// Construct a validated partial date. With no year to consult,
    /// February accepts up to 29 days.
    pub fn new(month: u32, day: u32) -> Option<Self> {
        if !(1..=12).contains(&month) {
            return None;
        }
        let dim = DAYS_IN_MONTH[month as usize];
        if !(1..=dim).contains(&day) {
            return None;
        }
        Some(Self { month, day })
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }
}

impl fmt::Display for PartialDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

/// Either form of date accepted in a transaction header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LedgerDate {
    Full(Date),
    Partial(PartialDate),
}

impl LedgerDate {
    pub fn is_partial(&self) -> bool {
        matches!(self, LedgerDate::Partial(_))
    }

    pub fn month(&self) -> u32 {
        match self {
            LedgerDate::Full(d) => d.month(),
            LedgerDate::Partial(d) => d.month(),
        }
    }

    pub fn day(&self) -> u32 {
        match self {
            LedgerDate::Full(d) => d.day(),
            LedgerDate::Partial(d) => d.day(),
        }
    }
}

impl fmt::Display for LedgerDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerDate::Full(d) => d.fmt(f),
            LedgerDate::Partial(d) => d.fmt(f),
        }
    }
}

impl From<Date> for LedgerDate {
    fn from(date: Date) -> Self {
        LedgerDate::Full(date)
    }
}

impl From<PartialDate> for LedgerDate {
    fn from(date: PartialDate) -> Self {
        LedgerDate::Partial(date)
    }
}
