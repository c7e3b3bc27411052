use crate::error::HabitError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A calendar month, rendered as `YYYY-MM`
///
/// Stored as the first day of the month so that every value is a date chrono
/// can represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth(NaiveDate);

impl YearMonth {
    /// Build a month from its year and 1-based month number
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    /// The month a date falls in
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.with_day(1).unwrap_or(date))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    pub fn last_day(&self) -> NaiveDate {
        self.0.with_day(self.days_in_month()).unwrap_or(self.0)
    }

    pub fn days_in_month(&self) -> u32 {
        match self.month() {
            4 | 6 | 9 | 11 => 30,
            2 if is_leap_year(self.year()) => 29,
            2 => 28,
            _ => 31,
        }
    }

    /// Every date of the month, in order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        self.0.iter_days().take(self.days_in_month() as usize)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// The following month
    pub fn succ(&self) -> Option<Self> {
        if self.month() == 12 {
            Self::new(self.year() + 1, 1)
        } else {
            Self::new(self.year(), self.month() + 1)
        }
    }

    /// The preceding month
    pub fn pred(&self) -> Option<Self> {
        if self.month() == 1 {
            Self::new(self.year() - 1, 12)
        } else {
            Self::new(self.year(), self.month() - 1)
        }
    }

    /// Human-readable form, e.g. "March 2025"
    pub fn long_name(&self) -> String {
        self.0.format("%B %Y").to_string()
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for YearMonth {
    type Err = HabitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || HabitError::InvalidMonth(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;

        let all_digits = |part: &str, len: usize| {
            part.len() == len && part.chars().all(|c| c.is_ascii_digit())
        };
        if !all_digits(year, 4) || !all_digits(month, 2) {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }
}

impl Serialize for YearMonth {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
