use chrono::{Local, NaiveDate};

/// Get the current date in local timezone
pub fn local_date_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Source of "today" for the store
///
/// Completions logged on the current date adjust a task's historical count
/// and streak, so every date comparison goes through this trait.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Wall clock in the local timezone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        local_date_today()
    }
}

/// A clock pinned to one date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
