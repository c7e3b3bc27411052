//! Domain error type for the habit ledger
//!
//! Only validation failures are errors. Lookups that miss (unknown date,
//! out-of-range position, unknown id) are reported through `Option` or a
//! count of zero and never reach this enum.

use crate::habit::YearMonth;
use thiserror::Error;

/// Errors raised by store mutations and input parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HabitError {
    #[error("A task named '{0}' already exists")]
    DuplicateTaskName(String),

    #[error("A month card for {0} already exists")]
    DuplicateMonth(YearMonth),

    #[error("{0} name cannot be empty")]
    EmptyName(&'static str),

    #[error("{field} must be a positive number, got {value}")]
    InvalidPoints { field: &'static str, value: i64 },

    #[error("Invalid date '{0}'. Use YYYY-MM-DD (e.g., '2025-03-15')")]
    InvalidDate(String),

    #[error("Invalid month '{0}'. Use YYYY-MM (e.g., '2025-03')")]
    InvalidMonth(String),

    #[error("{field} must be a non-negative whole number, got '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Please add at least one valid reward")]
    NoValidRewards,

    #[error("Invalid {kind} '{value}'. Valid options: {options}")]
    InvalidChoice {
        kind: &'static str,
        value: String,
        options: &'static str,
    },

    #[error("Seed data rejected: {0}")]
    Seed(String),
}

/// Result alias used throughout the domain layer
pub type HabitResult<T> = Result<T, HabitError>;
