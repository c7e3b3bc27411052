use crate::error::HabitError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A recurring habit that earns points every time it is punched in
///
/// `historical_count` and `streak` are stored values. They move only when a
/// completion is logged or removed on the current date, or when the task is
/// edited by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunchInTask {
    /// Unique identifier, never reused within a session
    pub id: u32,
    /// Display name, unique across live tasks
    pub name: String,
    /// Points awarded per completion
    pub points: u32,
    /// All-time completions
    #[serde(default)]
    pub historical_count: u32,
    /// Consecutive-day engagement counter
    #[serde(default)]
    pub streak: u32,
}

impl PunchInTask {
    pub fn new(id: u32, name: impl Into<String>, points: u32) -> Self {
        Self {
            id,
            name: name.into(),
            points,
            historical_count: 0,
            streak: 0,
        }
    }

    /// Bookkeeping for one completion logged today
    pub(crate) fn record_completion(&mut self) {
        self.historical_count = self.historical_count.saturating_add(1);
        self.streak = self.streak.saturating_add(1);
    }

    /// Bookkeeping for `removed` completions taken back today
    ///
    /// The streak drops by one no matter how many occurrences went away.
    pub(crate) fn retract_completions(&mut self, removed: u32) {
        self.historical_count = self.historical_count.saturating_sub(removed);
        self.streak = self.streak.saturating_sub(1);
    }
}

/// Column used to order the punch-in list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskSortField {
    /// Points per completion
    #[default]
    Points,
    /// Completions in the current month
    Monthly,
    /// Historical count
    Total,
    Name,
    Streak,
}

impl FromStr for TaskSortField {
    type Err = HabitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "points" => Ok(TaskSortField::Points),
            "monthly" => Ok(TaskSortField::Monthly),
            "total" => Ok(TaskSortField::Total),
            "name" => Ok(TaskSortField::Name),
            "streak" => Ok(TaskSortField::Streak),
            _ => Err(HabitError::InvalidChoice {
                kind: "sort field",
                value: s.to_string(),
                options: "points, monthly, total, name, streak",
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortDirection {
    type Err = HabitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(HabitError::InvalidChoice {
                kind: "sort direction",
                value: s.to_string(),
                options: "asc, desc",
            }),
        }
    }
}
