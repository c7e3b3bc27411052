use super::month::YearMonth;
use crate::error::HabitError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle of a major event
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Backlog,
    InProgress,
    Completed,
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EventStatus::Backlog => "backlog",
            EventStatus::InProgress => "inprogress",
            EventStatus::Completed => "completed",
        };
        f.write_str(label)
    }
}

impl FromStr for EventStatus {
    type Err = HabitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "backlog" => Ok(EventStatus::Backlog),
            "inprogress" | "in_progress" | "in-progress" => Ok(EventStatus::InProgress),
            "completed" | "done" => Ok(EventStatus::Completed),
            _ => Err(HabitError::InvalidChoice {
                kind: "status",
                value: s.to_string(),
                options: "backlog, inprogress, completed",
            }),
        }
    }
}

/// A one-off, larger piece of work worth a fixed number of points
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MajorEvent {
    pub id: u32,
    pub name: String,
    pub points: u32,
    pub status: EventStatus,
    /// Month the event was completed in; set only while `status` is completed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_month: Option<YearMonth>,
}

impl MajorEvent {
    /// Move to `status`, stamping or clearing the completion month
    pub(crate) fn transition(&mut self, status: EventStatus, current_month: YearMonth) {
        match (self.status, status) {
            (EventStatus::Completed, EventStatus::Completed) => {}
            (_, EventStatus::Completed) => self.completed_month = Some(current_month),
            (_, _) => self.completed_month = None,
        }
        self.status = status;
    }
}
