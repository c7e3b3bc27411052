use super::month::YearMonth;
use crate::error::HabitError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Chart colour used when a task has no colour tag
pub const NEUTRAL_HEX: &str = "#64748b";

/// Colour tag attached to a task name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskColor {
    Blue,
    Red,
    Green,
    Purple,
    Amber,
    Indigo,
    Orange,
    Cyan,
    Pink,
    Emerald,
    Teal,
    Lime,
    Rose,
    Sky,
    Fuchsia,
}

impl TaskColor {
    pub const ALL: [TaskColor; 15] = [
        TaskColor::Blue,
        TaskColor::Red,
        TaskColor::Green,
        TaskColor::Purple,
        TaskColor::Amber,
        TaskColor::Indigo,
        TaskColor::Orange,
        TaskColor::Cyan,
        TaskColor::Pink,
        TaskColor::Emerald,
        TaskColor::Teal,
        TaskColor::Lime,
        TaskColor::Rose,
        TaskColor::Sky,
        TaskColor::Fuchsia,
    ];

    /// Colours handed out to newly created tasks
    pub const NEW_TASK_PALETTE: [TaskColor; 5] = [
        TaskColor::Teal,
        TaskColor::Lime,
        TaskColor::Rose,
        TaskColor::Sky,
        TaskColor::Fuchsia,
    ];

    /// Pick a colour for a new task
    pub fn for_new_task(task_id: u32) -> Self {
        Self::NEW_TASK_PALETTE[task_id as usize % Self::NEW_TASK_PALETTE.len()]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskColor::Blue => "blue",
            TaskColor::Red => "red",
            TaskColor::Green => "green",
            TaskColor::Purple => "purple",
            TaskColor::Amber => "amber",
            TaskColor::Indigo => "indigo",
            TaskColor::Orange => "orange",
            TaskColor::Cyan => "cyan",
            TaskColor::Pink => "pink",
            TaskColor::Emerald => "emerald",
            TaskColor::Teal => "teal",
            TaskColor::Lime => "lime",
            TaskColor::Rose => "rose",
            TaskColor::Sky => "sky",
            TaskColor::Fuchsia => "fuchsia",
        }
    }

    /// Saturated colour for charts
    pub fn hex(&self) -> &'static str {
        match self {
            TaskColor::Blue => "#3b82f6",
            TaskColor::Red => "#ef4444",
            TaskColor::Green => "#22c55e",
            TaskColor::Purple => "#a855f7",
            TaskColor::Amber => "#f59e0b",
            TaskColor::Indigo => "#6366f1",
            TaskColor::Orange => "#f97316",
            TaskColor::Cyan => "#06b6d4",
            TaskColor::Pink => "#ec4899",
            TaskColor::Emerald => "#10b981",
            TaskColor::Teal => "#14b8a6",
            TaskColor::Lime => "#84cc16",
            TaskColor::Rose => "#f43f5e",
            TaskColor::Sky => "#0ea5e9",
            TaskColor::Fuchsia => "#d946ef",
        }
    }
}

impl fmt::Display for TaskColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskColor {
    type Err = HabitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|color| color.as_str() == wanted)
            .ok_or_else(|| HabitError::InvalidChoice {
                kind: "color",
                value: s.to_string(),
                options: "blue, red, green, purple, amber, indigo, orange, cyan, pink, emerald, teal, lime, rose, sky, fuchsia",
            })
    }
}

/// How completions are drawn inside a calendar cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarDisplayMode {
    #[default]
    Badges,
    Dots,
}

impl fmt::Display for CalendarDisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalendarDisplayMode::Badges => f.write_str("badges"),
            CalendarDisplayMode::Dots => f.write_str("dots"),
        }
    }
}

impl FromStr for CalendarDisplayMode {
    type Err = HabitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "badges" | "badge" => Ok(CalendarDisplayMode::Badges),
            "dots" | "dot" => Ok(CalendarDisplayMode::Dots),
            _ => Err(HabitError::InvalidChoice {
                kind: "display mode",
                value: s.to_string(),
                options: "badges, dots",
            }),
        }
    }
}

/// Session-local display settings
///
/// Colour and visibility entries are keyed by task name, so a rename must
/// move them and a delete must drop them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayPreferences {
    #[serde(default)]
    pub calendar_mode: CalendarDisplayMode,
    /// Month the overview and statistics views are scoped to
    pub displayed_month: YearMonth,
    #[serde(default)]
    pub colors: BTreeMap<String, TaskColor>,
    #[serde(default)]
    pub visibility: BTreeMap<String, bool>,
}

impl DisplayPreferences {
    pub fn new(displayed_month: YearMonth) -> Self {
        Self {
            calendar_mode: CalendarDisplayMode::default(),
            displayed_month,
            colors: BTreeMap::new(),
            visibility: BTreeMap::new(),
        }
    }

    /// A task without an explicit entry is visible
    pub fn is_visible(&self, name: &str) -> bool {
        self.visibility.get(name).copied().unwrap_or(true)
    }

    pub fn color_of(&self, name: &str) -> Option<TaskColor> {
        self.colors.get(name).copied()
    }

    /// Chart colour for a task, neutral when it has no tag
    pub fn chart_hex(&self, name: &str) -> &'static str {
        self.color_of(name).map_or(NEUTRAL_HEX, |c| c.hex())
    }

    /// Defaults for a newly created task
    pub(crate) fn seed_task(&mut self, name: &str, color: TaskColor) {
        self.colors.insert(name.to_string(), color);
        self.visibility.insert(name.to_string(), true);
    }

    /// Move every entry keyed by `old` to `new`
    pub(crate) fn rename_task(&mut self, old: &str, new: &str) {
        if let Some(color) = self.colors.remove(old) {
            self.colors.insert(new.to_string(), color);
        }
        if let Some(visible) = self.visibility.remove(old) {
            self.visibility.insert(new.to_string(), visible);
        }
    }

    pub(crate) fn forget_task(&mut self, name: &str) {
        self.colors.remove(name);
        self.visibility.remove(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefs() -> DisplayPreferences {
        DisplayPreferences::new("2025-03".parse().unwrap())
    }

    #[test]
    fn test_rename_moves_entries() {
        let mut p = prefs();
        p.seed_task("DSA", TaskColor::Cyan);
        p.visibility.insert("DSA".to_string(), false);

        p.rename_task("DSA", "Algorithms");

        assert_eq!(p.color_of("Algorithms"), Some(TaskColor::Cyan));
        assert!(!p.is_visible("Algorithms"));
        assert_eq!(p.color_of("DSA"), None);
        assert!(!p.visibility.contains_key("DSA"));
    }

    #[test]
    fn test_forget_drops_entries() {
        let mut p = prefs();
        p.seed_task("reading", TaskColor::Orange);
        p.forget_task("reading");
        assert!(p.colors.is_empty());
        assert!(p.visibility.is_empty());
    }

    #[test]
    fn test_missing_entries_default_sensibly() {
        let p = prefs();
        assert!(p.is_visible("never seen"));
        assert_eq!(p.chart_hex("never seen"), NEUTRAL_HEX);
        assert_eq!(p.calendar_mode, CalendarDisplayMode::Badges);
    }

    #[test]
    fn test_new_task_palette_rotates() {
        assert_eq!(TaskColor::for_new_task(0), TaskColor::Teal);
        assert_eq!(TaskColor::for_new_task(7), TaskColor::Rose);
        assert!(TaskColor::NEW_TASK_PALETTE.contains(&TaskColor::for_new_task(12345)));
    }

    #[test]
    fn test_color_parse() {
        assert_eq!("Emerald".parse::<TaskColor>(), Ok(TaskColor::Emerald));
        assert!("magenta".parse::<TaskColor>().is_err());
        assert_eq!("dot".parse::<CalendarDisplayMode>(), Ok(CalendarDisplayMode::Dots));
    }
}
