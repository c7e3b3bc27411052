//! TOML image of a HabitStore
//!
//! Used to seed a session (the embedded demo data, or a file passed on the
//! command line) and to print the current state. The store never writes
//! snapshots anywhere itself.

use super::clock::Clock;
use super::major_event::{EventStatus, MajorEvent};
use super::month::YearMonth;
use super::month_card::MonthCard;
use super::preferences::{CalendarDisplayMode, DisplayPreferences, TaskColor};
use super::punch_in::PunchInTask;
use super::store::HabitStore;
use crate::error::{HabitError, HabitResult};
use chrono::NaiveDate;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Current snapshot format version
pub const FORMAT_VERSION: u32 = 1;

const DEMO_SEED: &str = include_str!("demo_seed.toml");

/// Serializable form of the whole store
///
/// Scalar fields come first so the TOML output keeps them above the tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub format_version: u32,
    /// Last task id handed out; derived from the tasks when absent
    #[serde(default)]
    pub task_counter: u32,
    #[serde(default)]
    pub event_counter: u32,
    #[serde(default)]
    pub preferences: Option<PreferencesSnapshot>,
    /// `YYYY-MM-DD` -> completions logged that day
    #[serde(default)]
    pub completions: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub tasks: Vec<PunchInTask>,
    #[serde(default)]
    pub month_cards: Vec<MonthCard>,
    #[serde(default)]
    pub major_events: Vec<MajorEvent>,
}

/// Display preferences with every field optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreferencesSnapshot {
    #[serde(default)]
    pub calendar_mode: CalendarDisplayMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub displayed_month: Option<YearMonth>,
    #[serde(default)]
    pub colors: BTreeMap<String, TaskColor>,
    #[serde(default)]
    pub visibility: BTreeMap<String, bool>,
}

impl StoreSnapshot {
    pub fn from_toml(content: &str) -> HabitResult<Self> {
        toml::from_str(content).map_err(|e| HabitError::Seed(e.to_string()))
    }

    pub fn to_toml(&self) -> HabitResult<String> {
        toml::to_string_pretty(self).map_err(|e| HabitError::Seed(e.to_string()))
    }
}

impl HabitStore {
    /// Build a store from a snapshot, validating as it loads
    ///
    /// Task names are trimmed. Rejects malformed ledger dates, blank or
    /// duplicate task names, zero points and duplicate card months. Tasks
    /// without a colour get one from the new-task palette and are visible
    /// unless the snapshot says otherwise.
    pub fn from_snapshot(
        mut snapshot: StoreSnapshot,
        clock: impl Clock + 'static,
    ) -> HabitResult<Self> {
        let mut store = HabitStore::new(clock);

        let mut ledger = BTreeMap::new();
        for (raw_date, names) in snapshot.completions {
            let date = NaiveDate::parse_from_str(&raw_date, "%Y-%m-%d")
                .map_err(|_| HabitError::InvalidDate(raw_date.clone()))?;
            ledger.insert(date, names);
        }

        let mut seen_names = HashSet::new();
        let mut seen_ids = HashSet::new();
        for task in &mut snapshot.tasks {
            task.name = task.name.trim().to_string();
            if task.name.is_empty() {
                return Err(HabitError::EmptyName("Task"));
            }
            if task.points == 0 {
                return Err(HabitError::InvalidPoints {
                    field: "Points",
                    value: 0,
                });
            }
            if !seen_names.insert(task.name.clone()) {
                return Err(HabitError::DuplicateTaskName(task.name.clone()));
            }
            if !seen_ids.insert(task.id) {
                return Err(HabitError::Seed(format!("task id {} appears twice", task.id)));
            }
        }

        let mut seen_months = HashSet::new();
        for card in &snapshot.month_cards {
            if !seen_months.insert(card.month) {
                return Err(HabitError::DuplicateMonth(card.month));
            }
        }

        let max_task_id = snapshot.tasks.iter().map(|t| t.id).max().unwrap_or(0);
        let max_event_id = snapshot.major_events.iter().map(|e| e.id).max().unwrap_or(0);

        let mut preferences = DisplayPreferences::new(store.current_month());
        if let Some(prefs) = snapshot.preferences {
            preferences.calendar_mode = prefs.calendar_mode;
            if let Some(month) = prefs.displayed_month {
                preferences.displayed_month = month;
            }
            preferences.colors = prefs.colors;
            preferences.visibility = prefs.visibility;
        }
        for task in &snapshot.tasks {
            preferences
                .colors
                .entry(task.name.clone())
                .or_insert_with(|| TaskColor::for_new_task(task.id));
            preferences.visibility.entry(task.name.clone()).or_insert(true);
        }

        store.ledger = ledger;
        store.tasks = snapshot.tasks;
        store.task_counter = snapshot.task_counter.max(max_task_id);
        store.month_cards = snapshot.month_cards;
        store.major_events = snapshot.major_events;
        store.event_counter = snapshot.event_counter.max(max_event_id);
        store.preferences = preferences;

        info!(
            "event=store_load tasks={} dates={} month_cards={} major_events={}",
            store.tasks.len(),
            store.ledger.len(),
            store.month_cards.len(),
            store.major_events.len()
        );
        Ok(store)
    }

    /// Build a store holding the bundled demo data
    pub fn with_demo_data(clock: impl Clock + 'static) -> HabitResult<Self> {
        Self::from_snapshot(StoreSnapshot::from_toml(DEMO_SEED)?, clock)
    }

    /// Capture the whole store
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            format_version: FORMAT_VERSION,
            task_counter: self.task_counter,
            event_counter: self.event_counter,
            preferences: Some(PreferencesSnapshot {
                calendar_mode: self.preferences.calendar_mode,
                displayed_month: Some(self.preferences.displayed_month),
                colors: self.preferences.colors.clone(),
                visibility: self.preferences.visibility.clone(),
            }),
            completions: self
                .ledger
                .iter()
                .map(|(date, names)| (date.format("%Y-%m-%d").to_string(), names.clone()))
                .collect(),
            tasks: self.tasks.clone(),
            month_cards: self.month_cards.clone(),
            major_events: self.major_events.clone(),
        }
    }
}

/// Count of events per status, for summaries
pub fn status_breakdown(events: &[MajorEvent]) -> BTreeMap<EventStatus, usize> {
    let mut breakdown = BTreeMap::new();
    for event in events {
        *breakdown.entry(event.status).or_insert(0) += 1;
    }
    breakdown
}
