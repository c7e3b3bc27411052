//! Habit Ledger Library
//!
//! An in-memory habit tracker: a per-day completion ledger, point-valued
//! punch-in tasks with historical counts and streaks, monthly reward cards,
//! major events and derived statistics over week, month and year periods.
//!
//! # Architecture
//!
//! The library follows a 2-layer architecture:
//! - **Command Layer**: `HabitHandler` - Parses shell commands and renders responses
//! - **Domain Layer**: `habit` module - `HabitStore`, its records and every derivation
//!
//! Nothing is persisted. A session starts from the bundled demo data, a TOML
//! snapshot or an empty store, and `export` prints the current state.
//!
//! # Example
//!
//! ```
//! use habit_ledger::{FixedClock, HabitHandler, HabitStore};
//! use chrono::NaiveDate;
//!
//! let today = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
//! let mut handler = HabitHandler::new(HabitStore::new(FixedClock(today)));
//! handler.execute(r#"task-add "push a commit" 5"#).unwrap();
//! handler.execute(r#"inc "push a commit""#).unwrap();
//! assert_eq!(handler.store().count_for_task_today("push a commit"), 1);
//! ```

pub mod command;
pub mod error;
pub mod formatting;
pub mod habit;
pub mod handlers;
pub mod logging;
pub mod validation;

use anyhow::{Result, bail};
use log::debug;

// Re-export commonly used types
pub use error::{HabitError, HabitResult};
pub use habit::{
    CalendarDisplayMode, Clock, EventStatus, FixedClock, HabitStore, MajorEvent, MonthCard,
    MonthCardDraft, Period, PeriodStatistics, PunchInTask, Reward, SortDirection, StoreSnapshot,
    SystemClock, TOP_TASKS, TaskColor, TaskFilter, TaskSortField, YearMonth,
};

/// Command help shown by `help`
pub const HELP: &str = "\
Completions:
  today                              today's completions
  day <date>                         completions on a date, numbered
  log <date> <task>                  record a completion
  unlog <date> <position>            remove the completion at a position
  clear <date> <task>                remove every completion of a task on a date
  inc <task> | dec <task>            add or take back one completion today
Punch-in tasks:
  tasks [sort=points|monthly|total|name|streak] [dir=asc|desc]
  task-add <name> <points>
  task-edit <id> [name=..] [points=..] [total=..] [streak=..]
  task-delete <id>
Month cards:
  months                             every card
  month [YYYY-MM]                    one card and its progress
  month-add <YYYY-MM> [target=200] reward=<name>=<points>... [summary=..] [image=..]
  month-edit <id> [month=..] [target=..] [earned=..] [events=..] [punchins=..] [reward=..]... [summary=..] [image=..]
  month-delete <id>
  claim <card id> <reward position>
Major events:
  events
  event-add <name> <points> [backlog|inprogress|completed]
  event-edit <id> [name=..] [points=..] [status=..]
  event-status <id> <status>
  event-delete <id>
Display:
  calendar [YYYY-MM]                 month grid, hidden tasks left out
  color <task> <color>
  show <task> | hide <task> | toggle <task> | show-all | hide-all
  mode <badges|dots>
  goto <YYYY-MM> | prev | next       change the displayed month
Statistics:
  stats [week|month|year] [tasks=visible|all]
Session:
  export                             print the store as TOML
  help | quit";

/// Command front end over a `HabitStore`
///
/// Owns the store for the whole session. Each `handle_*` method lives in
/// `handlers` and returns the text shown to the user; `execute` routes one
/// command line to the right handler.
pub struct HabitHandler {
    pub(crate) store: HabitStore,
}

impl HabitHandler {
    /// Create a handler owning `store`
    ///
    /// # Example
    /// ```
    /// # use habit_ledger::{HabitHandler, HabitStore, SystemClock};
    /// let handler = HabitHandler::new(HabitStore::new(SystemClock));
    /// assert!(handler.store().punch_in_tasks().is_empty());
    /// ```
    pub fn new(store: HabitStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &HabitStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut HabitStore {
        &mut self.store
    }

    /// Run one command line and return the response text
    ///
    /// A blank line yields an empty response. Invalid input, unknown commands
    /// and validation failures are returned as errors; the store is left
    /// untouched in that case.
    pub fn execute(&mut self, line: &str) -> Result<String> {
        let args = command::split_args(line)?;
        let Some((name, rest)) = args.split_first() else {
            return Ok(String::new());
        };
        debug!("event=command name={name:?} args={}", rest.len());

        match name.to_ascii_lowercase().as_str() {
            "help" => Ok(HELP.to_string()),

            "today" => {
                expect_args(rest, 0, "today")?;
                self.handle_today()
            }
            "day" => {
                expect_args(rest, 1, "day <date>")?;
                self.handle_day(&rest[0])
            }
            "log" => {
                expect_args(rest, 2, "log <date> <task>")?;
                self.handle_log(&rest[0], &rest[1])
            }
            "unlog" => {
                expect_args(rest, 2, "unlog <date> <position>")?;
                self.handle_unlog(&rest[0], &rest[1])
            }
            "clear" => {
                expect_args(rest, 2, "clear <date> <task>")?;
                self.handle_clear(&rest[0], &rest[1])
            }
            "inc" => {
                expect_args(rest, 1, "inc <task>")?;
                self.handle_increment(&rest[0])
            }
            "dec" => {
                expect_args(rest, 1, "dec <task>")?;
                self.handle_decrement(&rest[0])
            }

            "tasks" => {
                let (positional, options) = validation::split_options(rest);
                expect_args(&positional, 0, "tasks [sort=..] [dir=..]")?;
                self.handle_list_tasks(&options)
            }
            "task-add" => {
                expect_args(rest, 2, "task-add <name> <points>")?;
                self.handle_add_task(&rest[0], &rest[1])
            }
            "task-edit" => {
                let (positional, options) = validation::split_options(rest);
                expect_args(&positional, 1, "task-edit <id> [name=..] [points=..] [total=..] [streak=..]")?;
                self.handle_edit_task(&positional[0], &options)
            }
            "task-delete" => {
                expect_args(rest, 1, "task-delete <id>")?;
                self.handle_delete_task(&rest[0])
            }

            "months" => {
                expect_args(rest, 0, "months")?;
                self.handle_list_months()
            }
            "month" => {
                if rest.len() > 1 {
                    bail!("Usage: month [YYYY-MM]");
                }
                self.handle_show_month(rest.first().map(String::as_str))
            }
            "month-add" => {
                let (positional, options) = validation::split_options(rest);
                expect_args(&positional, 1, "month-add <YYYY-MM> [target=..] reward=<name>=<points>...")?;
                self.handle_add_month(&positional[0], &options)
            }
            "month-edit" => {
                let (positional, options) = validation::split_options(rest);
                expect_args(&positional, 1, "month-edit <id> [field=value]...")?;
                self.handle_edit_month(&positional[0], &options)
            }
            "month-delete" => {
                expect_args(rest, 1, "month-delete <id>")?;
                self.handle_delete_month(&rest[0])
            }
            "claim" => {
                expect_args(rest, 2, "claim <card id> <reward position>")?;
                self.handle_claim_reward(&rest[0], &rest[1])
            }

            "events" => {
                expect_args(rest, 0, "events")?;
                self.handle_list_events()
            }
            "event-add" => {
                if !(2..=3).contains(&rest.len()) {
                    bail!("Usage: event-add <name> <points> [status]");
                }
                self.handle_add_event(&rest[0], &rest[1], rest.get(2).map(String::as_str))
            }
            "event-edit" => {
                let (positional, options) = validation::split_options(rest);
                expect_args(&positional, 1, "event-edit <id> [name=..] [points=..] [status=..]")?;
                self.handle_edit_event(&positional[0], &options)
            }
            "event-status" => {
                expect_args(rest, 2, "event-status <id> <status>")?;
                self.handle_event_status(&rest[0], &rest[1])
            }
            "event-delete" => {
                expect_args(rest, 1, "event-delete <id>")?;
                self.handle_delete_event(&rest[0])
            }

            "calendar" => {
                if rest.len() > 1 {
                    bail!("Usage: calendar [YYYY-MM]");
                }
                self.handle_calendar(rest.first().map(String::as_str))
            }
            "color" => {
                expect_args(rest, 2, "color <task> <color>")?;
                self.handle_color(&rest[0], &rest[1])
            }
            "show" => {
                expect_args(rest, 1, "show <task>")?;
                self.handle_visibility(&rest[0], Some(true))
            }
            "hide" => {
                expect_args(rest, 1, "hide <task>")?;
                self.handle_visibility(&rest[0], Some(false))
            }
            "toggle" => {
                expect_args(rest, 1, "toggle <task>")?;
                self.handle_visibility(&rest[0], None)
            }
            "show-all" => {
                expect_args(rest, 0, "show-all")?;
                self.handle_visibility_all(true)
            }
            "hide-all" => {
                expect_args(rest, 0, "hide-all")?;
                self.handle_visibility_all(false)
            }
            "mode" => {
                expect_args(rest, 1, "mode <badges|dots>")?;
                self.handle_display_mode(&rest[0])
            }
            "goto" => {
                expect_args(rest, 1, "goto <YYYY-MM>")?;
                self.handle_goto_month(&rest[0])
            }
            "prev" => {
                expect_args(rest, 0, "prev")?;
                self.handle_step_month(false)
            }
            "next" => {
                expect_args(rest, 0, "next")?;
                self.handle_step_month(true)
            }

            "stats" => {
                let (positional, options) = validation::split_options(rest);
                if positional.len() > 1 {
                    bail!("Usage: stats [week|month|year] [tasks=visible|all]");
                }
                self.handle_statistics(positional.first().map(String::as_str), &options)
            }

            "export" => {
                expect_args(rest, 0, "export")?;
                self.handle_export()
            }

            other => bail!("Unknown command '{}'. Type 'help' for the list of commands.", other),
        }
    }
}

fn expect_args(args: &[String], count: usize, usage: &str) -> Result<()> {
    if args.len() != count {
        bail!("Usage: {}", usage);
    }
    Ok(())
}
