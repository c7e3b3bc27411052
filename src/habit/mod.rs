//! Habit tracking domain models and business logic
//!
//! Split into submodules:
//! - `store`: the `HabitStore` container and every mutation
//! - `queries`: read-side derivations over the store
//! - `statistics`: per-period aggregates over the completion ledger
//! - `snapshot`: TOML seeding and export
//! - the record types: `punch_in`, `month_card`, `major_event`, `preferences`
//! - `month` and `clock`: calendar helpers and the source of "today"

mod clock;
mod major_event;
mod month;
mod month_card;
mod preferences;
mod punch_in;
mod queries;
mod snapshot;
mod statistics;
mod store;

pub use clock::{Clock, FixedClock, SystemClock, local_date_today};
pub use major_event::{EventStatus, MajorEvent};
pub use month::YearMonth;
pub use month_card::{DEFAULT_TARGET_POINTS, MonthCard, MonthCardDraft, MonthProgress, Reward};
pub use preferences::{CalendarDisplayMode, DisplayPreferences, NEUTRAL_HEX, TaskColor};
pub use punch_in::{PunchInTask, SortDirection, TaskSortField};
pub use queries::{CalendarDay, CalendarMonth};
pub use snapshot::{FORMAT_VERSION, PreferencesSnapshot, StoreSnapshot, status_breakdown};
pub use statistics::{
    ActivityBucket, DayActivity, Period, PeriodStatistics, RECENT_DAYS, TOP_TASKS, TaskCount,
    TaskFilter, TaskPoints, compute_statistics,
};
pub use store::HabitStore;
