//! Read-side derivations over HabitStore
//!
//! Every method here recomputes its answer from the raw ledgers on each
//! call. Nothing is memoized, so a query always reflects every mutation that
//! completed before it.

use super::major_event::{EventStatus, MajorEvent};
use super::month::YearMonth;
use super::month_card::{MonthCard, MonthProgress};
use super::punch_in::{PunchInTask, SortDirection, TaskSortField};
use super::statistics::{self, Period, PeriodStatistics, TaskCount, TaskFilter};
use super::store::HabitStore;
use chrono::{Datelike, NaiveDate};
use std::cmp::Ordering;

/// One cell of the calendar grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub is_today: bool,
    /// Visible completions grouped by task, in first-logged order
    pub tasks: Vec<TaskCount>,
    /// Number of visible completions
    pub total: u32,
}

/// A month laid out for a Sunday-first calendar grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarMonth {
    pub month: YearMonth,
    /// Empty cells before day 1
    pub leading_blanks: u32,
    pub days: Vec<CalendarDay>,
}

impl HabitStore {
    /// The clock's current date
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn is_today(&self, date: NaiveDate) -> bool {
        date == self.today()
    }

    pub fn current_month(&self) -> YearMonth {
        YearMonth::from_date(self.today())
    }

    /// Completions logged on `date`, empty when there are none
    pub fn completions_on(&self, date: NaiveDate) -> &[String] {
        self.ledger.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn todays_completions(&self) -> &[String] {
        self.completions_on(self.today())
    }

    pub fn count_for_task_on_date(&self, name: &str, date: NaiveDate) -> u32 {
        count_of(self.completions_on(date), name)
    }

    pub fn count_for_task_today(&self, name: &str) -> u32 {
        self.count_for_task_on_date(name, self.today())
    }

    pub fn count_for_task_in_month(&self, name: &str, month: YearMonth) -> u32 {
        self.ledger
            .range(month.first_day()..=month.last_day())
            .map(|(_, names)| count_of(names, name))
            .sum()
    }

    pub fn count_for_task_this_month(&self, name: &str) -> u32 {
        self.count_for_task_in_month(name, self.current_month())
    }

    /// Completions on `date` grouped by task, in first-logged order
    pub fn task_counts_on_date(&self, date: NaiveDate) -> Vec<TaskCount> {
        group_counts(self.completions_on(date).iter().map(String::as_str))
    }

    /// Completions on `date` whose task is not hidden
    pub fn visible_completions_on(&self, date: NaiveDate) -> Vec<&str> {
        self.completions_on(date)
            .iter()
            .map(String::as_str)
            .filter(|name| self.preferences.is_visible(name))
            .collect()
    }

    /// Calendar grid data for `month`
    pub fn calendar_month(&self, month: YearMonth) -> CalendarMonth {
        let today = self.today();
        let days = month
            .days()
            .map(|date| {
                let visible = self.visible_completions_on(date);
                CalendarDay {
                    date,
                    is_today: date == today,
                    total: visible.len() as u32,
                    tasks: group_counts(visible.into_iter()),
                }
            })
            .collect();

        CalendarMonth {
            month,
            leading_blanks: month.first_day().weekday().num_days_from_sunday(),
            days,
        }
    }

    /// Punch-in tasks in list order
    ///
    /// The monthly column counts completions in the current month.
    pub fn sorted_punch_in_tasks(
        &self,
        field: TaskSortField,
        direction: SortDirection,
    ) -> Vec<&PunchInTask> {
        let mut tasks: Vec<&PunchInTask> = self.tasks.iter().collect();
        let compare = |a: &&PunchInTask, b: &&PunchInTask| -> Ordering {
            match field {
                TaskSortField::Points => a.points.cmp(&b.points),
                TaskSortField::Monthly => self
                    .count_for_task_this_month(&a.name)
                    .cmp(&self.count_for_task_this_month(&b.name)),
                TaskSortField::Total => a.historical_count.cmp(&b.historical_count),
                TaskSortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
                TaskSortField::Streak => a.streak.cmp(&b.streak),
            }
        };
        match direction {
            SortDirection::Asc => tasks.sort_by(compare),
            SortDirection::Desc => tasks.sort_by(|a, b| compare(b, a)),
        }
        tasks
    }

    /// The card covering the month `date` falls in
    pub fn month_card_for(&self, date: NaiveDate) -> Option<&MonthCard> {
        let month = YearMonth::from_date(date);
        self.month_cards.iter().find(|c| c.month == month)
    }

    pub fn current_month_card(&self) -> Option<&MonthCard> {
        self.month_card_for(self.today())
    }

    /// Earned-versus-target for `month`; `None` prompts card creation
    pub fn month_progress(&self, month: YearMonth) -> Option<MonthProgress> {
        self.month_card_for(month.first_day()).map(MonthCard::progress)
    }

    /// Major events completed in `month`
    pub fn completed_events_in_month(&self, month: YearMonth) -> Vec<&MajorEvent> {
        self.major_events
            .iter()
            .filter(|e| e.status == EventStatus::Completed && e.completed_month == Some(month))
            .collect()
    }

    /// Statistics for `period` anchored on the displayed month
    pub fn statistics_for_period(&self, period: Period, filter: &TaskFilter) -> PeriodStatistics {
        statistics::compute_statistics(
            &self.ledger,
            &self.tasks,
            period,
            self.preferences.displayed_month,
            filter,
        )
    }
}

fn count_of(names: &[String], name: &str) -> u32 {
    names.iter().filter(|n| *n == name).count() as u32
}

fn group_counts<'a>(names: impl Iterator<Item = &'a str>) -> Vec<TaskCount> {
    let mut grouped: Vec<TaskCount> = Vec::new();
    for name in names {
        match grouped.iter_mut().find(|t| t.name == name) {
            Some(entry) => entry.count += 1,
            None => grouped.push(TaskCount {
                name: name.to_string(),
                count: 1,
            }),
        }
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habit::clock::FixedClock;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn store() -> HabitStore {
        let mut store = HabitStore::new(FixedClock(date("2025-03-20")));
        store.add_punch_in_task("push a commit", 5).unwrap();
        store.add_punch_in_task("reading", 6).unwrap();
        store.add_completion(date("2025-03-01"), "push a commit");
        store.add_completion(date("2025-03-01"), "reading");
        store.add_completion(date("2025-03-01"), "push a commit");
        store.add_completion(date("2025-02-28"), "reading");
        store
    }

    #[test]
    fn test_task_counts_keep_first_logged_order() {
        let counts = store().task_counts_on_date(date("2025-03-01"));
        assert_eq!(counts.len(), 2);
        assert_eq!((counts[0].name.as_str(), counts[0].count), ("push a commit", 2));
        assert_eq!((counts[1].name.as_str(), counts[1].count), ("reading", 1));
    }

    #[test]
    fn test_month_count_stays_inside_month() {
        let store = store();
        let march: YearMonth = "2025-03".parse().unwrap();
        assert_eq!(store.count_for_task_in_month("reading", march), 1);
        assert_eq!(store.count_for_task_this_month("push a commit"), 2);
    }

    #[test]
    fn test_calendar_hides_invisible_tasks() {
        let mut store = store();
        store.set_task_visibility("reading", false);
        let calendar = store.calendar_month("2025-03".parse().unwrap());

        // 2025-03-01 is a Saturday
        assert_eq!(calendar.leading_blanks, 6);
        assert_eq!(calendar.days.len(), 31);
        assert_eq!(calendar.days[0].total, 2);
        assert_eq!(calendar.days[0].tasks.len(), 1);
        assert!(calendar.days[19].is_today);
        assert!(!calendar.days[18].is_today);
    }

    #[test]
    fn test_sorting_by_monthly_and_name() {
        let store = store();
        let by_monthly = store.sorted_punch_in_tasks(TaskSortField::Monthly, SortDirection::Desc);
        assert_eq!(by_monthly[0].name, "push a commit");

        let by_name = store.sorted_punch_in_tasks(TaskSortField::Name, SortDirection::Desc);
        assert_eq!(by_name[0].name, "reading");
        let by_name = store.sorted_punch_in_tasks(TaskSortField::Name, SortDirection::Asc);
        assert_eq!(by_name[0].name, "push a commit");
    }

    #[test]
    fn test_empty_date_reads_as_empty() {
        let store = store();
        assert!(store.completions_on(date("2024-01-01")).is_empty());
        assert_eq!(store.count_for_task_on_date("reading", date("2024-01-01")), 0);
        assert!(store.todays_completions().is_empty());
    }
}
