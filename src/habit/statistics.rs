//! Per-period statistics over the completion ledger
//!
//! Everything here is a pure function of the ledger, the task registry, a
//! period and an anchor month. Points are looked up by task name at the time
//! of the call, so editing a task's points re-prices its whole history.
//! Ledger names with no live task still count as completions but earn
//! nothing and never show up in point rankings.

use super::month::YearMonth;
use super::preferences::DisplayPreferences;
use super::punch_in::PunchInTask;
use crate::error::HabitError;
use chrono::{Datelike, Days, NaiveDate};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

/// Number of tasks kept in the distribution and points ranking
pub const TOP_TASKS: usize = 5;

/// Number of active days listed under recent activity
pub const RECENT_DAYS: usize = 5;

/// Span of time statistics are computed over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    /// The Sunday-to-Saturday week containing the 15th of the anchor month
    Week,
    #[default]
    Month,
    /// The calendar year of the anchor month
    Year,
}

impl Period {
    /// First and last date covered when anchored on `anchor`
    pub fn date_range(&self, anchor: YearMonth) -> (NaiveDate, NaiveDate) {
        match self {
            Period::Week => {
                let middle = anchor.first_day() + Days::new(14);
                let offset = u64::from(middle.weekday().num_days_from_sunday());
                let start = middle - Days::new(offset);
                (start, start + Days::new(6))
            }
            Period::Month => (anchor.first_day(), anchor.last_day()),
            Period::Year => {
                let first = anchor.first_day();
                let start = first.with_ordinal(1).unwrap_or(first);
                let end = start
                    .with_month(12)
                    .and_then(|d| d.with_day(31))
                    .unwrap_or(anchor.last_day());
                (start, end)
            }
        }
    }

    /// Heading for the period, e.g. "Mar 9 - Mar 15, 2025"
    pub fn title(&self, anchor: YearMonth) -> String {
        match self {
            Period::Week => {
                let (start, end) = self.date_range(anchor);
                format!("{} - {}", start.format("%b %-d"), end.format("%b %-d, %Y"))
            }
            Period::Month => anchor.long_name(),
            Period::Year => anchor.year().to_string(),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Week => f.write_str("week"),
            Period::Month => f.write_str("month"),
            Period::Year => f.write_str("year"),
        }
    }
}

impl FromStr for Period {
    type Err = HabitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "year" => Ok(Period::Year),
            _ => Err(HabitError::InvalidChoice {
                kind: "period",
                value: s.to_string(),
                options: "week, month, year",
            }),
        }
    }
}

/// Which task names take part in a statistics run
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TaskFilter {
    #[default]
    All,
    Only(BTreeSet<String>),
    Except(BTreeSet<String>),
}

impl TaskFilter {
    /// Everything except the tasks hidden in `preferences`
    pub fn from_visibility(preferences: &DisplayPreferences) -> Self {
        let hidden = preferences
            .visibility
            .iter()
            .filter(|(_, visible)| !**visible)
            .map(|(name, _)| name.clone())
            .collect();
        TaskFilter::Except(hidden)
    }

    pub fn includes(&self, name: &str) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Only(names) => names.contains(name),
            TaskFilter::Except(names) => !names.contains(name),
        }
    }
}

/// Completions of one task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCount {
    pub name: String,
    pub count: u32,
}

/// Points one task earned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPoints {
    pub name: String,
    pub points: u32,
    pub completions: u32,
    pub points_per_completion: u32,
}

/// One point on the activity chart: a day, or a month in year view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityBucket {
    pub label: String,
    pub start: NaiveDate,
    pub completions: u32,
    pub points: u32,
}

/// Completions logged on one day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayActivity {
    pub date: NaiveDate,
    pub completions: Vec<String>,
}

/// Aggregates for one period
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodStatistics {
    pub period: Period,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub title: String,
    pub total_points: u32,
    pub total_completions: u32,
    pub most_completed: Option<TaskCount>,
    pub highest_value: Option<TaskPoints>,
    /// Zero-filled: one bucket per day (week, month) or per month (year)
    pub buckets: Vec<ActivityBucket>,
    /// Top tasks by completions
    pub distribution: Vec<TaskCount>,
    /// Top tasks by points earned
    pub points_ranking: Vec<TaskPoints>,
    /// Most recent active days, newest first
    pub recent_days: Vec<DayActivity>,
}

/// Running per-task totals, kept in the order names are first met
#[derive(Default)]
struct Tally {
    entries: Vec<TaskTally>,
    index: HashMap<String, usize>,
}

struct TaskTally {
    name: String,
    completions: u32,
    /// `None` for names with no live task
    points_per_completion: Option<u32>,
}

impl Tally {
    fn record(&mut self, name: &str, points_per_completion: Option<u32>) {
        let slot = match self.index.get(name) {
            Some(&slot) => slot,
            None => {
                self.entries.push(TaskTally {
                    name: name.to_string(),
                    completions: 0,
                    points_per_completion,
                });
                self.index.insert(name.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        self.entries[slot].completions = self.entries[slot].completions.saturating_add(1);
    }

    fn counts(&self) -> Vec<TaskCount> {
        self.entries
            .iter()
            .map(|t| TaskCount {
                name: t.name.clone(),
                count: t.completions,
            })
            .collect()
    }

    fn points(&self) -> Vec<TaskPoints> {
        self.entries
            .iter()
            .filter_map(|t| {
                let per = t.points_per_completion?;
                Some(TaskPoints {
                    name: t.name.clone(),
                    points: per.saturating_mul(t.completions),
                    completions: t.completions,
                    points_per_completion: per,
                })
            })
            .collect()
    }
}

/// Compute the statistics for `period` anchored on `anchor`
pub fn compute_statistics(
    ledger: &BTreeMap<NaiveDate, Vec<String>>,
    tasks: &[PunchInTask],
    period: Period,
    anchor: YearMonth,
    filter: &TaskFilter,
) -> PeriodStatistics {
    let (start, end) = period.date_range(anchor);
    let price: HashMap<&str, u32> = tasks.iter().map(|t| (t.name.as_str(), t.points)).collect();

    let mut tally = Tally::default();
    let mut per_day: BTreeMap<NaiveDate, (u32, u32)> = BTreeMap::new();
    let mut active_days = Vec::new();

    for (date, names) in ledger.range(start..=end) {
        let included: Vec<&String> = names.iter().filter(|n| filter.includes(n)).collect();
        if included.is_empty() {
            continue;
        }

        let day = per_day.entry(*date).or_default();
        for name in &included {
            let points = price.get(name.as_str()).copied();
            tally.record(name, points);
            day.0 = day.0.saturating_add(1);
            day.1 = day.1.saturating_add(points.unwrap_or(0));
        }
        active_days.push(DayActivity {
            date: *date,
            completions: included.into_iter().cloned().collect(),
        });
    }

    let (total_completions, total_points) = per_day
        .values()
        .fold((0u32, 0u32), |acc, (c, p)| {
            (acc.0.saturating_add(*c), acc.1.saturating_add(*p))
        });

    let counts = tally.counts();
    let points = tally.points();

    let most_completed = first_strict_max(&counts, |t| t.count).cloned();
    let highest_value = first_strict_max(&points, |t| t.points).cloned();

    let mut distribution = counts;
    distribution.sort_by(|a, b| b.count.cmp(&a.count));
    distribution.truncate(TOP_TASKS);

    let mut points_ranking = points;
    points_ranking.sort_by(|a, b| b.points.cmp(&a.points));
    points_ranking.truncate(TOP_TASKS);

    active_days.reverse();
    active_days.truncate(RECENT_DAYS);

    PeriodStatistics {
        period,
        start,
        end,
        title: period.title(anchor),
        total_points,
        total_completions,
        most_completed,
        highest_value,
        buckets: buckets(period, anchor, start, end, &per_day),
        distribution,
        points_ranking,
        recent_days: active_days,
    }
}

/// The earliest item holding the largest non-zero key
fn first_strict_max<T>(items: &[T], key: impl Fn(&T) -> u32) -> Option<&T> {
    let mut best: Option<&T> = None;
    let mut best_key = 0;
    for item in items {
        if key(item) > best_key {
            best_key = key(item);
            best = Some(item);
        }
    }
    best
}

fn buckets(
    period: Period,
    anchor: YearMonth,
    start: NaiveDate,
    end: NaiveDate,
    per_day: &BTreeMap<NaiveDate, (u32, u32)>,
) -> Vec<ActivityBucket> {
    match period {
        Period::Year => (1..=12)
            .filter_map(|m| YearMonth::new(anchor.year(), m))
            .map(|month| {
                let (completions, points) = per_day
                    .range(month.first_day()..=month.last_day())
                    .fold((0u32, 0u32), |acc, (_, (c, p))| {
                        (acc.0.saturating_add(*c), acc.1.saturating_add(*p))
                    });
                ActivityBucket {
                    label: month.first_day().format("%b").to_string(),
                    start: month.first_day(),
                    completions,
                    points,
                }
            })
            .collect(),
        Period::Week | Period::Month => {
            let label_format = if period == Period::Month { "%d" } else { "%b %d" };
            start
                .iter_days()
                .take_while(|day| *day <= end)
                .map(|day| {
                    let (completions, points) = per_day.get(&day).copied().unwrap_or_default();
                    ActivityBucket {
                        label: day.format(label_format).to_string(),
                        start: day,
                        completions,
                        points,
                    }
                })
                .collect()
        }
    }
}
