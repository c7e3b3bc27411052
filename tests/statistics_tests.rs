//! Statistics and read-side query tests against the demo data
mod common;

use std::collections::BTreeSet;

use common::{date, demo_store, empty_store, store_with_task};
use habit_ledger::*;

#[test]
fn test_empty_month_is_zero_filled() {
    let store = empty_store();
    let stats = store.statistics_for_period(Period::Month, &TaskFilter::All);

    assert_eq!(stats.buckets.len(), 31);
    assert!(stats.buckets.iter().all(|b| b.completions == 0 && b.points == 0));
    assert_eq!(stats.buckets[0].label, "01");
    assert_eq!(stats.total_points, 0);
    assert_eq!(stats.most_completed, None);
    assert_eq!(stats.highest_value, None);
    assert!(stats.distribution.is_empty());
    assert!(stats.recent_days.is_empty());
}

#[test]
fn test_zero_fill_follows_month_length() {
    let mut store = empty_store();
    store.set_displayed_month("2024-02".parse().unwrap());
    let stats = store.statistics_for_period(Period::Month, &TaskFilter::All);
    assert_eq!(stats.buckets.len(), 29);

    store.set_displayed_month("2025-04".parse().unwrap());
    let stats = store.statistics_for_period(Period::Month, &TaskFilter::All);
    assert_eq!(stats.buckets.len(), 30);
}

#[test]
fn test_reading_points_scenario() {
    let (mut store, _) = store_with_task("reading", 6);
    store.add_completion(date("2025-03-02"), "reading");
    store.add_completion(date("2025-03-11"), "reading");
    store.add_completion(date("2025-03-27"), "reading");

    let march: YearMonth = "2025-03".parse().unwrap();
    assert_eq!(store.count_for_task_in_month("reading", march), 3);

    let stats = store.statistics_for_period(Period::Month, &TaskFilter::All);
    assert_eq!(stats.total_points, 18);
    assert_eq!(stats.points_ranking[0].points, 18);
}

#[test]
fn test_demo_month_totals() {
    let store = demo_store();
    let stats = store.statistics_for_period(Period::Month, &TaskFilter::All);

    assert_eq!(stats.title, "March 2025");
    assert_eq!(stats.total_completions, 74);
    // DSA and "code war <5 kata" have no task, so they earn nothing
    assert_eq!(stats.total_points, 310);

    let top = stats.most_completed.unwrap();
    assert_eq!((top.name.as_str(), top.count), ("push a commit", 20));
    let best = stats.highest_value.unwrap();
    assert_eq!((best.name.as_str(), best.points), ("push a commit", 100));
}

#[test]
fn test_demo_month_rankings() {
    let store = demo_store();
    let stats = store.statistics_for_period(Period::Month, &TaskFilter::All);

    let distribution: Vec<(&str, u32)> = stats
        .distribution
        .iter()
        .map(|t| (t.name.as_str(), t.count))
        .collect();
    assert_eq!(
        distribution,
        vec![
            ("push a commit", 20),
            ("code war >5 kata", 14),
            ("reading", 11),
            ("organize notes", 8),
            ("background knowledge study", 8),
        ]
    );

    let ranking: Vec<&str> = stats.points_ranking.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(ranking.len(), TOP_TASKS);
    assert!(!ranking.contains(&"DSA"));
    assert_eq!(ranking[0], "push a commit");
    assert_eq!(stats.points_ranking[2].points, 66);
}

#[test]
fn test_demo_recent_days_newest_first() {
    let store = demo_store();
    let stats = store.statistics_for_period(Period::Month, &TaskFilter::All);
    let days: Vec<_> = stats.recent_days.iter().map(|d| d.date).collect();
    assert_eq!(
        days,
        vec![
            date("2025-03-31"),
            date("2025-03-30"),
            date("2025-03-29"),
            date("2025-03-28"),
            date("2025-03-27"),
        ]
    );
}

#[test]
fn test_demo_week_is_the_one_holding_the_fifteenth() {
    let store = demo_store();
    let stats = store.statistics_for_period(Period::Week, &TaskFilter::All);

    assert_eq!(stats.start, date("2025-03-09"));
    assert_eq!(stats.end, date("2025-03-15"));
    assert_eq!(stats.title, "Mar 9 - Mar 15, 2025");
    assert_eq!(stats.buckets.len(), 7);
    assert_eq!(stats.buckets[0].label, "Mar 09");
    assert_eq!(stats.total_completions, 17);
    assert_eq!(stats.total_points, 74);

    // code war and push a commit tie at 4; the first one met wins
    assert_eq!(stats.most_completed.unwrap().name, "code war >5 kata");
}

#[test]
fn test_demo_year_has_twelve_buckets() {
    let store = demo_store();
    let stats = store.statistics_for_period(Period::Year, &TaskFilter::All);

    assert_eq!(stats.title, "2025");
    assert_eq!(stats.buckets.len(), 12);
    assert_eq!(stats.buckets[0].label, "Jan");
    assert_eq!(stats.buckets[0].completions, 0);
    assert_eq!(stats.buckets[2].completions, 74);
    assert_eq!(stats.buckets[2].points, 310);
}

#[test]
fn test_filter_excludes_tasks() {
    let mut store = demo_store();
    store.set_task_visibility("push a commit", false);

    let filter = TaskFilter::from_visibility(store.preferences());
    let stats = store.statistics_for_period(Period::Month, &filter);
    assert_eq!(stats.total_completions, 54);
    assert_eq!(stats.total_points, 210);
    assert_eq!(stats.most_completed.unwrap().name, "code war >5 kata");

    let only = TaskFilter::Only(BTreeSet::from(["reading".to_string()]));
    let stats = store.statistics_for_period(Period::Month, &only);
    assert_eq!(stats.total_completions, 11);
    assert_eq!(stats.total_points, 66);
}

#[test]
fn test_points_follow_current_task_value() {
    let mut store = demo_store();
    let reading = store.find_task_by_name("reading").unwrap().id;
    store.edit_punch_in_task(reading, "reading", 10, 12, 2).unwrap();

    let stats = store.statistics_for_period(Period::Month, &TaskFilter::All);
    assert_eq!(stats.total_points, 310 + 11 * 4);
}

#[test]
fn test_stats_follow_displayed_month() {
    let mut store = demo_store();
    store.show_previous_month();
    let stats = store.statistics_for_period(Period::Month, &TaskFilter::All);
    assert_eq!(stats.title, "February 2025");
    assert_eq!(stats.buckets.len(), 28);
    assert_eq!(stats.total_completions, 0);
}

#[test]
fn test_sorted_tasks_default_is_points_descending() {
    let store = demo_store();
    let tasks = store.sorted_punch_in_tasks(TaskSortField::default(), SortDirection::default());
    assert_eq!(tasks[0].name, "reading");
    assert_eq!(tasks.last().unwrap().name, "W3 school (1 page)");

    let by_total = store.sorted_punch_in_tasks(TaskSortField::Total, SortDirection::Asc);
    assert_eq!(by_total[0].name, "organize notes");
}

#[test]
fn test_calendar_for_demo_month() {
    let mut store = demo_store();
    store.set_task_visibility("push a commit", false);
    let calendar = store.calendar_month("2025-03".parse().unwrap());

    let twentieth = &calendar.days[19];
    assert!(twentieth.is_today);
    assert_eq!(twentieth.total, 2);
    assert!(twentieth.tasks.iter().all(|t| t.name != "push a commit"));
    assert_eq!(store.completions_on(date("2025-03-20")).len(), 4);
}
