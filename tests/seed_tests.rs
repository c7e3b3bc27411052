//! Seed file and export tests
mod common;

use std::io::Write;

use common::{clock, date, demo_handler};
use habit_ledger::*;
use tempfile::NamedTempFile;

fn load_file(file: &NamedTempFile) -> HabitResult<HabitStore> {
    let content = std::fs::read_to_string(file.path()).unwrap();
    HabitStore::from_snapshot(StoreSnapshot::from_toml(&content)?, clock())
}

#[test]
fn test_exported_session_loads_back() {
    let mut handler = demo_handler();
    handler.execute(r#"task-add "TOEIC study 1 hour" 8"#).unwrap();
    handler.execute(r#"inc "TOEIC study 1 hour""#).unwrap();
    handler.execute("hide DSA").unwrap();
    handler.execute("goto 2025-01").unwrap();

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(handler.execute("export").unwrap().as_bytes())
        .unwrap();

    let store = load_file(&file).unwrap();
    let task = store.find_task_by_name("TOEIC study 1 hour").unwrap();
    assert_eq!(task.id, 7);
    assert_eq!(task.historical_count, 1);
    assert_eq!(store.count_for_task_today("TOEIC study 1 hour"), 1);
    assert!(!store.preferences().is_visible("DSA"));
    assert_eq!(store.preferences().displayed_month.to_string(), "2025-01");
    assert_eq!(store.month_cards(), handler.store().month_cards());
    assert_eq!(store.major_events(), handler.store().major_events());
}

#[test]
fn test_minimal_seed_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[completions]
"2025-03-01" = ["push a commit", "reading"]

[[tasks]]
id = 3
name = "reading"
points = 6
"#
    )
    .unwrap();

    let mut store = load_file(&file).unwrap();
    assert_eq!(store.count_for_task_on_date("push a commit", date("2025-03-01")), 1);
    assert!(store.preferences().is_visible("reading"));
    assert!(store.preferences().color_of("reading").is_some());
    assert_eq!(store.preferences().displayed_month.to_string(), "2025-03");

    // the counter picks up after the highest id in the file
    assert_eq!(store.add_punch_in_task("DSA", 4), Ok(4));
}

#[test]
fn test_seed_with_duplicate_months_is_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[[month_cards]]
id = "2025-04"
month = "2025-04"
target_points = 200
rewards = [{{ name = "New Book", points = 150 }}]

[[month_cards]]
id = "april"
month = "2025-04"
target_points = 150
rewards = [{{ name = "Trip", points = 300 }}]
"#
    )
    .unwrap();

    let april: YearMonth = "2025-04".parse().unwrap();
    assert_eq!(load_file(&file).err(), Some(HabitError::DuplicateMonth(april)));
}

#[test]
fn test_malformed_seed_is_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "tasks = 5").unwrap();
    assert!(matches!(load_file(&file), Err(HabitError::Seed(_))));
}
