//! Common test utilities for integration tests

#![allow(dead_code)]

use chrono::NaiveDate;
use habit_ledger::{FixedClock, HabitHandler, HabitStore};

/// The date every test treats as "today"
pub const TODAY: &str = "2025-03-20";

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn clock() -> FixedClock {
    FixedClock(date(TODAY))
}

/// An empty store pinned to `TODAY`
pub fn empty_store() -> HabitStore {
    HabitStore::new(clock())
}

/// The bundled demo data pinned to `TODAY`
pub fn demo_store() -> HabitStore {
    HabitStore::with_demo_data(clock()).unwrap()
}

/// Empty store with one task, returning its id
pub fn store_with_task(name: &str, points: u32) -> (HabitStore, u32) {
    let mut store = empty_store();
    let id = store.add_punch_in_task(name, points).unwrap();
    (store, id)
}

pub fn demo_handler() -> HabitHandler {
    HabitHandler::new(demo_store())
}

pub fn empty_handler() -> HabitHandler {
    HabitHandler::new(empty_store())
}
