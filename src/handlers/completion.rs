//! Completion ledger handlers

use crate::HabitHandler;
use crate::formatting;
use crate::validation;
use anyhow::Result;

impl HabitHandler {
    /// Today's completions grouped by task
    pub fn handle_today(&self) -> Result<String> {
        let today = self.store.today();
        let counts = self.store.task_counts_on_date(today);
        if counts.is_empty() {
            return Ok(format!("Nothing completed today ({})", today));
        }
        Ok(format!(
            "Today ({}): {} completion(s)\n{}",
            today,
            self.store.todays_completions().len(),
            formatting::format_task_counts(&counts)
        ))
    }

    /// Numbered completions on one date
    pub fn handle_day(&self, date: &str) -> Result<String> {
        let date = validation::parse_date(date)?;
        Ok(formatting::format_day(date, self.store.completions_on(date)))
    }

    /// Record one completion on any date
    ///
    /// Names without a punch-in task are accepted and flagged in the reply.
    pub fn handle_log(&mut self, date: &str, name: &str) -> Result<String> {
        let date = validation::parse_date(date)?;
        let name = name.trim();
        self.store.add_completion(date, name);

        let mut reply = format!(
            "Logged '{}' on {} ({} that day)",
            name,
            date,
            self.store.count_for_task_on_date(name, date)
        );
        if self.store.find_task_by_name(name).is_none() {
            reply.push_str("\nNote: no punch-in task has this name, so it earns no points");
        }
        Ok(reply)
    }

    /// Remove the completion at a 1-based position
    pub fn handle_unlog(&mut self, date: &str, position: &str) -> Result<String> {
        let date = validation::parse_date(date)?;
        let index = validation::parse_position(position)?;
        match self.store.remove_completion(date, index) {
            Some(name) => Ok(format!("Removed '{}' from {}", name, date)),
            None => Ok(format!("Nothing at position {} on {}", position.trim(), date)),
        }
    }

    /// Remove every completion of one task on a date
    pub fn handle_clear(&mut self, date: &str, name: &str) -> Result<String> {
        let date = validation::parse_date(date)?;
        let name = name.trim();
        let removed = self.store.remove_all_of_type(date, name);
        if removed == 0 {
            return Ok(format!("No '{}' completions on {}", name, date));
        }
        Ok(format!("Removed {} '{}' completion(s) from {}", removed, name, date))
    }

    /// Add one completion today
    pub fn handle_increment(&mut self, name: &str) -> Result<String> {
        let name = name.trim();
        self.store.increment_today(name);
        Ok(format_today_status(self, name))
    }

    /// Take back the latest completion of a task today
    pub fn handle_decrement(&mut self, name: &str) -> Result<String> {
        let name = name.trim();
        if self.store.decrement_today(name).is_none() {
            return Ok(format!("'{}' has no completions today", name));
        }
        Ok(format_today_status(self, name))
    }
}

fn format_today_status(handler: &HabitHandler, name: &str) -> String {
    let store = &handler.store;
    match store.find_task_by_name(name) {
        Some(task) => format!(
            "{}: today {} | total {} | streak {}",
            name,
            store.count_for_task_today(name),
            task.historical_count,
            task.streak
        ),
        None => format!("{}: today {}", name, store.count_for_task_today(name)),
    }
}
