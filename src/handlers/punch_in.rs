//! Punch-in task handlers

use crate::HabitHandler;
use crate::formatting;
use crate::habit::{SortDirection, TaskSortField};
use crate::validation::{self, CommandOptions};
use anyhow::{Result, bail};

impl HabitHandler {
    /// The punch-in list, sorted by points descending unless told otherwise
    pub fn handle_list_tasks(&self, options: &CommandOptions) -> Result<String> {
        let unknown = options.unknown_keys(&["sort", "dir"]);
        if !unknown.is_empty() {
            bail!("Unknown option(s): {}", unknown.join(", "));
        }
        let field = match options.get("sort") {
            Some(raw) => raw.parse::<TaskSortField>()?,
            None => TaskSortField::default(),
        };
        let direction = match options.get("dir") {
            Some(raw) => raw.parse::<SortDirection>()?,
            None => SortDirection::default(),
        };

        let tasks = self.store.sorted_punch_in_tasks(field, direction);
        Ok(formatting::format_tasks(&self.store, &tasks))
    }

    pub fn handle_add_task(&mut self, name: &str, points: &str) -> Result<String> {
        let points = validation::parse_points("Points", points)?;
        let id = self.store.add_punch_in_task(name, points)?;
        Ok(format!(
            "Task created: [{}] {} ({} pts)",
            id,
            name.trim(),
            points
        ))
    }

    /// Edit a task; fields not given keep their current value
    pub fn handle_edit_task(&mut self, id: &str, options: &CommandOptions) -> Result<String> {
        let unknown = options.unknown_keys(&["name", "points", "total", "streak"]);
        if !unknown.is_empty() {
            bail!("Unknown option(s): {}", unknown.join(", "));
        }
        let id = validation::parse_id(id)?;
        let Some(current) = self.store.find_task_by_id(id) else {
            bail!("Task {} not found", id);
        };

        let name = options.get("name").unwrap_or(current.name.as_str()).to_string();
        let points = match options.get("points") {
            Some(raw) => validation::parse_points("Points", raw)?,
            None => current.points,
        };
        let historical_count = match options.get("total") {
            Some(raw) => validation::parse_count("Historical count", raw)?,
            None => current.historical_count,
        };
        let streak = match options.get("streak") {
            Some(raw) => validation::parse_count("Streak", raw)?,
            None => current.streak,
        };

        match self
            .store
            .edit_punch_in_task(id, &name, points, historical_count, streak)?
        {
            Some(previous) if previous.name != name.trim() => Ok(format!(
                "Task {} updated: renamed '{}' to '{}'",
                id,
                previous.name,
                name.trim()
            )),
            Some(_) => Ok(format!("Task {} updated", id)),
            None => bail!("Task {} not found", id),
        }
    }

    pub fn handle_delete_task(&mut self, id: &str) -> Result<String> {
        let id = validation::parse_id(id)?;
        match self.store.delete_punch_in_task(id) {
            Some(task) => Ok(format!(
                "Task deleted: [{}] {} (past completions stay in the ledger)",
                task.id, task.name
            )),
            None => bail!("Task {} not found", id),
        }
    }
}
