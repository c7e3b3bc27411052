//! Major event handlers

use crate::HabitHandler;
use crate::formatting;
use crate::habit::EventStatus;
use crate::validation::{self, CommandOptions};
use anyhow::{Result, bail};

impl HabitHandler {
    /// Events sorted by points, highest first
    pub fn handle_list_events(&self) -> Result<String> {
        let mut events = self.store.major_events().to_vec();
        events.sort_by(|a, b| b.points.cmp(&a.points));
        Ok(formatting::format_events(&events))
    }

    /// Create an event, in the backlog unless a status is given
    pub fn handle_add_event(
        &mut self,
        name: &str,
        points: &str,
        status: Option<&str>,
    ) -> Result<String> {
        let points = validation::parse_points("Points", points)?;
        let status = match status {
            Some(raw) => raw.parse::<EventStatus>()?,
            None => EventStatus::Backlog,
        };
        let id = self.store.add_major_event(name, points, status)?;
        Ok(format!(
            "Event created: [{}] {} ({} pts, {})",
            id,
            name.trim(),
            points,
            status
        ))
    }

    /// Edit an event; fields not given keep their current value
    pub fn handle_edit_event(&mut self, id: &str, options: &CommandOptions) -> Result<String> {
        let unknown = options.unknown_keys(&["name", "points", "status"]);
        if !unknown.is_empty() {
            bail!("Unknown option(s): {}", unknown.join(", "));
        }
        let id = validation::parse_id(id)?;
        let Some(current) = self.store.find_major_event(id) else {
            bail!("Event {} not found", id);
        };

        let name = options.get("name").unwrap_or(current.name.as_str()).to_string();
        let points = match options.get("points") {
            Some(raw) => validation::parse_points("Points", raw)?,
            None => current.points,
        };
        let status = match options.get("status") {
            Some(raw) => raw.parse::<EventStatus>()?,
            None => current.status,
        };

        match self.store.edit_major_event(id, &name, points, status)? {
            Some(_) => Ok(format!("Event {} updated", id)),
            None => bail!("Event {} not found", id),
        }
    }

    /// Move an event through backlog, in progress and completed
    pub fn handle_event_status(&mut self, id: &str, status: &str) -> Result<String> {
        let id = validation::parse_id(id)?;
        let status: EventStatus = status.parse()?;
        let Some(previous) = self.store.set_major_event_status(id, status) else {
            bail!("Event {} not found", id);
        };

        let mut reply = format!("Event {}: {} -> {}", id, previous, status);
        if let Some(month) = self.store.find_major_event(id).and_then(|e| e.completed_month) {
            reply.push_str(&format!(" (completed {})", month));
        }
        Ok(reply)
    }

    pub fn handle_delete_event(&mut self, id: &str) -> Result<String> {
        let id = validation::parse_id(id)?;
        match self.store.delete_major_event(id) {
            Some(event) => Ok(format!("Event deleted: [{}] {}", event.id, event.name)),
            None => bail!("Event {} not found", id),
        }
    }
}
