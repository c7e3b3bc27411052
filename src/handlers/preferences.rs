//! Display preference handlers

use crate::HabitHandler;
use crate::formatting;
use crate::habit::{CalendarDisplayMode, TaskColor};
use crate::validation;
use anyhow::Result;

impl HabitHandler {
    /// Month grid for the given month, or the displayed month
    pub fn handle_calendar(&self, month: Option<&str>) -> Result<String> {
        let month = match month {
            Some(raw) => validation::parse_month(raw)?,
            None => self.store.preferences().displayed_month,
        };
        let calendar = self.store.calendar_month(month);
        Ok(formatting::format_calendar(&calendar, self.store.preferences()))
    }

    pub fn handle_color(&mut self, name: &str, color: &str) -> Result<String> {
        let color: TaskColor = color.parse()?;
        self.store.set_task_color(name, color);
        Ok(format!("{} is now {} ({})", name.trim(), color, color.hex()))
    }

    /// Show, hide or (with `None`) toggle one task
    pub fn handle_visibility(&mut self, name: &str, visible: Option<bool>) -> Result<String> {
        let visible = match visible {
            Some(visible) => {
                self.store.set_task_visibility(name, visible);
                visible
            }
            None => self.store.toggle_task_visibility(name),
        };
        let state = if visible { "visible" } else { "hidden" };
        Ok(format!("{} is now {}", name.trim(), state))
    }

    pub fn handle_visibility_all(&mut self, visible: bool) -> Result<String> {
        self.store.set_all_visibility(visible);
        let state = if visible { "visible" } else { "hidden" };
        Ok(format!(
            "All {} task(s) are now {}",
            self.store.punch_in_tasks().len(),
            state
        ))
    }

    pub fn handle_display_mode(&mut self, mode: &str) -> Result<String> {
        let mode: CalendarDisplayMode = mode.parse()?;
        self.store.set_calendar_display_mode(mode);
        Ok(format!("Calendar display mode: {}", mode))
    }

    pub fn handle_goto_month(&mut self, month: &str) -> Result<String> {
        let month = validation::parse_month(month)?;
        self.store.set_displayed_month(month);
        Ok(format!("Displaying {}", month.long_name()))
    }

    pub fn handle_step_month(&mut self, forward: bool) -> Result<String> {
        let month = if forward {
            self.store.show_next_month()
        } else {
            self.store.show_previous_month()
        };
        Ok(format!("Displaying {}", month.long_name()))
    }
}
