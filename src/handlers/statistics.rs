//! Statistics handler

use crate::HabitHandler;
use crate::formatting;
use crate::habit::{Period, TaskFilter};
use crate::validation::CommandOptions;
use anyhow::{Result, bail};

impl HabitHandler {
    /// Statistics for a period anchored on the displayed month
    ///
    /// Hidden tasks are left out unless `tasks=all` is given.
    pub fn handle_statistics(
        &self,
        period: Option<&str>,
        options: &CommandOptions,
    ) -> Result<String> {
        let unknown = options.unknown_keys(&["tasks"]);
        if !unknown.is_empty() {
            bail!("Unknown option(s): {}", unknown.join(", "));
        }
        let period = match period {
            Some(raw) => raw.parse::<Period>()?,
            None => Period::default(),
        };
        let filter = match options.get("tasks") {
            None | Some("visible") => TaskFilter::from_visibility(self.store.preferences()),
            Some("all") => TaskFilter::All,
            Some(other) => bail!("Invalid tasks option '{}'. Valid options: visible, all", other),
        };

        let stats = self.store.statistics_for_period(period, &filter);
        Ok(formatting::format_statistics(&stats, self.store.preferences()))
    }
}
