//! Snapshot export handler

use crate::HabitHandler;
use anyhow::Result;

impl HabitHandler {
    /// The whole store as a TOML document that `--seed` can load back
    pub fn handle_export(&self) -> Result<String> {
        Ok(self.store.snapshot().to_toml()?)
    }
}
