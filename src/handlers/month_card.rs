//! Month card handlers

use crate::HabitHandler;
use crate::formatting;
use crate::habit::{DEFAULT_TARGET_POINTS, MonthCardDraft, Reward};
use crate::validation::{self, CommandOptions};
use anyhow::{Result, bail};

impl HabitHandler {
    pub fn handle_list_months(&self) -> Result<String> {
        Ok(formatting::format_month_cards(self.store.month_cards()))
    }

    /// One card in full, defaulting to the current month
    pub fn handle_show_month(&self, month: Option<&str>) -> Result<String> {
        let month = match month {
            Some(raw) => validation::parse_month(raw)?,
            None => self.store.current_month(),
        };

        let Some(card) = self.store.month_card_for(month.first_day()) else {
            return Ok(format!(
                "No month card for {}. Create one with: month-add {} target={} reward=<name>=<points>",
                month.long_name(),
                month,
                DEFAULT_TARGET_POINTS
            ));
        };

        let mut result = formatting::format_month_card(card);
        let events = self.store.completed_events_in_month(month);
        if !events.is_empty() {
            result.push_str("  Major events completed:\n");
            for event in events {
                result.push_str(&format!("    - {} ({} pts)\n", event.name, event.points));
            }
        }
        Ok(result)
    }

    /// Create a card; at least one reward is required
    pub fn handle_add_month(&mut self, month: &str, options: &CommandOptions) -> Result<String> {
        check_month_options(options)?;
        let month = validation::parse_month(month)?;
        let target = match options.get("target") {
            Some(raw) => validation::parse_points("Target points", raw)?,
            None => DEFAULT_TARGET_POINTS,
        };
        let rewards = parse_rewards(&options.rewards)?;

        let mut draft = MonthCardDraft::new(month, target, rewards);
        apply_month_options(&mut draft, options)?;

        let id = self.store.add_month_card(draft)?;
        Ok(format!("Month card created: {} ({})", id, month.long_name()))
    }

    /// Edit a card; fields not given keep their current value
    ///
    /// Rewards given on the command line replace the whole list. A reward
    /// keeps its claimed flag when its name was already on the card.
    pub fn handle_edit_month(&mut self, id: &str, options: &CommandOptions) -> Result<String> {
        check_month_options(options)?;
        let id = id.trim();
        let Some(card) = self.store.find_month_card(id) else {
            bail!("Month card '{}' not found", id);
        };

        let mut draft = card.to_draft();
        if let Some(raw) = options.get("target") {
            draft.target_points = validation::parse_points("Target points", raw)?;
        }
        if !options.rewards.is_empty() {
            let mut rewards = parse_rewards(&options.rewards)?;
            for reward in &mut rewards {
                reward.claimed = card
                    .rewards
                    .iter()
                    .any(|old| old.name == reward.name.trim() && old.claimed);
            }
            draft.rewards = rewards;
        }
        apply_month_options(&mut draft, options)?;

        let new_id = draft.month.to_string();
        match self.store.edit_month_card(id, draft)? {
            Some(_) if new_id != id => {
                Ok(format!("Month card {} updated and moved to {}", id, new_id))
            }
            Some(_) => Ok(format!("Month card {} updated", id)),
            None => bail!("Month card '{}' not found", id),
        }
    }

    pub fn handle_delete_month(&mut self, id: &str) -> Result<String> {
        match self.store.delete_month_card(id.trim()) {
            Some(card) => Ok(format!("Month card deleted: {}", card.id)),
            None => bail!("Month card '{}' not found", id.trim()),
        }
    }

    /// Flip the claimed flag of the reward at a 1-based position
    pub fn handle_claim_reward(&mut self, id: &str, position: &str) -> Result<String> {
        let id = id.trim();
        let index = validation::parse_position(position)?;
        let Some(claimed) = self.store.toggle_reward_claimed(id, index) else {
            bail!("Month card '{}' has no reward at position {}", id, position.trim());
        };
        let name = self
            .store
            .find_month_card(id)
            .and_then(|c| c.rewards.get(index))
            .map_or("", |r| r.name.as_str());
        if claimed {
            Ok(format!("Reward claimed: {}", name))
        } else {
            Ok(format!("Reward unclaimed: {}", name))
        }
    }
}

const MONTH_OPTIONS: [&str; 8] = [
    "month", "target", "earned", "events", "punchins", "summary", "image", "reward",
];

fn check_month_options(options: &CommandOptions) -> Result<()> {
    let unknown = options.unknown_keys(&MONTH_OPTIONS);
    if !unknown.is_empty() {
        bail!("Unknown option(s): {}", unknown.join(", "));
    }
    Ok(())
}

fn parse_rewards(raw: &[String]) -> Result<Vec<Reward>> {
    let rewards = raw
        .iter()
        .map(|r| validation::parse_reward(r))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rewards)
}

/// Options shared by add and edit; `target` and `reward` are handled by the caller
fn apply_month_options(draft: &mut MonthCardDraft, options: &CommandOptions) -> Result<()> {
    if let Some(raw) = options.get("month") {
        draft.month = validation::parse_month(raw)?;
    }
    if let Some(raw) = options.get("earned") {
        draft.earned_points = validation::parse_count("Earned points", raw)?;
    }
    if let Some(raw) = options.get("events") {
        draft.completed_events = validation::parse_count("Completed events", raw)?;
    }
    if let Some(raw) = options.get("punchins") {
        draft.completed_punch_ins = validation::parse_count("Completed punch-ins", raw)?;
    }
    if let Some(summary) = options.get("summary") {
        draft.summary = Some(summary.to_string());
    }
    if let Some(image) = options.get("image") {
        draft.image_url = Some(image.to_string());
    }
    Ok(())
}
