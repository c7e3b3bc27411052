use super::month::YearMonth;
use crate::error::{HabitError, HabitResult};
use serde::{Deserialize, Serialize};

/// Fallback target shown for a month that has no card yet
pub const DEFAULT_TARGET_POINTS: u32 = 200;

/// Something the user promises themselves for reaching a point total
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub name: String,
    /// Point cost
    pub points: u32,
    #[serde(default)]
    pub claimed: bool,
}

impl Reward {
    pub fn new(name: impl Into<String>, points: u32) -> Self {
        Self {
            name: name.into(),
            points,
            claimed: false,
        }
    }
}

/// Per-month record of point targets and rewards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCard {
    /// Conventionally the month as `YYYY-MM`
    pub id: String,
    pub month: YearMonth,
    pub target_points: u32,
    #[serde(default)]
    pub earned_points: u32,
    #[serde(default)]
    pub completed_events: u32,
    #[serde(default)]
    pub completed_punch_ins: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default)]
    pub rewards: Vec<Reward>,
}

impl MonthCard {
    /// Editable view of this card, used as the base for partial updates
    pub fn to_draft(&self) -> MonthCardDraft {
        MonthCardDraft {
            month: self.month,
            target_points: self.target_points,
            earned_points: self.earned_points,
            rewards: self.rewards.clone(),
            completed_events: self.completed_events,
            completed_punch_ins: self.completed_punch_ins,
            image_url: self.image_url.clone(),
            summary: self.summary.clone(),
        }
    }

    /// Progress toward the target
    pub fn progress(&self) -> MonthProgress {
        MonthProgress::new(self.earned_points, self.target_points)
    }
}

/// Every mutable field of a month card
///
/// Creating and editing a card both take a full draft; an edit replaces the
/// stored fields wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthCardDraft {
    pub month: YearMonth,
    pub target_points: u32,
    pub earned_points: u32,
    pub rewards: Vec<Reward>,
    pub completed_events: u32,
    pub completed_punch_ins: u32,
    pub image_url: Option<String>,
    pub summary: Option<String>,
}

impl MonthCardDraft {
    /// A fresh card for `month` with nothing earned yet
    pub fn new(month: YearMonth, target_points: u32, rewards: Vec<Reward>) -> Self {
        Self {
            month,
            target_points,
            earned_points: 0,
            rewards,
            completed_events: 0,
            completed_punch_ins: 0,
            image_url: None,
            summary: None,
        }
    }

    /// Validate and clean up the draft before it is stored
    ///
    /// Rewards without a name are dropped; at least one must remain.
    pub(crate) fn normalize(mut self) -> HabitResult<Self> {
        if self.target_points == 0 {
            return Err(HabitError::InvalidPoints {
                field: "Target points",
                value: 0,
            });
        }

        self.rewards.retain(|reward| !reward.name.trim().is_empty());
        if self.rewards.is_empty() {
            return Err(HabitError::NoValidRewards);
        }
        for reward in &mut self.rewards {
            reward.name = reward.name.trim().to_string();
        }

        self.image_url = non_blank(self.image_url);
        self.summary = non_blank(self.summary);
        Ok(self)
    }

    pub(crate) fn into_card(self) -> MonthCard {
        MonthCard {
            id: self.month.to_string(),
            month: self.month,
            target_points: self.target_points,
            earned_points: self.earned_points,
            completed_events: self.completed_events,
            completed_punch_ins: self.completed_punch_ins,
            image_url: self.image_url,
            summary: self.summary,
            rewards: self.rewards,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Earned-versus-target gauge for the monthly overview
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthProgress {
    pub earned: u32,
    pub target: u32,
    /// Whole percent, capped at 100
    pub percent: u32,
}

impl MonthProgress {
    pub fn new(earned: u32, target: u32) -> Self {
        let target = if target == 0 {
            DEFAULT_TARGET_POINTS
        } else {
            target
        };
        let percent = (u64::from(earned) * 100 / u64::from(target)).min(100) as u32;
        Self {
            earned,
            target,
            percent,
        }
    }
}
