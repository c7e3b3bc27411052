use super::clock::Clock;
use super::major_event::{EventStatus, MajorEvent};
use super::month::YearMonth;
use super::month_card::{MonthCard, MonthCardDraft};
use super::preferences::{CalendarDisplayMode, DisplayPreferences, TaskColor};
use super::punch_in::PunchInTask;
use crate::error::{HabitError, HabitResult};
use chrono::NaiveDate;
use log::{debug, info, warn};
use std::collections::BTreeMap;

/// The single authoritative holder of habit-tracking state
///
/// Owns the completion ledger, the punch-in task registry, the month-card
/// registry, the major events list and the display preferences. Every
/// aggregate is derived from these on read (see `queries` and `statistics`);
/// nothing computed is cached here.
///
/// One instance is built at session start and handed by reference to every
/// consumer.
pub struct HabitStore {
    /// Date -> task names completed that day, in the order they were logged
    ///
    /// Repeated names are repeated completions. Names are not checked
    /// against the task registry.
    pub(crate) ledger: BTreeMap<NaiveDate, Vec<String>>,

    /// Punch-in tasks in creation order
    pub(crate) tasks: Vec<PunchInTask>,

    /// Last task id handed out; ids are never reused
    pub(crate) task_counter: u32,

    pub(crate) month_cards: Vec<MonthCard>,

    pub(crate) major_events: Vec<MajorEvent>,

    /// Last major event id handed out
    pub(crate) event_counter: u32,

    pub(crate) preferences: DisplayPreferences,

    pub(crate) clock: Box<dyn Clock>,
}

impl HabitStore {
    /// Create an empty store whose displayed month is the clock's current month
    pub fn new(clock: impl Clock + 'static) -> Self {
        let current_month = YearMonth::from_date(clock.today());
        Self {
            ledger: BTreeMap::new(),
            tasks: Vec::new(),
            task_counter: 0,
            month_cards: Vec::new(),
            major_events: Vec::new(),
            event_counter: 0,
            preferences: DisplayPreferences::new(current_month),
            clock: Box::new(clock),
        }
    }

    // ------------------------------------------------------------------
    // Read accessors
    // ------------------------------------------------------------------

    pub fn ledger(&self) -> &BTreeMap<NaiveDate, Vec<String>> {
        &self.ledger
    }

    pub fn punch_in_tasks(&self) -> &[PunchInTask] {
        &self.tasks
    }

    pub fn month_cards(&self) -> &[MonthCard] {
        &self.month_cards
    }

    pub fn major_events(&self) -> &[MajorEvent] {
        &self.major_events
    }

    pub fn preferences(&self) -> &DisplayPreferences {
        &self.preferences
    }

    pub fn find_task_by_id(&self, id: u32) -> Option<&PunchInTask> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn find_task_by_name(&self, name: &str) -> Option<&PunchInTask> {
        self.tasks.iter().find(|t| t.name == name)
    }

    fn find_task_by_name_mut(&mut self, name: &str) -> Option<&mut PunchInTask> {
        self.tasks.iter_mut().find(|t| t.name == name)
    }

    pub fn find_month_card(&self, id: &str) -> Option<&MonthCard> {
        self.month_cards.iter().find(|c| c.id == id)
    }

    pub fn find_major_event(&self, id: u32) -> Option<&MajorEvent> {
        self.major_events.iter().find(|e| e.id == id)
    }

    // ------------------------------------------------------------------
    // Completion ledger
    // ------------------------------------------------------------------

    /// Append a completion of `name` on `date`
    ///
    /// Unknown names are recorded as-is. When `date` is today the matching
    /// task's historical count and streak each go up by one.
    pub fn add_completion(&mut self, date: NaiveDate, name: &str) {
        let name = name.trim();
        let is_today = self.is_today(date);

        self.ledger.entry(date).or_default().push(name.to_string());

        if is_today && let Some(task) = self.find_task_by_name_mut(name) {
            task.record_completion();
        }
        info!("event=completion_add date={date} task={name:?} today={is_today}");
    }

    /// Remove the completion at `position` in `date`'s sequence
    ///
    /// Returns the removed name, or `None` when the date has no entries or
    /// the position is out of range.
    pub fn remove_completion(&mut self, date: NaiveDate, position: usize) -> Option<String> {
        let is_today = self.is_today(date);
        let entries = self.ledger.get_mut(&date)?;
        if position >= entries.len() {
            debug!("event=completion_remove status=noop date={date} position={position}");
            return None;
        }
        let name = entries.remove(position);

        if is_today && let Some(task) = self.find_task_by_name_mut(&name) {
            task.retract_completions(1);
        }
        info!("event=completion_remove date={date} position={position} task={name:?}");
        Some(name)
    }

    /// Remove every occurrence of `name` on `date`, returning how many went
    ///
    /// On the current date the task's historical count drops by that number
    /// and its streak by one.
    pub fn remove_all_of_type(&mut self, date: NaiveDate, name: &str) -> usize {
        let name = name.trim();
        let is_today = self.is_today(date);
        let Some(entries) = self.ledger.get_mut(&date) else {
            return 0;
        };

        let before = entries.len();
        entries.retain(|entry| entry != name);
        let removed = before - entries.len();

        if removed == 0 {
            debug!("event=completion_clear status=noop date={date} task={name:?}");
            return 0;
        }
        if is_today && let Some(task) = self.find_task_by_name_mut(name) {
            task.retract_completions(u32::try_from(removed).unwrap_or(u32::MAX));
        }
        info!("event=completion_clear date={date} task={name:?} removed={removed}");
        removed
    }

    /// Log one completion of `name` today
    pub fn increment_today(&mut self, name: &str) {
        let today = self.today();
        self.add_completion(today, name);
    }

    /// Take back the most recent completion of `name` logged today
    ///
    /// A no-op when there is none.
    pub fn decrement_today(&mut self, name: &str) -> Option<String> {
        let today = self.today();
        let name = name.trim();
        let position = self
            .ledger
            .get(&today)?
            .iter()
            .rposition(|entry| entry == name)?;
        self.remove_completion(today, position)
    }

    // ------------------------------------------------------------------
    // Punch-in task registry
    // ------------------------------------------------------------------

    fn generate_task_id(&mut self) -> u32 {
        self.task_counter += 1;
        self.task_counter
    }

    /// Create a punch-in task and return its id
    ///
    /// The new task gets a colour from the new-task palette and is visible.
    pub fn add_punch_in_task(&mut self, name: &str, points: u32) -> HabitResult<u32> {
        let name = validate_name_and_points("Task", name, points)?;
        if self.find_task_by_name(&name).is_some() {
            warn!("event=task_add status=rejected reason=duplicate name={name:?}");
            return Err(HabitError::DuplicateTaskName(name));
        }

        let id = self.generate_task_id();
        self.preferences.seed_task(&name, TaskColor::for_new_task(id));
        info!("event=task_add id={id} name={name:?} points={points}");
        self.tasks.push(PunchInTask::new(id, name, points));
        Ok(id)
    }

    /// Overwrite every field of task `id`
    ///
    /// Historical count and streak are taken verbatim. A rename carries the
    /// task's colour and visibility over to the new name. Returns the task
    /// as it was before the edit, or `None` when `id` is unknown.
    pub fn edit_punch_in_task(
        &mut self,
        id: u32,
        name: &str,
        points: u32,
        historical_count: u32,
        streak: u32,
    ) -> HabitResult<Option<PunchInTask>> {
        let name = validate_name_and_points("Task", name, points)?;
        if self.tasks.iter().any(|t| t.name == name && t.id != id) {
            warn!("event=task_edit status=rejected reason=duplicate id={id} name={name:?}");
            return Err(HabitError::DuplicateTaskName(name));
        }

        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            debug!("event=task_edit status=noop id={id}");
            return Ok(None);
        };
        let previous = task.clone();
        task.name = name.clone();
        task.points = points;
        task.historical_count = historical_count;
        task.streak = streak;

        if previous.name != name {
            self.preferences.rename_task(&previous.name, &name);
        }
        info!(
            "event=task_edit id={id} name={name:?} points={points} historical_count={historical_count} streak={streak}"
        );
        Ok(Some(previous))
    }

    /// Delete task `id` together with its colour and visibility entries
    ///
    /// Ledger entries naming the task stay where they are.
    pub fn delete_punch_in_task(&mut self, id: u32) -> Option<PunchInTask> {
        let pos = self.tasks.iter().position(|t| t.id == id)?;
        let task = self.tasks.remove(pos);
        self.preferences.forget_task(&task.name);
        info!("event=task_delete id={id} name={:?}", task.name);
        Some(task)
    }

    // ------------------------------------------------------------------
    // Month cards
    // ------------------------------------------------------------------

    /// Create a card for `draft.month` and return its id
    pub fn add_month_card(&mut self, draft: MonthCardDraft) -> HabitResult<String> {
        let draft = draft.normalize()?;
        if self.month_cards.iter().any(|c| c.month == draft.month) {
            warn!("event=month_add status=rejected reason=duplicate month={}", draft.month);
            return Err(HabitError::DuplicateMonth(draft.month));
        }

        let card = draft.into_card();
        let id = card.id.clone();
        info!("event=month_add id={id} target={}", card.target_points);
        self.month_cards.push(card);
        Ok(id)
    }

    /// Replace the fields of card `id` with `draft`
    ///
    /// Moving a card to a month another card already covers is rejected.
    /// Returns the card as it was, or `None` when `id` is unknown.
    pub fn edit_month_card(
        &mut self,
        id: &str,
        draft: MonthCardDraft,
    ) -> HabitResult<Option<MonthCard>> {
        let draft = draft.normalize()?;
        if self
            .month_cards
            .iter()
            .any(|c| c.id != id && c.month == draft.month)
        {
            warn!(
                "event=month_edit status=rejected reason=duplicate id={id} month={}",
                draft.month
            );
            return Err(HabitError::DuplicateMonth(draft.month));
        }

        let Some(card) = self.month_cards.iter_mut().find(|c| c.id == id) else {
            debug!("event=month_edit status=noop id={id}");
            return Ok(None);
        };
        let previous = std::mem::replace(card, draft.into_card());
        info!("event=month_edit id={id} new_id={}", card.id);
        Ok(Some(previous))
    }

    pub fn delete_month_card(&mut self, id: &str) -> Option<MonthCard> {
        let pos = self.month_cards.iter().position(|c| c.id == id)?;
        info!("event=month_delete id={id}");
        Some(self.month_cards.remove(pos))
    }

    /// Flip the claimed flag of one reward, returning the new state
    pub fn toggle_reward_claimed(&mut self, card_id: &str, index: usize) -> Option<bool> {
        let card = self.month_cards.iter_mut().find(|c| c.id == card_id)?;
        let reward = card.rewards.get_mut(index)?;
        reward.claimed = !reward.claimed;
        info!(
            "event=reward_toggle card={card_id} reward={:?} claimed={}",
            reward.name, reward.claimed
        );
        Some(reward.claimed)
    }

    // ------------------------------------------------------------------
    // Major events
    // ------------------------------------------------------------------

    /// Create a major event and return its id
    pub fn add_major_event(
        &mut self,
        name: &str,
        points: u32,
        status: EventStatus,
    ) -> HabitResult<u32> {
        let name = validate_name_and_points("Event", name, points)?;
        self.event_counter += 1;
        let id = self.event_counter;

        let mut event = MajorEvent {
            id,
            name,
            points,
            status: EventStatus::Backlog,
            completed_month: None,
        };
        event.transition(status, self.current_month());
        info!("event=major_add id={id} name={:?} status={status}", event.name);
        self.major_events.push(event);
        Ok(id)
    }

    /// Overwrite name, points and status of event `id`
    pub fn edit_major_event(
        &mut self,
        id: u32,
        name: &str,
        points: u32,
        status: EventStatus,
    ) -> HabitResult<Option<MajorEvent>> {
        let name = validate_name_and_points("Event", name, points)?;
        let current_month = self.current_month();
        let Some(event) = self.major_events.iter_mut().find(|e| e.id == id) else {
            debug!("event=major_edit status=noop id={id}");
            return Ok(None);
        };

        let previous = event.clone();
        event.name = name;
        event.points = points;
        event.transition(status, current_month);
        info!("event=major_edit id={id} status={status}");
        Ok(Some(previous))
    }

    /// Move event `id` to `status`, returning its previous status
    pub fn set_major_event_status(&mut self, id: u32, status: EventStatus) -> Option<EventStatus> {
        let current_month = self.current_month();
        let event = self.major_events.iter_mut().find(|e| e.id == id)?;
        let previous = event.status;
        event.transition(status, current_month);
        info!("event=major_status id={id} from={previous} to={status}");
        Some(previous)
    }

    pub fn delete_major_event(&mut self, id: u32) -> Option<MajorEvent> {
        let pos = self.major_events.iter().position(|e| e.id == id)?;
        info!("event=major_delete id={id}");
        Some(self.major_events.remove(pos))
    }

    // ------------------------------------------------------------------
    // Display preferences
    // ------------------------------------------------------------------

    pub fn set_task_color(&mut self, name: &str, color: TaskColor) {
        self.preferences.colors.insert(name.trim().to_string(), color);
    }

    pub fn set_task_visibility(&mut self, name: &str, visible: bool) {
        self.preferences
            .visibility
            .insert(name.trim().to_string(), visible);
    }

    /// Flip one task's visibility and return the new value
    pub fn toggle_task_visibility(&mut self, name: &str) -> bool {
        let visible = !self.preferences.is_visible(name.trim());
        self.set_task_visibility(name, visible);
        visible
    }

    /// Show or hide every live task at once
    pub fn set_all_visibility(&mut self, visible: bool) {
        for task in &self.tasks {
            self.preferences
                .visibility
                .insert(task.name.clone(), visible);
        }
    }

    pub fn set_calendar_display_mode(&mut self, mode: CalendarDisplayMode) {
        self.preferences.calendar_mode = mode;
    }

    pub fn set_displayed_month(&mut self, month: YearMonth) {
        self.preferences.displayed_month = month;
    }

    /// Step the displayed month back by one and return it
    pub fn show_previous_month(&mut self) -> YearMonth {
        if let Some(month) = self.preferences.displayed_month.pred() {
            self.preferences.displayed_month = month;
        }
        self.preferences.displayed_month
    }

    /// Step the displayed month forward by one and return it
    pub fn show_next_month(&mut self) -> YearMonth {
        if let Some(month) = self.preferences.displayed_month.succ() {
            self.preferences.displayed_month = month;
        }
        self.preferences.displayed_month
    }
}

/// Trim a name and check it together with its points
fn validate_name_and_points(kind: &'static str, name: &str, points: u32) -> HabitResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(HabitError::EmptyName(kind));
    }
    if points == 0 {
        return Err(HabitError::InvalidPoints {
            field: "Points",
            value: 0,
        });
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habit::clock::FixedClock;
    use crate::habit::month_card::Reward;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn store_on(today: &str) -> HabitStore {
        HabitStore::new(FixedClock(date(today)))
    }

    #[test]
    fn test_task_ids_are_never_reused() {
        let mut store = store_on("2025-03-15");
        let first = store.add_punch_in_task("reading", 6).unwrap();
        let second = store.add_punch_in_task("DSA", 4).unwrap();
        store.delete_punch_in_task(second);
        let third = store.add_punch_in_task("Leetcode easy", 3).unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert_eq!(third, 3);
        assert_eq!(store.task_counter, 3);
    }

    #[test]
    fn test_add_task_seeds_preferences() {
        let mut store = store_on("2025-03-15");
        let id = store.add_punch_in_task("  reading  ", 6).unwrap();

        let task = store.find_task_by_id(id).unwrap();
        assert_eq!(task.name, "reading");
        assert_eq!(
            store.preferences.color_of("reading"),
            Some(TaskColor::for_new_task(id))
        );
        assert_eq!(store.preferences.visibility.get("reading"), Some(&true));
    }

    #[test]
    fn test_add_task_rejects_bad_fields() {
        let mut store = store_on("2025-03-15");
        assert_eq!(
            store.add_punch_in_task("   ", 5),
            Err(HabitError::EmptyName("Task"))
        );
        assert!(matches!(
            store.add_punch_in_task("reading", 0),
            Err(HabitError::InvalidPoints { .. })
        ));
        assert!(store.tasks.is_empty());
        assert_eq!(store.task_counter, 0);
    }

    #[test]
    fn test_edit_unknown_task_is_noop() {
        let mut store = store_on("2025-03-15");
        store.add_punch_in_task("reading", 6).unwrap();
        assert_eq!(store.edit_punch_in_task(42, "DSA", 4, 0, 0), Ok(None));
        assert_eq!(store.tasks.len(), 1);
        assert_eq!(store.tasks[0].name, "reading");
    }

    #[test]
    fn test_edit_keeping_own_name_is_allowed() {
        let mut store = store_on("2025-03-15");
        let id = store.add_punch_in_task("reading", 6).unwrap();
        let previous = store.edit_punch_in_task(id, "reading", 8, 12, 2).unwrap();

        assert_eq!(previous.map(|t| t.points), Some(6));
        let task = store.find_task_by_id(id).unwrap();
        assert_eq!((task.points, task.historical_count, task.streak), (8, 12, 2));
    }

    #[test]
    fn test_remove_all_of_type_without_match_is_noop() {
        let mut store = store_on("2025-03-15");
        let id = store.add_punch_in_task("reading", 6).unwrap();
        store.edit_punch_in_task(id, "reading", 6, 4, 4).unwrap();
        store.add_completion(date("2025-03-15"), "DSA");

        assert_eq!(store.remove_all_of_type(date("2025-03-15"), "reading"), 0);
        let task = store.find_task_by_id(id).unwrap();
        assert_eq!((task.historical_count, task.streak), (4, 4));
    }

    #[test]
    fn test_major_event_lifecycle() {
        let mut store = store_on("2025-03-15");
        let id = store
            .add_major_event("go swagger setup", 20, EventStatus::InProgress)
            .unwrap();
        assert_eq!(store.find_major_event(id).unwrap().completed_month, None);

        assert_eq!(
            store.set_major_event_status(id, EventStatus::Completed),
            Some(EventStatus::InProgress)
        );
        assert_eq!(
            store.find_major_event(id).unwrap().completed_month,
            Some("2025-03".parse().unwrap())
        );

        assert_eq!(store.set_major_event_status(99, EventStatus::Completed), None);
        assert!(store.delete_major_event(id).is_some());
        assert!(store.major_events.is_empty());
    }

    #[test]
    fn test_toggle_reward_claimed() {
        let mut store = store_on("2025-03-15");
        let id = store
            .add_month_card(MonthCardDraft::new(
                "2025-03".parse().unwrap(),
                200,
                vec![Reward::new("New Book", 150)],
            ))
            .unwrap();

        assert_eq!(store.toggle_reward_claimed(&id, 0), Some(true));
        assert_eq!(store.toggle_reward_claimed(&id, 0), Some(false));
        assert_eq!(store.toggle_reward_claimed(&id, 5), None);
        assert_eq!(store.toggle_reward_claimed("2024-01", 0), None);
    }

    #[test]
    fn test_displayed_month_navigation() {
        let mut store = store_on("2025-01-10");
        assert_eq!(store.preferences.displayed_month.to_string(), "2025-01");
        assert_eq!(store.show_previous_month().to_string(), "2024-12");
        assert_eq!(store.show_next_month().to_string(), "2025-01");
        store.set_displayed_month("2025-06".parse().unwrap());
        assert_eq!(store.preferences.displayed_month.to_string(), "2025-06");
    }

    #[test]
    fn test_set_all_visibility_touches_live_tasks_only() {
        let mut store = store_on("2025-03-15");
        store.add_punch_in_task("reading", 6).unwrap();
        store.add_punch_in_task("DSA", 4).unwrap();
        store.set_task_color("orphan", TaskColor::Blue);

        store.set_all_visibility(false);
        assert!(!store.preferences.is_visible("reading"));
        assert!(!store.preferences.is_visible("DSA"));
        assert!(!store.preferences.visibility.contains_key("orphan"));

        assert!(store.toggle_task_visibility("reading"));
        assert!(store.preferences.is_visible("reading"));
    }
}
