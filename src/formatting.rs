//! Text rendering for shell responses
//!
//! Pure functions from domain values to display strings. Nothing here reads
//! the clock or mutates the store.

use crate::habit::{
    CalendarDisplayMode, CalendarMonth, DisplayPreferences, HabitStore, MajorEvent, MonthCard,
    MonthProgress, PeriodStatistics, PunchInTask, TaskCount,
};
use chrono::NaiveDate;
use std::fmt::Write;

/// Numbered list of one day's completions, positions starting at 1
pub fn format_day(date: NaiveDate, entries: &[String]) -> String {
    if entries.is_empty() {
        return format!("No completions on {}", date);
    }
    let mut result = format!("Completions on {} ({}):\n", date, entries.len());
    for (i, name) in entries.iter().enumerate() {
        let _ = writeln!(result, "  {}. {}", i + 1, name);
    }
    result
}

/// Grouped counts such as "push a commit x2"
pub fn format_task_counts(counts: &[TaskCount]) -> String {
    counts
        .iter()
        .map(|c| {
            if c.count > 1 {
                format!("{} x{}", c.name, c.count)
            } else {
                c.name.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// The punch-in list with its monthly column
pub fn format_tasks(store: &HabitStore, tasks: &[&PunchInTask]) -> String {
    if tasks.is_empty() {
        return "No punch-in tasks".to_string();
    }

    let mut result = format!("Punch-in tasks ({}):\n", tasks.len());
    for task in tasks {
        let hidden = if store.preferences().is_visible(&task.name) {
            ""
        } else {
            " (hidden)"
        };
        let color = store
            .preferences()
            .color_of(&task.name)
            .map_or_else(|| "none".to_string(), |c| c.to_string());
        let _ = writeln!(
            result,
            "- [{}] {}{} | {} pts | today {} | month {} | total {} | streak {} | color {}",
            task.id,
            task.name,
            hidden,
            task.points,
            store.count_for_task_today(&task.name),
            store.count_for_task_this_month(&task.name),
            task.historical_count,
            task.streak,
            color
        );
    }
    result
}

/// A Sunday-first month grid followed by each active day's completions
pub fn format_calendar(calendar: &CalendarMonth, preferences: &DisplayPreferences) -> String {
    let mut result = format!("{}\n Su  Mo  Tu  We  Th  Fr  Sa\n", calendar.month.long_name());

    let mut column = 0;
    for _ in 0..calendar.leading_blanks {
        result.push_str("    ");
        column += 1;
    }
    for day in &calendar.days {
        let marker = if day.is_today {
            '*'
        } else if day.total > 0 {
            '+'
        } else {
            ' '
        };
        let _ = write!(result, "{:>3}{}", day.date.format("%-d"), marker);
        column += 1;
        if column % 7 == 0 {
            result.push('\n');
        }
    }
    if column % 7 != 0 {
        result.push('\n');
    }

    for day in calendar.days.iter().filter(|d| d.total > 0) {
        let detail = match preferences.calendar_mode {
            CalendarDisplayMode::Badges => format_task_counts(&day.tasks),
            CalendarDisplayMode::Dots => day
                .tasks
                .iter()
                .map(|t| {
                    let color = preferences
                        .color_of(&t.name)
                        .map_or("·".to_string(), |c| c.as_str()[..1].to_string());
                    color.repeat(t.count as usize)
                })
                .collect::<String>(),
        };
        let _ = writeln!(result, "{:>3}: {}", day.date.format("%-d"), detail);
    }
    result
}

/// Earned-versus-target line
pub fn format_progress(progress: &MonthProgress) -> String {
    format!(
        "{}/{} points ({}%)",
        progress.earned, progress.target, progress.percent
    )
}

/// Full detail of one month card
pub fn format_month_card(card: &MonthCard) -> String {
    let mut result = format!("[{}] {}\n", card.id, card.month.long_name());
    let _ = writeln!(result, "  Progress: {}", format_progress(&card.progress()));
    let _ = writeln!(
        result,
        "  Completed: {} event(s), {} punch-in(s)",
        card.completed_events, card.completed_punch_ins
    );
    if let Some(summary) = &card.summary {
        let _ = writeln!(result, "  Summary: {}", summary);
    }
    if let Some(url) = &card.image_url {
        let _ = writeln!(result, "  Image: {}", url);
    }
    result.push_str("  Rewards:\n");
    for (i, reward) in card.rewards.iter().enumerate() {
        let mark = if reward.claimed { "x" } else { " " };
        let _ = writeln!(
            result,
            "    {}. [{}] {} ({} pts)",
            i + 1,
            mark,
            reward.name,
            reward.points
        );
    }
    result
}

/// One line per card, in registry order
pub fn format_month_cards(cards: &[MonthCard]) -> String {
    if cards.is_empty() {
        return "No month cards".to_string();
    }
    let mut result = format!("Month cards ({}):\n", cards.len());
    for card in cards {
        let claimed = card.rewards.iter().filter(|r| r.claimed).count();
        let _ = writeln!(
            result,
            "- [{}] {} | {} | rewards {}/{} claimed",
            card.id,
            card.month.long_name(),
            format_progress(&card.progress()),
            claimed,
            card.rewards.len()
        );
    }
    result
}

pub fn format_events(events: &[MajorEvent]) -> String {
    if events.is_empty() {
        return "No major events".to_string();
    }
    let mut result = format!("Major events ({}):\n", events.len());
    for event in events {
        let _ = write!(
            result,
            "- [{}] {} | {} pts | {}",
            event.id, event.name, event.points, event.status
        );
        if let Some(month) = event.completed_month {
            let _ = write!(result, " ({})", month);
        }
        result.push('\n');
    }
    result
}

/// Every panel of the statistics view as text
pub fn format_statistics(stats: &PeriodStatistics, preferences: &DisplayPreferences) -> String {
    let mut result = format!(
        "Statistics for {} ({} to {})\n",
        stats.title, stats.start, stats.end
    );
    let _ = writeln!(result, "  Total points: {}", stats.total_points);
    let _ = writeln!(result, "  Completions: {}", stats.total_completions);
    match &stats.most_completed {
        Some(top) => {
            let _ = writeln!(result, "  Most completed: {} ({})", top.name, top.count);
        }
        None => result.push_str("  Most completed: none\n"),
    }
    match &stats.highest_value {
        Some(top) => {
            let _ = writeln!(
                result,
                "  Highest value: {} ({} pts from {} x {})",
                top.name, top.points, top.completions, top.points_per_completion
            );
        }
        None => result.push_str("  Highest value: none\n"),
    }

    result.push_str("  Activity:\n");
    for bucket in &stats.buckets {
        let _ = writeln!(
            result,
            "    {:>6}: {} completion(s), {} pts",
            bucket.label, bucket.completions, bucket.points
        );
    }

    if !stats.distribution.is_empty() {
        result.push_str("  Distribution:\n");
        for entry in &stats.distribution {
            let _ = writeln!(
                result,
                "    {} {}: {}",
                preferences.chart_hex(&entry.name),
                entry.name,
                entry.count
            );
        }
    }
    if !stats.points_ranking.is_empty() {
        result.push_str("  Points by task:\n");
        for entry in &stats.points_ranking {
            let _ = writeln!(result, "    {}: {} pts", entry.name, entry.points);
        }
    }
    if !stats.recent_days.is_empty() {
        result.push_str("  Recent activity:\n");
        for day in &stats.recent_days {
            let _ = writeln!(
                result,
                "    {}: {}",
                day.date.format("%b %-d"),
                day.completions.join(", ")
            );
        }
    }
    result
}
