//! Priority score blending deadline urgency, importance and effort.
//!
//! The current date is always passed in, so a score is reproducible for a
//! fixed `today`.

use chrono::NaiveDate;

use crate::core::task::Task;

pub const OVERDUE_BONUS: i64 = 100;
pub const DUE_SOON_BONUS: i64 = 50;
pub const DUE_THIS_WEEK_BONUS: i64 = 20;
pub const IMPORTANCE_WEIGHT: i64 = 5;
pub const QUICK_WIN_BONUS: i64 = 10;

/// Inclusive day windows for the urgency tiers.
const DUE_SOON_DAYS: i64 = 3;
const DUE_THIS_WEEK_DAYS: i64 = 7;

/// Tasks estimated below this many hours count as quick wins.
pub const QUICK_WIN_HOURS: f64 = 2.0;

/// Urgency points for a deadline relative to `today`.
pub fn urgency(deadline: NaiveDate, today: NaiveDate) -> i64 {
    let days_until_due = deadline.signed_duration_since(today).num_days();
    if days_until_due < 0 {
        OVERDUE_BONUS
    } else if days_until_due <= DUE_SOON_DAYS {
        DUE_SOON_BONUS
    } else if days_until_due <= DUE_THIS_WEEK_DAYS {
        DUE_THIS_WEEK_BONUS
    } else {
        0
    }
}

/// Score a task as of `today`. Unbounded; negative importance is not clamped.
pub fn score(task: &Task, today: NaiveDate) -> i64 {
    let mut score = urgency(task.deadline(), today);
    score += task.importance() * IMPORTANCE_WEIGHT;
    if task.hours() < QUICK_WIN_HOURS {
        score += QUICK_WIN_BONUS;
    }
    score
}
