//! Test fixtures for integration tests.
//!
//! Provides a fixed "today", date helpers and batch builders.

use chrono::{Duration, NaiveDate};

use taskrank::core::task::{Task, TaskId};
use taskrank::PriorityEngine;

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 11, 20).expect("valid date")
}

pub fn engine() -> PriorityEngine {
    PriorityEngine::new(today())
}

/// `today + days` formatted as YYYY-MM-DD.
pub fn due_in(days: i64) -> String {
    (today() + Duration::days(days))
        .format("%Y-%m-%d")
        .to_string()
}

pub fn task(id: &str, deps: &[&str]) -> Task {
    Task::new(id, &format!("Task {}", id)).with_dependencies(deps.iter().copied())
}

pub fn ids(tasks: &[Task]) -> Vec<String> {
    tasks.iter().map(|t| t.id.to_string()).collect()
}

/// Position of `id` in an ordering.
pub fn position(tasks: &[Task], id: &TaskId) -> Option<usize> {
    tasks.iter().position(|t| &t.id == id)
}
