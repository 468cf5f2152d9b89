//! Named ordering policies.
//!
//! Each strategy is a sort key plus a direction fed to the shared orderer,
//! and a remark template attached to every task once ordering is done.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::core::order::Direction;
use crate::core::task::{Task, TaskId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Strategy {
    #[serde(rename = "Fastest Wins")]
    FastestWins,
    #[serde(rename = "High Impact")]
    HighImpact,
    #[serde(rename = "Deadline Driven")]
    DeadlineDriven,
    #[default]
    #[serde(rename = "Smart Balance")]
    SmartBalance,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::FastestWins,
        Strategy::HighImpact,
        Strategy::DeadlineDriven,
        Strategy::SmartBalance,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::FastestWins => "Fastest Wins",
            Strategy::HighImpact => "High Impact",
            Strategy::DeadlineDriven => "Deadline Driven",
            Strategy::SmartBalance => "Smart Balance",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Strategy::FastestWins => "shortest effort first",
            Strategy::HighImpact => "highest importance first",
            Strategy::DeadlineDriven => "nearest deadline first",
            Strategy::SmartBalance => "blended urgency, importance and effort",
        }
    }

    /// Parse a policy name. Case, spaces, `-` and `_` are not significant,
    /// so `High Impact`, `high-impact` and `HIGH_IMPACT` all match.
    pub fn parse(name: &str) -> Option<Self> {
        let wanted = normalize(name);
        Self::ALL
            .into_iter()
            .find(|strategy| normalize(strategy.name()) == wanted)
    }

    /// Parse a policy name, falling back to Smart Balance.
    pub fn from_name(name: &str) -> Self {
        Self::parse(name).unwrap_or_default()
    }

    pub fn direction(&self) -> Direction {
        match self {
            Strategy::HighImpact => Direction::Descending,
            _ => Direction::Ascending,
        }
    }

    /// Ascending comparison on this strategy's sort key.
    ///
    /// Deadline Driven compares the raw due-date strings, as sent; tasks
    /// without one sort after every dated task. Smart Balance compares the
    /// score attached by the engine.
    pub fn compare(&self, a: &Task, b: &Task) -> Ordering {
        match self {
            Strategy::FastestWins => a.hours().total_cmp(&b.hours()),
            Strategy::HighImpact => a.importance().cmp(&b.importance()),
            Strategy::DeadlineDriven => match (&a.due_date, &b.due_date) {
                (Some(x), Some(y)) => x.cmp(y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            Strategy::SmartBalance => a.score.unwrap_or(0).cmp(&b.score.unwrap_or(0)),
        }
    }

    /// Explanation attached to a task placed by this strategy.
    pub fn remark(&self, task: &Task) -> String {
        let deps = format_dependencies(&task.dependencies);
        let due = task.due_date.as_deref().unwrap_or("None");
        match self {
            Strategy::FastestWins => format!(
                "Remark: '{}' takes {} hours and has dependencies {}, which were ordered for fastest completion.",
                task.title,
                task.hours(),
                deps
            ),
            Strategy::HighImpact => format!(
                "Remark: '{}' has high importance level {} and dependencies {}, prioritized for maximum impact.",
                task.title,
                task.importance(),
                deps
            ),
            Strategy::DeadlineDriven => format!(
                "Remark: '{}' has a due date {} and dependencies {}, ordered to meet the deadline on time.",
                task.title, due, deps
            ),
            Strategy::SmartBalance => format!(
                "Smart Remark: '{}' : {} is prioritized based on estimated hours ({}), importance ({}), and deadline ({}), while resolving dependencies {}.",
                task.title,
                task.score.unwrap_or(0),
                task.hours(),
                task.importance(),
                due,
                deps
            ),
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// The raw dependency list as written by the caller: `[1, 2]` for integer
/// ids, `['a', 'b']` for string ids.
fn format_dependencies(deps: &[TaskId]) -> String {
    let inner = deps
        .iter()
        .map(|id| match id {
            TaskId::Number(n) => n.to_string(),
            TaskId::Name(name) => quote(name),
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{}]", inner)
}

/// Single-quoted literal; switches to double quotes when the text holds a
/// single quote but no double quote.
fn quote(text: &str) -> String {
    let delim = if text.contains('\'') && !text.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(text.len() + 2);
    out.push(delim);
    for c in text.chars() {
        if c == '\\' || c == delim {
            out.push('\\');
        }
        out.push(c);
    }
    out.push(delim);
    out
}
