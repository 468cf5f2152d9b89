//! Task data model for a ranking batch.
//!
//! Tasks arrive from the caller as JSON records. Only the fields the engine
//! reads are typed; anything else the caller sent rides along in `extra`
//! and is written back untouched.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Effort assumed for a task with no estimate.
pub const DEFAULT_ESTIMATED_HOURS: f64 = 999.0;

/// Identifier of a task within a batch.
///
/// Callers use either integer ids (the web form numbers tasks 1, 2, 3...)
/// or string ids. The two never compare equal: `1` and `"1"` are different
/// tasks, so a dependency must be written in the same form as its target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskId {
    Number(i64),
    Name(String),
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskId::Number(n) => write!(f, "{}", n),
            TaskId::Name(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for TaskId {
    fn from(n: i64) -> Self {
        TaskId::Number(n)
    }
}

impl From<i32> for TaskId {
    fn from(n: i32) -> Self {
        TaskId::Number(i64::from(n))
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        TaskId::Name(s.to_string())
    }
}

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        TaskId::Name(s)
    }
}

/// A single work item to be ranked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    #[serde(default)]
    pub title: String,
    /// Raw due date as sent by the caller. Non-string values are dropped.
    #[serde(default, deserialize_with = "lenient_string")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
    /// Fractional weights are truncated toward zero; non-numbers count as absent.
    #[serde(
        default,
        deserialize_with = "lenient_importance",
        skip_serializing_if = "Option::is_none"
    )]
    pub importance: Option<i64>,
    /// Prerequisites by id, in declared order. May name tasks outside the batch.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub dependencies: Vec<TaskId>,
    /// Computed by the engine; caller values are overwritten.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,
    /// Computed by the engine once ordering completes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Task {
    pub fn new(id: impl Into<TaskId>, title: &str) -> Self {
        Self {
            id: id.into(),
            title: title.to_string(),
            due_date: None,
            estimated_hours: None,
            importance: None,
            dependencies: Vec::new(),
            score: None,
            remarks: None,
            extra: Map::new(),
        }
    }

    pub fn with_due_date(mut self, due_date: &str) -> Self {
        self.due_date = Some(due_date.to_string());
        self
    }

    pub fn with_hours(mut self, hours: f64) -> Self {
        self.estimated_hours = Some(hours);
        self
    }

    pub fn with_importance(mut self, importance: i64) -> Self {
        self.importance = Some(importance);
        self
    }

    pub fn with_dependencies<I, D>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: Into<TaskId>,
    {
        self.dependencies = deps.into_iter().map(Into::into).collect();
        self
    }

    /// Effort estimate, falling back to `DEFAULT_ESTIMATED_HOURS`.
    pub fn hours(&self) -> f64 {
        self.estimated_hours.unwrap_or(DEFAULT_ESTIMATED_HOURS)
    }

    pub fn importance(&self) -> i64 {
        self.importance.unwrap_or(0)
    }

    /// The due date as a calendar date.
    ///
    /// Missing or unparsable dates mean "no deadline" and map to the latest
    /// representable date.
    pub fn deadline(&self) -> NaiveDate {
        self.due_date
            .as_deref()
            .and_then(parse_due_date)
            .unwrap_or(NaiveDate::MAX)
    }
}

/// Parse a due date given either as `2025-11-30` or as a timestamp such as
/// `2025-11-30T10:20:00Z` / `2025-11-30T10:20:00+05:30`.
///
/// Timestamps keep the calendar date written in them; no timezone conversion
/// happens.
pub fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    let naive = raw.strip_suffix('Z').unwrap_or(raw);
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(naive, fmt).ok())
        .map(|dt| dt.date())
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_importance<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        _ => None,
    })
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<TaskId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<TaskId>>::deserialize(deserializer)?.unwrap_or_default())
}
