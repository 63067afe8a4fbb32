use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use std::collections::BTreeMap;
use std::fmt;

pub type TaskID = u64;

/// All tasks of one store, keyed by id. Iteration follows ascending id, which is
/// the enumeration order that sorting falls back on for ties.
pub type Collection = BTreeMap<TaskID, Task>;

pub const DISPLAY_TIME_FORMAT: &str = "%Y %b %d %H:%M";

#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(into = "u8", from = "i64")]
pub enum Priority {
    Low = 1,
    #[default]
    Medium = 2,
    High = 3,
}

const PRIORITY_NAMES: [(Priority, &str); 3] = [
    (Priority::Low, "low"),
    (Priority::Medium, "medium"),
    (Priority::High, "high"),
];

impl Priority {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Priority> {
        PRIORITY_NAMES
            .iter()
            .map(|(priority, _)| *priority)
            .find(|priority| priority.code() == code)
    }

    /// Case-insensitive lookup of `low`, `medium` or `high`.
    pub fn from_name(name: &str) -> Option<Priority> {
        let name = name.trim();
        PRIORITY_NAMES
            .iter()
            .find(|(_, n)| n.eq_ignore_ascii_case(name))
            .map(|(priority, _)| *priority)
    }

    pub fn name(self) -> &'static str {
        PRIORITY_NAMES
            .iter()
            .find(|(priority, _)| *priority == self)
            .map(|(_, n)| *n)
            .unwrap_or("medium")
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> u8 {
        priority.code()
    }
}

// Codes outside 1..=3 in a stored file degrade to Medium instead of
// discarding the whole store.
impl From<i64> for Priority {
    fn from(code: i64) -> Priority {
        u8::try_from(code)
            .ok()
            .and_then(Priority::from_code)
            .unwrap_or_default()
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        };
        write!(f, "{}", label)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Task {
    #[serde(rename = "tid")]
    pub id: TaskID,
    #[serde(rename = "task")]
    pub description: String,
    pub start: NaiveDateTime,
    pub target: NaiveDateTime,
    pub updated: NaiveDateTime,
    #[serde(rename = "finished")]
    pub finished_at: Option<NaiveDateTime>,
    pub priority: Priority,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Task {
    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let status = if self.is_finished() {
            "Finished"
        } else {
            "Pending"
        };

        writeln!(
            f,
            "{} {} [{}] (Start: {}, Target: {})",
            self.id,
            self.description,
            status,
            self.start.format(DISPLAY_TIME_FORMAT),
            self.target.format(DISPLAY_TIME_FORMAT),
        )?;
        writeln!(f, "    Priority: {}", self.priority)?;
        write!(f, "    Tags: {}", self.tags.join(", "))?;

        if let Some(finished_at) = self.finished_at {
            write!(f, "\n    Finished: {}", finished_at.format(DISPLAY_TIME_FORMAT))?;
        }

        Ok(())
    }
}

/// Fields a user asked to change on an existing task. `None` leaves the
/// field as it is.
#[derive(Debug, Default, Clone)]
pub struct TaskEdit {
    pub description: Option<String>,
    pub target: Option<NaiveDateTime>,
    pub priority: Option<Priority>,
    pub tags: Option<Vec<String>>,
}

/// Status filters, priority and tag filters for `list`.
#[derive(Debug, Default, Clone)]
pub struct ListFilter {
    pub pending_only: bool,
    pub finished_only: bool,
    pub priority: Option<Priority>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Priority,
    Start,
    Target,
    Updated,
    Task,
    Tid,
}

impl SortField {
    pub fn from_name(name: &str) -> Option<SortField> {
        match name.trim().to_ascii_lowercase().as_str() {
            "priority" => Some(SortField::Priority),
            "start" => Some(SortField::Start),
            "target" => Some(SortField::Target),
            "updated" => Some(SortField::Updated),
            "task" => Some(SortField::Task),
            "tid" => Some(SortField::Tid),
            _ => None,
        }
    }
}

pub const DEFAULT_SORT: [SortField; 2] = [SortField::Priority, SortField::Start];
