use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            "critical" => Some(Priority::Critical),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    NotStarted,
    InProgress,
    Completed,
    OnHold,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::NotStarted => "not_started",
            Status::InProgress => "in_progress",
            Status::Completed => "completed",
            Status::OnHold => "on_hold",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "not_started" => Some(Status::NotStarted),
            "in_progress" => Some(Status::InProgress),
            "completed" => Some(Status::Completed),
            "on_hold" => Some(Status::OnHold),
            _ => None,
        }
    }
}

/// A single task in the project. Dates are calendar days; the authored
/// duration is always `end - start` in whole days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Completion percentage, 0-100.
    pub progress: u8,
    pub priority: Priority,
    pub status: Status,
    /// Ids of predecessor tasks that must finish before this one starts.
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Parent task id for subtasks. Children are derived, never stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Id of the single assigned resource, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    /// Display color, cosmetic only.
    #[serde(default)]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Id of an associated milestone, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milestone: Option<String>,
}

impl Task {
    pub fn new(id: impl Into<String>, name: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            start,
            end,
            progress: 0,
            priority: Priority::Medium,
            status: Status::NotStarted,
            dependencies: Vec::new(),
            parent: None,
            assignee: None,
            color: String::new(),
            description: None,
            milestone: None,
        }
    }

    /// Authored duration in whole days. Negative when the range is
    /// malformed; range validation rejects such tasks before scheduling.
    pub fn duration_days(&self) -> i64 {
        crate::calendar::days_between(self.start, self.end)
    }
}
