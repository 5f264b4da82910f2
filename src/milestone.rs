use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A dated marker with optional associated tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: String,
    pub name: String,
    pub date: NaiveDate,
    /// Ids of tasks associated with this milestone.
    #[serde(default)]
    pub tasks: Vec<String>,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Milestone {
    pub fn new(id: impl Into<String>, name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            date,
            tasks: Vec::new(),
            completed: false,
            description: None,
        }
    }
}
