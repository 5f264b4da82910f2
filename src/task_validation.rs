use crate::milestone::Milestone;
use crate::resource::Resource;
use crate::task::Task;
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyId {
        kind: &'static str,
    },
    DuplicateId {
        kind: &'static str,
        id: String,
    },
    /// A task's end date precedes its start date.
    InvalidRange {
        id: String,
        start: NaiveDate,
        end: NaiveDate,
    },
    /// A query window's end date precedes its start date.
    InvalidWindow {
        start: NaiveDate,
        end: NaiveDate,
    },
    InvalidProgress {
        id: String,
        value: u8,
    },
    InvalidAvailability {
        id: String,
        value: u8,
    },
    UnknownParent {
        task_id: String,
        parent_id: String,
    },
    /// The parent pointers of these tasks form a loop.
    ParentCycle {
        task_ids: Vec<String>,
    },
    UnknownAssignee {
        task_id: String,
        resource_id: String,
    },
    UnknownMilestoneTask {
        milestone_id: String,
        task_id: String,
    },
    UnknownTaskMilestone {
        task_id: String,
        milestone_id: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyId { kind } => write!(f, "{kind} id must not be empty"),
            ValidationError::DuplicateId { kind, id } => {
                write!(f, "duplicate {kind} id '{id}'")
            }
            ValidationError::InvalidRange { id, start, end } => write!(
                f,
                "task '{id}' has end date {end} before start date {start}"
            ),
            ValidationError::InvalidWindow { start, end } => {
                write!(f, "window end date {end} precedes start date {start}")
            }
            ValidationError::InvalidProgress { id, value } => {
                write!(f, "task '{id}' has progress {value} (must be 0-100)")
            }
            ValidationError::InvalidAvailability { id, value } => {
                write!(f, "resource '{id}' has availability {value} (must be 0-100)")
            }
            ValidationError::UnknownParent { task_id, parent_id } => {
                write!(f, "task '{task_id}' references unknown parent '{parent_id}'")
            }
            ValidationError::ParentCycle { task_ids } => {
                write!(f, "subtask parents form a cycle: {}", task_ids.join(" -> "))
            }
            ValidationError::UnknownAssignee { task_id, resource_id } => write!(
                f,
                "task '{task_id}' is assigned to unknown resource '{resource_id}'"
            ),
            ValidationError::UnknownMilestoneTask { milestone_id, task_id } => write!(
                f,
                "milestone '{milestone_id}' references unknown task '{task_id}'"
            ),
            ValidationError::UnknownTaskMilestone { task_id, milestone_id } => write!(
                f,
                "task '{task_id}' references unknown milestone '{milestone_id}'"
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

pub fn validate_task(task: &Task) -> Result<(), ValidationError> {
    if task.id.trim().is_empty() {
        return Err(ValidationError::EmptyId { kind: "task" });
    }
    if task.end < task.start {
        return Err(ValidationError::InvalidRange {
            id: task.id.clone(),
            start: task.start,
            end: task.end,
        });
    }
    if task.progress > 100 {
        return Err(ValidationError::InvalidProgress {
            id: task.id.clone(),
            value: task.progress,
        });
    }
    Ok(())
}

pub fn validate_resource(resource: &Resource) -> Result<(), ValidationError> {
    if resource.id.trim().is_empty() {
        return Err(ValidationError::EmptyId { kind: "resource" });
    }
    if resource.availability > 100 {
        return Err(ValidationError::InvalidAvailability {
            id: resource.id.clone(),
            value: resource.availability,
        });
    }
    Ok(())
}

pub fn validate_milestone(milestone: &Milestone) -> Result<(), ValidationError> {
    if milestone.id.trim().is_empty() {
        return Err(ValidationError::EmptyId { kind: "milestone" });
    }
    Ok(())
}

/// Per-record invariants, duplicate ids, and subtask-forest consistency
/// for a whole task collection.
pub fn validate_task_collection(tasks: &[Task]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(tasks.len());
    for task in tasks {
        validate_task(task)?;
        if !seen.insert(task.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                kind: "task",
                id: task.id.clone(),
            });
        }
    }
    validate_parent_forest(tasks)
}

pub fn validate_resource_collection(resources: &[Resource]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(resources.len());
    for resource in resources {
        validate_resource(resource)?;
        if !seen.insert(resource.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                kind: "resource",
                id: resource.id.clone(),
            });
        }
    }
    Ok(())
}

pub fn validate_milestone_collection(milestones: &[Milestone]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(milestones.len());
    for milestone in milestones {
        validate_milestone(milestone)?;
        if !seen.insert(milestone.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                kind: "milestone",
                id: milestone.id.clone(),
            });
        }
    }
    Ok(())
}

/// Cross-collection reference checks: assignees must name existing
/// resources and task/milestone associations must point at existing
/// records on both sides.
pub fn validate_references(
    tasks: &[Task],
    resources: &[Resource],
    milestones: &[Milestone],
) -> Result<(), ValidationError> {
    let task_ids: HashSet<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
    let resource_ids: HashSet<&str> = resources.iter().map(|r| r.id.as_str()).collect();
    let milestone_ids: HashSet<&str> = milestones.iter().map(|m| m.id.as_str()).collect();

    for task in tasks {
        if let Some(assignee) = &task.assignee {
            if !resource_ids.contains(assignee.as_str()) {
                return Err(ValidationError::UnknownAssignee {
                    task_id: task.id.clone(),
                    resource_id: assignee.clone(),
                });
            }
        }
        if let Some(milestone) = &task.milestone {
            if !milestone_ids.contains(milestone.as_str()) {
                return Err(ValidationError::UnknownTaskMilestone {
                    task_id: task.id.clone(),
                    milestone_id: milestone.clone(),
                });
            }
        }
    }

    for milestone in milestones {
        for task_id in &milestone.tasks {
            if !task_ids.contains(task_id.as_str()) {
                return Err(ValidationError::UnknownMilestoneTask {
                    milestone_id: milestone.id.clone(),
                    task_id: task_id.clone(),
                });
            }
        }
    }
    Ok(())
}

/// The parent pointers must form a forest: every parent exists and no
/// chain of parents loops back on itself.
fn validate_parent_forest(tasks: &[Task]) -> Result<(), ValidationError> {
    let by_id: HashMap<&str, &Task> = tasks.iter().map(|t| (t.id.as_str(), t)).collect();
    let mut settled: HashSet<&str> = HashSet::with_capacity(tasks.len());

    for task in tasks {
        if settled.contains(task.id.as_str()) {
            continue;
        }
        let mut chain: Vec<&str> = Vec::new();
        let mut current = task;
        loop {
            if settled.contains(current.id.as_str()) {
                break;
            }
            if let Some(pos) = chain.iter().position(|&id| id == current.id) {
                return Err(ValidationError::ParentCycle {
                    task_ids: chain[pos..].iter().map(|&id| id.to_string()).collect(),
                });
            }
            chain.push(current.id.as_str());
            match &current.parent {
                None => break,
                Some(parent_id) => match by_id.get(parent_id.as_str()) {
                    Some(parent) => current = parent,
                    None => {
                        return Err(ValidationError::UnknownParent {
                            task_id: current.id.clone(),
                            parent_id: parent_id.clone(),
                        });
                    }
                },
            }
        }
        settled.extend(chain);
    }
    Ok(())
}
