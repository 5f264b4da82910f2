use crate::calendar;
use crate::resource::Resource;
use crate::task::Task;
use crate::task_validation::ValidationError;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ResourceUtilization {
    pub assigned_task_count: usize,
    /// Share of in-range tasks assigned to this resource, 0-100.
    pub utilization_percent: u8,
}

/// Per-resource utilization over a query range, computed from authored
/// task spans (inclusive overlap). Every supplied resource gets an entry;
/// one with no assigned tasks in range reports zero.
pub fn aggregate(
    tasks: &[Task],
    resources: &[Resource],
    range_start: NaiveDate,
    range_end: NaiveDate,
) -> Result<HashMap<String, ResourceUtilization>, ValidationError> {
    if range_end < range_start {
        return Err(ValidationError::InvalidWindow {
            start: range_start,
            end: range_end,
        });
    }

    let mut result: HashMap<String, ResourceUtilization> =
        resources
            .iter()
            .map(|r| (r.id.clone(), ResourceUtilization::default()))
            .collect();

    let in_range: Vec<&Task> = tasks
        .iter()
        .filter(|t| calendar::spans_overlap(t.start, t.end, range_start, range_end))
        .collect();
    let total = in_range.len().max(1);

    for task in &in_range {
        let Some(assignee) = &task.assignee else {
            continue;
        };
        if let Some(entry) = result.get_mut(assignee.as_str()) {
            entry.assigned_task_count += 1;
        }
    }

    for entry in result.values_mut() {
        let percent = (entry.assigned_task_count as f64 / total as f64) * 100.0;
        entry.utilization_percent = percent.round() as u8;
    }
    Ok(result)
}
