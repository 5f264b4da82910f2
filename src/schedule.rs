use crate::calculations::backward_pass::BackwardPass;
use crate::calculations::critical_path::CriticalPath;
use crate::calculations::forward_pass::ForwardPass;
use crate::calendar;
use crate::graph::DependencyGraph;
use crate::task::Task;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Derived dates for one task. `is_critical` marks membership of the
/// single traced critical path, not zero float.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScheduledTask {
    pub early_start: NaiveDate,
    pub early_end: NaiveDate,
    pub late_start: NaiveDate,
    pub late_end: NaiveDate,
    pub total_float_days: i64,
    pub is_critical: bool,
}

/// Immutable scheduling result over one task snapshot. Callers discard
/// and recompute; nothing in here refers back to the input.
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    entries: HashMap<String, ScheduledTask>,
    critical_path: Vec<String>,
    project_finish: Option<NaiveDate>,
}

impl Schedule {
    /// Runs the forward pass, backward pass, and critical-path trace over
    /// a validated graph and the task snapshot it was built from.
    pub fn compute(graph: &DependencyGraph, tasks: &[Task]) -> Self {
        if tasks.is_empty() {
            return Self::default();
        }

        let early = ForwardPass::new(graph, tasks).execute();
        let late = BackwardPass::new(graph, tasks).execute(&early);
        let critical_path = CriticalPath::new(graph, tasks).execute();
        let on_path: HashSet<&str> = critical_path.iter().map(String::as_str).collect();

        let project_finish = early.values().map(|&(_, end)| end).max();
        let mut entries = HashMap::with_capacity(tasks.len());
        for task in tasks {
            let Some(&(early_start, early_end)) = early.get(task.id.as_str()) else {
                continue;
            };
            let (late_start, late_end) = late
                .get(task.id.as_str())
                .copied()
                .unwrap_or((early_start, early_end));
            entries.insert(
                task.id.clone(),
                ScheduledTask {
                    early_start,
                    early_end,
                    late_start,
                    late_end,
                    total_float_days: calendar::days_between(early_start, late_start),
                    is_critical: on_path.contains(task.id.as_str()),
                },
            );
        }

        Self {
            entries,
            critical_path,
            project_finish,
        }
    }

    pub fn get(&self, task_id: &str) -> Option<&ScheduledTask> {
        self.entries.get(task_id)
    }

    /// Task ids of the critical path, in chain order.
    pub fn critical_path(&self) -> &[String] {
        &self.critical_path
    }

    /// Cumulative duration of the critical path in days.
    pub fn critical_path_days(&self) -> i64 {
        self.critical_path
            .iter()
            .filter_map(|id| self.entries.get(id))
            .map(|entry| calendar::days_between(entry.early_start, entry.early_end))
            .sum()
    }

    /// Latest early finish across all tasks; `None` for an empty schedule.
    pub fn project_finish(&self) -> Option<NaiveDate> {
        self.project_finish
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ScheduledTask)> {
        self.entries.iter().map(|(id, entry)| (id.as_str(), entry))
    }
}
