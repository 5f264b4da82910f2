use crate::calendar;
use crate::graph::DependencyGraph;
use crate::task::Task;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Earliest-dates pass. Walks the topological order and pushes each
/// task's start forward to the latest predecessor finish; authored starts
/// are never pulled earlier, and durations are never altered.
pub struct ForwardPass<'a> {
    graph: &'a DependencyGraph,
    tasks: &'a [Task],
}

impl<'a> ForwardPass<'a> {
    pub fn new(graph: &'a DependencyGraph, tasks: &'a [Task]) -> Self {
        Self { graph, tasks }
    }

    pub fn execute(&self) -> HashMap<String, (NaiveDate, NaiveDate)> {
        let by_id: HashMap<&str, &Task> =
            self.tasks.iter().map(|t| (t.id.as_str(), t)).collect();
        let mut result: HashMap<String, (NaiveDate, NaiveDate)> =
            HashMap::with_capacity(self.tasks.len());

        for id in self.graph.topological_order() {
            let Some(task) = by_id.get(id.as_str()) else {
                continue;
            };
            let mut early_start = task.start;
            for pred in self.graph.predecessors(id) {
                if let Some(&(_, pred_end)) = result.get(pred) {
                    if pred_end > early_start {
                        early_start = pred_end;
                    }
                }
            }
            let early_end = calendar::add_days(early_start, task.duration_days());
            result.insert(id.clone(), (early_start, early_end));
        }
        result
    }
}
