use crate::calendar;
use crate::graph::DependencyGraph;
use crate::task::Task;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Latest-dates pass. Walks the reverse topological order; a task's late
/// finish is the minimum late start among its successors, or the project
/// finish for sinks.
pub struct BackwardPass<'a> {
    graph: &'a DependencyGraph,
    tasks: &'a [Task],
}

impl<'a> BackwardPass<'a> {
    pub fn new(graph: &'a DependencyGraph, tasks: &'a [Task]) -> Self {
        Self { graph, tasks }
    }

    pub fn execute(
        &self,
        early: &HashMap<String, (NaiveDate, NaiveDate)>,
    ) -> HashMap<String, (NaiveDate, NaiveDate)> {
        let Some(project_finish) = early.values().map(|&(_, end)| end).max() else {
            return HashMap::new();
        };

        let by_id: HashMap<&str, &Task> =
            self.tasks.iter().map(|t| (t.id.as_str(), t)).collect();
        let mut result: HashMap<String, (NaiveDate, NaiveDate)> =
            HashMap::with_capacity(self.tasks.len());

        for id in self.graph.topological_order().iter().rev() {
            let Some(task) = by_id.get(id.as_str()) else {
                continue;
            };
            let mut late_end = project_finish;
            for succ in self.graph.successors(id) {
                if let Some(&(succ_late_start, _)) = result.get(succ) {
                    if succ_late_start < late_end {
                        late_end = succ_late_start;
                    }
                }
            }
            let late_start = calendar::add_days(late_end, -task.duration_days());
            result.insert(id.clone(), (late_start, late_end));
        }
        result
    }
}
