use crate::graph::DependencyGraph;
use crate::task::Task;
use std::collections::HashMap;

/// Longest chain by cumulative authored duration through the DAG:
/// forward longest-path accumulation over the topological order, then a
/// backward trace from the global maximum. Every tie, at the global
/// maximum and at each trace step, resolves to the smaller insertion
/// index, so the traced chain is fully deterministic.
pub struct CriticalPath<'a> {
    graph: &'a DependencyGraph,
    tasks: &'a [Task],
}

impl<'a> CriticalPath<'a> {
    pub fn new(graph: &'a DependencyGraph, tasks: &'a [Task]) -> Self {
        Self { graph, tasks }
    }

    /// Task ids of the critical path, in chain order.
    pub fn execute(&self) -> Vec<String> {
        if self.tasks.is_empty() {
            return Vec::new();
        }
        let by_id: HashMap<&str, &Task> =
            self.tasks.iter().map(|t| (t.id.as_str(), t)).collect();
        let index_of: HashMap<&str, usize> = self
            .tasks
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id.as_str(), i))
            .collect();

        // Cumulative duration of the longest chain ending at each task.
        let mut dist: HashMap<String, i64> = HashMap::with_capacity(self.tasks.len());
        for id in self.graph.topological_order() {
            let Some(task) = by_id.get(id.as_str()) else {
                continue;
            };
            let longest_pred = self
                .graph
                .predecessors(id)
                .iter()
                .filter_map(|pred| dist.get(*pred))
                .max()
                .copied()
                .unwrap_or(0);
            dist.insert(id.clone(), task.duration_days() + longest_pred);
        }

        // Global maximum; insertion order of the scan breaks ties.
        let mut chain_end: Option<&str> = None;
        let mut best = i64::MIN;
        for task in self.tasks {
            if let Some(&d) = dist.get(task.id.as_str()) {
                if d > best {
                    best = d;
                    chain_end = Some(task.id.as_str());
                }
            }
        }
        let Some(mut current) = chain_end else {
            return Vec::new();
        };

        let mut chain = vec![current.to_string()];
        loop {
            let target = dist[current] - by_id[current].duration_days();
            let mut next: Option<&str> = None;
            for pred in self.graph.predecessors(current) {
                if dist.get(pred).copied() != Some(target) {
                    continue;
                }
                next = match next {
                    Some(chosen) if index_of[chosen] <= index_of[pred] => Some(chosen),
                    _ => Some(pred),
                };
            }
            match next {
                Some(pred) => {
                    chain.push(pred.to_string());
                    current = pred;
                }
                None => break,
            }
        }
        chain.reverse();
        chain
    }
}
