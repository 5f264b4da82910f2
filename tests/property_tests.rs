use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use std::collections::HashMap;
use timeline_engine::{DependencyGraph, Resource, Schedule, Task, aggregate};

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
}

/// Random acyclic task sets: each task may only depend on earlier
/// insertion indices, so every generated set builds a valid DAG.
fn arb_tasks() -> impl Strategy<Value = Vec<Task>> {
    prop::collection::vec(
        (
            0i64..30,
            0i64..10,
            prop::collection::vec(any::<prop::sample::Index>(), 0..3),
        ),
        1..12,
    )
    .prop_map(|specs| {
        specs
            .iter()
            .enumerate()
            .map(|(i, (start, duration, dep_picks))| {
                let start_date = base() + Duration::days(*start);
                let mut task = Task::new(
                    format!("t{i}"),
                    format!("Task {i}"),
                    start_date,
                    start_date + Duration::days(*duration),
                );
                if i > 0 {
                    let mut deps: Vec<String> = dep_picks
                        .iter()
                        .map(|pick| format!("t{}", pick.index(i)))
                        .collect();
                    deps.sort();
                    deps.dedup();
                    task.dependencies = deps;
                }
                task
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn schedule_terminates_and_respects_predecessors(tasks in arb_tasks()) {
        let graph = DependencyGraph::build(&tasks).unwrap();
        let schedule = Schedule::compute(&graph, &tasks);
        prop_assert_eq!(schedule.len(), tasks.len());

        for task in &tasks {
            let entry = schedule.get(&task.id).unwrap();
            prop_assert!(entry.early_start >= task.start);
            prop_assert_eq!(
                (entry.early_end - entry.early_start).num_days(),
                task.duration_days()
            );
            prop_assert!(entry.total_float_days >= 0);
            for dep in &task.dependencies {
                let pred = schedule.get(dep).unwrap();
                prop_assert!(
                    entry.early_start >= pred.early_end,
                    "{} starts {} before predecessor {} ends {}",
                    task.id, entry.early_start, dep, pred.early_end
                );
            }
        }
    }

    #[test]
    fn topological_order_is_deterministic(tasks in arb_tasks()) {
        let first = DependencyGraph::build(&tasks).unwrap();
        let second = DependencyGraph::build(&tasks).unwrap();
        prop_assert_eq!(first.topological_order(), second.topological_order());
    }

    #[test]
    fn critical_path_is_a_dependency_chain_and_dominates(tasks in arb_tasks()) {
        let graph = DependencyGraph::build(&tasks).unwrap();
        let schedule = Schedule::compute(&graph, &tasks);
        let chain = schedule.critical_path();
        prop_assert!(!chain.is_empty());

        let by_id: HashMap<&str, &Task> =
            tasks.iter().map(|t| (t.id.as_str(), t)).collect();
        for pair in chain.windows(2) {
            prop_assert!(
                by_id[pair[1].as_str()].dependencies.contains(&pair[0]),
                "critical path step {} -> {} is not a dependency edge",
                pair[0], pair[1]
            );
        }
        // No single task outlasts the whole chain.
        let chain_days = schedule.critical_path_days();
        for task in &tasks {
            prop_assert!(task.duration_days() <= chain_days);
        }
    }

    #[test]
    fn utilization_is_always_a_percentage(tasks in arb_tasks()) {
        let resources = vec![Resource::new("r1", "Dev"), Resource::new("r2", "QA")];
        let mut tasks = tasks;
        for (i, task) in tasks.iter_mut().enumerate() {
            task.assignee = match i % 3 {
                0 => Some("r1".to_string()),
                1 => Some("r2".to_string()),
                _ => None,
            };
        }
        let result =
            aggregate(&tasks, &resources, base(), base() + Duration::days(45)).unwrap();
        for utilization in result.values() {
            prop_assert!(utilization.utilization_percent <= 100);
        }
    }
}
