use chrono::NaiveDate;
use timeline_engine::{DependencyGraph, Schedule, Task};

fn day(offset: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 1).unwrap() + chrono::Duration::days(offset)
}

fn task(id: &str, start: i64, end: i64, deps: &[&str]) -> Task {
    let mut t = Task::new(id, id, day(start), day(end));
    t.dependencies = deps.iter().map(|s| s.to_string()).collect();
    t
}

fn compute(tasks: &[Task]) -> Schedule {
    let graph = DependencyGraph::build(tasks).unwrap();
    Schedule::compute(&graph, tasks)
}

#[test]
fn longest_duration_chain_wins() {
    // Chain a->b totals 12 days, the standalone task only 10.
    let tasks = vec![
        task("a", 0, 5, &[]),
        task("b", 0, 7, &["a"]),
        task("solo", 0, 10, &[]),
    ];
    let schedule = compute(&tasks);
    assert_eq!(schedule.critical_path(), ["a", "b"]);
    assert_eq!(schedule.critical_path_days(), 12);
    assert!(schedule.get("a").unwrap().is_critical);
    assert!(schedule.get("b").unwrap().is_critical);
    assert!(!schedule.get("solo").unwrap().is_critical);
}

#[test]
fn disconnected_task_is_critical_only_when_longest() {
    let tasks = vec![
        task("short", 0, 3, &[]),
        task("solo", 0, 10, &[]),
        task("follow", 0, 2, &["short"]),
    ];
    let schedule = compute(&tasks);
    assert_eq!(schedule.critical_path(), ["solo"]);
    assert!(schedule.get("solo").unwrap().is_critical);
}

#[test]
fn equal_length_chains_break_toward_insertion_order() {
    let tasks = vec![task("first", 0, 5, &[]), task("second", 0, 5, &[])];
    let schedule = compute(&tasks);
    assert_eq!(schedule.critical_path(), ["first"]);

    // Same tasks supplied in the opposite order flip the winner.
    let flipped = vec![task("second", 0, 5, &[]), task("first", 0, 5, &[])];
    let schedule = compute(&flipped);
    assert_eq!(schedule.critical_path(), ["second"]);
}

#[test]
fn trace_ties_prefer_smaller_insertion_index() {
    // Both branches into "end" carry 5 days; the trace must pick "left",
    // the earlier-inserted predecessor.
    let tasks = vec![
        task("left", 0, 5, &[]),
        task("right", 0, 5, &[]),
        task("end", 0, 3, &["left", "right"]),
    ];
    let schedule = compute(&tasks);
    assert_eq!(schedule.critical_path(), ["left", "end"]);
}

#[test]
fn shortening_a_critical_task_shrinks_but_never_reorders_below_runner_up() {
    let chain = |b_end: i64| {
        vec![
            task("a", 0, 5, &[]),
            task("b", 0, b_end, &["a"]),
            task("solo", 0, 10, &[]),
        ]
    };
    let before = compute(&chain(7));
    assert_eq!(before.critical_path_days(), 12);

    // One day off a critical task: total shrinks by one and still beats
    // the 10-day runner-up.
    let after = compute(&chain(6));
    assert_eq!(after.critical_path(), ["a", "b"]);
    assert_eq!(after.critical_path_days(), 11);
    assert!(after.critical_path_days() >= 10);
}

#[test]
fn path_is_reported_in_chain_order() {
    let tasks = vec![
        task("ship", 0, 2, &["test"]),
        task("test", 0, 3, &["build"]),
        task("build", 0, 4, &["plan"]),
        task("plan", 0, 1, &[]),
    ];
    let schedule = compute(&tasks);
    assert_eq!(schedule.critical_path(), ["plan", "build", "test", "ship"]);
}
