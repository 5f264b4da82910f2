use chrono::NaiveDate;
use timeline_engine::{DependencyGraph, Schedule, Task};

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
}

fn day(offset: i64) -> NaiveDate {
    base() + chrono::Duration::days(offset)
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
fn dependencies_push_starts_forward_with_fixed_durations() {
    // A 0-5, B 3-10 after A, C 8-20 after B. Pushes cascade: B cannot
    // start before day 5 and keeps its 7-day duration, C cannot start
    // before B's pushed finish on day 12 and keeps its 12-day duration.
    let tasks = vec![
        task("a", 0, 5, &[]),
        task("b", 3, 10, &["a"]),
        task("c", 8, 20, &["b"]),
    ];
    let schedule = compute(&tasks);

    let a = schedule.get("a").unwrap();
    assert_eq!((a.early_start, a.early_end), (day(0), day(5)));

    let b = schedule.get("b").unwrap();
    assert_eq!((b.early_start, b.early_end), (day(5), day(12)));

    let c = schedule.get("c").unwrap();
    assert_eq!((c.early_start, c.early_end), (day(12), day(24)));

    assert_eq!(schedule.critical_path(), ["a", "b", "c"]);
    assert_eq!(schedule.critical_path_days(), 24);
    assert_eq!(schedule.project_finish(), Some(day(24)));
}

#[test]
fn authored_start_is_never_pulled_earlier() {
    // B's authored start is already past A's finish; the slack stays.
    let tasks = vec![task("a", 0, 5, &[]), task("b", 10, 12, &["a"])];
    let schedule = compute(&tasks);
    let b = schedule.get("b").unwrap();
    assert_eq!((b.early_start, b.early_end), (day(10), day(12)));
}

#[test]
fn diamond_join_waits_for_the_slowest_branch() {
    let tasks = vec![
        task("t1", 0, 2, &[]),
        task("t2", 0, 3, &["t1"]),
        task("t3", 0, 1, &["t1"]),
        task("t4", 0, 2, &["t2", "t3"]),
    ];
    let schedule = compute(&tasks);

    assert_eq!(schedule.get("t1").unwrap().early_end, day(2));
    assert_eq!(schedule.get("t2").unwrap().early_start, day(2));
    assert_eq!(schedule.get("t2").unwrap().early_end, day(5));
    assert_eq!(schedule.get("t3").unwrap().early_start, day(2));
    assert_eq!(schedule.get("t3").unwrap().early_end, day(3));
    assert_eq!(schedule.get("t4").unwrap().early_start, day(5));
    assert_eq!(schedule.get("t4").unwrap().early_end, day(7));
}

#[test]
fn backward_pass_floats_the_short_branch() {
    let tasks = vec![
        task("t1", 0, 2, &[]),
        task("t2", 0, 3, &["t1"]),
        task("t3", 0, 1, &["t1"]),
        task("t4", 0, 2, &["t2", "t3"]),
    ];
    let schedule = compute(&tasks);

    assert_eq!(schedule.get("t1").unwrap().total_float_days, 0);
    assert_eq!(schedule.get("t2").unwrap().total_float_days, 0);
    assert_eq!(schedule.get("t4").unwrap().total_float_days, 0);

    // The 1-day branch can slip 2 days before it delays the join.
    let t3 = schedule.get("t3").unwrap();
    assert_eq!(t3.total_float_days, 2);
    assert_eq!(t3.late_start, day(4));
    assert_eq!(t3.late_end, day(5));
    assert!(!t3.is_critical);
}

#[test]
fn zero_duration_task_schedules_as_a_point() {
    let tasks = vec![task("a", 0, 4, &[]), task("gate", 0, 0, &["a"])];
    let schedule = compute(&tasks);
    let gate = schedule.get("gate").unwrap();
    assert_eq!(gate.early_start, day(4));
    assert_eq!(gate.early_end, day(4));
}

#[test]
fn empty_input_gives_empty_schedule() {
    let schedule = compute(&[]);
    assert!(schedule.is_empty());
    assert_eq!(schedule.iter().count(), 0);
    assert_eq!(schedule.project_finish(), None);
    assert!(schedule.critical_path().is_empty());
}
