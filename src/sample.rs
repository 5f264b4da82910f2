use crate::calendar;
use crate::metadata::{ProjectMetadata, ProjectStatus};
use crate::milestone::Milestone;
use crate::project::Project;
use crate::resource::Resource;
use crate::task::{Priority, Status, Task};
use chrono::NaiveDate;

/// A ready-made demo project: six tasks across a plan/design/build/test/
/// ship dependency chain, six resources, and four milestones, all dated
/// relative to `anchor`. The anchor snaps forward to a business day so
/// the demo never starts on a weekend.
pub fn sample_project(anchor: NaiveDate) -> Project {
    let day0 = if calendar::is_business_day(anchor) {
        anchor
    } else {
        calendar::next_business_day(anchor)
    };
    let day = |offset: i64| calendar::add_days(day0, offset);

    let metadata = ProjectMetadata {
        name: "Website Redesign".to_string(),
        description: "Sample project for demos and tests".to_string(),
        start_date: day0,
        end_date: day(35),
        status: ProjectStatus::Active,
    };

    let mut tasks = Vec::new();
    tasks.push(sample_task(
        "task-1",
        "Project Planning & Requirements",
        day(0),
        day(5),
        80,
        Priority::High,
        Status::InProgress,
        &[],
        "resource-1",
        "#3b82f6",
    ));
    tasks.push(sample_task(
        "task-2",
        "UI/UX Design",
        day(3),
        day(10),
        60,
        Priority::High,
        Status::InProgress,
        &["task-1"],
        "resource-2",
        "#10b981",
    ));
    tasks.push(sample_task(
        "task-3",
        "Frontend Development",
        day(8),
        day(20),
        30,
        Priority::Medium,
        Status::InProgress,
        &["task-2"],
        "resource-3",
        "#f59e0b",
    ));
    tasks.push(sample_task(
        "task-4",
        "Backend Development",
        day(10),
        day(25),
        20,
        Priority::Medium,
        Status::NotStarted,
        &["task-1"],
        "resource-4",
        "#8b5cf6",
    ));
    tasks.push(sample_task(
        "task-5",
        "Testing & QA",
        day(22),
        day(30),
        0,
        Priority::High,
        Status::NotStarted,
        &["task-3", "task-4"],
        "resource-5",
        "#ef4444",
    ));
    tasks.push(sample_task(
        "task-6",
        "Deployment & Launch",
        day(28),
        day(35),
        0,
        Priority::Critical,
        Status::NotStarted,
        &["task-5"],
        "resource-6",
        "#06b6d4",
    ));

    let resources = vec![
        sample_resource("resource-1", "John Doe", "Project Manager", 100),
        sample_resource("resource-2", "Jane Smith", "UI/UX Designer", 80),
        sample_resource("resource-3", "Mike Johnson", "Frontend Developer", 100),
        sample_resource("resource-4", "Sarah Wilson", "Backend Developer", 90),
        sample_resource("resource-5", "Tom Brown", "QA Engineer", 100),
        sample_resource("resource-6", "Alex Davis", "DevOps Engineer", 75),
    ];

    let milestones = vec![
        sample_milestone("milestone-1", "Requirements Complete", day(5), &["task-1"]),
        sample_milestone("milestone-2", "Design Phase Complete", day(10), &["task-2"]),
        sample_milestone(
            "milestone-3",
            "Development Complete",
            day(25),
            &["task-3", "task-4"],
        ),
        sample_milestone("milestone-4", "Project Launch", day(35), &["task-6"]),
    ];

    Project::from_parts(metadata, tasks, resources, milestones)
        .expect("sample project data is internally consistent")
}

#[allow(clippy::too_many_arguments)]
fn sample_task(
    id: &str,
    name: &str,
    start: NaiveDate,
    end: NaiveDate,
    progress: u8,
    priority: Priority,
    status: Status,
    dependencies: &[&str],
    assignee: &str,
    color: &str,
) -> Task {
    let mut task = Task::new(id, name, start, end);
    task.progress = progress;
    task.priority = priority;
    task.status = status;
    task.dependencies = dependencies.iter().map(|s| s.to_string()).collect();
    task.assignee = Some(assignee.to_string());
    task.color = color.to_string();
    task
}

fn sample_resource(id: &str, name: &str, role: &str, availability: u8) -> Resource {
    let mut resource = Resource::new(id, name);
    resource.role = Some(role.to_string());
    resource.availability = availability;
    resource.email = Some(format!(
        "{}@example.com",
        name.to_lowercase().replace(' ', ".")
    ));
    resource
}

fn sample_milestone(id: &str, name: &str, date: NaiveDate, tasks: &[&str]) -> Milestone {
    let mut milestone = Milestone::new(id, name, date);
    milestone.tasks = tasks.iter().map(|s| s.to_string()).collect();
    milestone
}
