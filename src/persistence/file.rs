use super::{PersistenceError, PersistenceResult, ProjectStore};
use crate::metadata::ProjectMetadata;
use crate::milestone::Milestone;
use crate::project::Project;
use crate::resource::Resource;
use crate::task::{Priority, Status, Task};
use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Wire form of a whole project. Dates serialize as ISO-8601 strings
/// (`chrono`'s default for `NaiveDate`); loading revalidates through
/// `Project::from_parts`.
#[derive(Serialize, Deserialize)]
struct ProjectSnapshot {
    metadata: ProjectMetadata,
    tasks: Vec<Task>,
    #[serde(default)]
    resources: Vec<Resource>,
    #[serde(default)]
    milestones: Vec<Milestone>,
}

impl ProjectSnapshot {
    fn from_project(project: &Project) -> Self {
        Self {
            metadata: project.metadata().clone(),
            tasks: project.tasks().to_vec(),
            resources: project.resources().to_vec(),
            milestones: project.milestones().to_vec(),
        }
    }

    fn into_project(self) -> PersistenceResult<Project> {
        Project::from_parts(self.metadata, self.tasks, self.resources, self.milestones)
            .map_err(PersistenceError::from)
    }
}

pub fn save_project_to_json<P: AsRef<Path>>(
    project: &Project,
    path: P,
) -> PersistenceResult<()> {
    let snapshot = ProjectSnapshot::from_project(project);
    let file = File::create(&path)?;
    serde_json::to_writer_pretty(file, &snapshot)?;
    debug!("saved project to {}", path.as_ref().display());
    Ok(())
}

pub fn load_project_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<Project> {
    let file = File::open(path)?;
    let snapshot: ProjectSnapshot = serde_json::from_reader(file)?;
    snapshot.into_project()
}

/// JSON-snapshot store backed by a single file. A missing file loads as
/// `None` rather than an error.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ProjectStore for JsonFileStore {
    fn save_project(&self, project: &Project) -> PersistenceResult<()> {
        save_project_to_json(project, &self.path)
    }

    fn load_project(&self) -> PersistenceResult<Option<Project>> {
        if !self.path.exists() {
            return Ok(None);
        }
        load_project_from_json(&self.path).map(Some)
    }
}

/// One CSV row per task, plus a leading `__metadata__` row that carries
/// the non-tabular parts (metadata, resources, milestones) as embedded
/// JSON.
#[derive(Default, Serialize, Deserialize)]
struct TaskCsvRecord {
    id: String,
    name: String,
    start: String,
    end: String,
    progress: u8,
    priority: String,
    status: String,
    dependencies: String,
    parent: String,
    assignee: String,
    color: String,
    description: String,
    milestone: String,
    #[serde(default)]
    metadata_json: String,
    #[serde(default)]
    resources_json: String,
    #[serde(default)]
    milestones_json: String,
}

impl From<&Task> for TaskCsvRecord {
    fn from(task: &Task) -> Self {
        let mut record = TaskCsvRecord::default();
        record.id = task.id.clone();
        record.name = task.name.clone();
        record.start = task.start.to_string();
        record.end = task.end.to_string();
        record.progress = task.progress;
        record.priority = task.priority.as_str().to_string();
        record.status = task.status.as_str().to_string();
        record.dependencies = join_ids(&task.dependencies);
        record.parent = task.parent.clone().unwrap_or_default();
        record.assignee = task.assignee.clone().unwrap_or_default();
        record.color = task.color.clone();
        record.description = task.description.clone().unwrap_or_default();
        record.milestone = task.milestone.clone().unwrap_or_default();
        record
    }
}

impl TaskCsvRecord {
    fn metadata_row(project: &Project) -> PersistenceResult<Self> {
        let mut record = TaskCsvRecord::default();
        record.name = "__metadata__".to_string();
        record.metadata_json = serde_json::to_string(project.metadata())?;
        record.resources_json = serde_json::to_string(project.resources())?;
        record.milestones_json = serde_json::to_string(project.milestones())?;
        Ok(record)
    }

    fn is_metadata_row(&self) -> bool {
        !self.metadata_json.trim().is_empty()
    }

    fn into_task(self) -> PersistenceResult<Task> {
        let start = parse_date(&self.start)?;
        let end = parse_date(&self.end)?;
        let mut task = Task::new(self.id, self.name, start, end);
        task.progress = self.progress;
        task.priority = Priority::from_str(self.priority.trim()).ok_or_else(|| {
            PersistenceError::InvalidData(format!("invalid priority '{}'", self.priority))
        })?;
        task.status = Status::from_str(self.status.trim()).ok_or_else(|| {
            PersistenceError::InvalidData(format!("invalid status '{}'", self.status))
        })?;
        task.dependencies = split_ids(&self.dependencies);
        task.parent = opt_string(self.parent);
        task.assignee = opt_string(self.assignee);
        task.color = self.color;
        task.description = opt_string(self.description);
        task.milestone = opt_string(self.milestone);
        Ok(task)
    }
}

pub fn save_project_to_csv<P: AsRef<Path>>(project: &Project, path: P) -> PersistenceResult<()> {
    let mut writer = csv::Writer::from_path(&path)?;
    writer.serialize(TaskCsvRecord::metadata_row(project)?)?;
    for task in project.tasks() {
        writer.serialize(TaskCsvRecord::from(task))?;
    }
    writer.flush()?;
    debug!("saved project to {}", path.as_ref().display());
    Ok(())
}

pub fn load_project_from_csv<P: AsRef<Path>>(path: P) -> PersistenceResult<Project> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut metadata: Option<ProjectMetadata> = None;
    let mut resources: Vec<Resource> = Vec::new();
    let mut milestones: Vec<Milestone> = Vec::new();
    let mut tasks: Vec<Task> = Vec::new();

    for record in reader.deserialize::<TaskCsvRecord>() {
        let record = record?;
        if record.is_metadata_row() {
            metadata = Some(serde_json::from_str(&record.metadata_json)?);
            if !record.resources_json.trim().is_empty() {
                resources = serde_json::from_str(&record.resources_json)?;
            }
            if !record.milestones_json.trim().is_empty() {
                milestones = serde_json::from_str(&record.milestones_json)?;
            }
        } else {
            tasks.push(record.into_task()?);
        }
    }

    let metadata = metadata
        .ok_or_else(|| PersistenceError::InvalidData("missing __metadata__ row".to_string()))?;
    Project::from_parts(metadata, tasks, resources, milestones).map_err(PersistenceError::from)
}

fn parse_date(value: &str) -> PersistenceResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|err| PersistenceError::InvalidData(format!("invalid date '{value}': {err}")))
}

fn join_ids(values: &[String]) -> String {
    values.join(";")
}

fn split_ids(value: &str) -> Vec<String> {
    value
        .split(';')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

fn opt_string(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
