use crate::graph::{DependencyGraph, GraphError};
use crate::layout::{self, LayoutConfig, TimelineLayout};
use crate::metadata::ProjectMetadata;
use crate::milestone::Milestone;
use crate::resource::Resource;
use crate::schedule::Schedule;
use crate::task::Task;
use crate::task_validation::{self, ValidationError};
use crate::workload::{self, ResourceUtilization};
use chrono::NaiveDate;
use log::debug;
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub enum ProjectError {
    Validation(ValidationError),
    Graph(GraphError),
    UnknownTask(String),
    UnknownResource(String),
    UnknownMilestone(String),
    MetadataRange { start: NaiveDate, end: NaiveDate },
}

impl fmt::Display for ProjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectError::Validation(err) => write!(f, "{err}"),
            ProjectError::Graph(err) => write!(f, "{err}"),
            ProjectError::UnknownTask(id) => write!(f, "no task with id '{id}'"),
            ProjectError::UnknownResource(id) => write!(f, "no resource with id '{id}'"),
            ProjectError::UnknownMilestone(id) => write!(f, "no milestone with id '{id}'"),
            ProjectError::MetadataRange { start, end } => write!(
                f,
                "project end date {end} must be on or after start date {start}"
            ),
        }
    }
}

impl std::error::Error for ProjectError {}

impl From<ValidationError> for ProjectError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<GraphError> for ProjectError {
    fn from(value: GraphError) -> Self {
        Self::Graph(value)
    }
}

/// The project aggregate: insertion-ordered task, resource, and milestone
/// collections behind a validating mutation API. Every mutation validates
/// a candidate state and commits only on success, so a rejected call
/// leaves the previous state untouched. Derived views (`schedule`,
/// `layout`, `workload`) are pure reads over the current snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    metadata: ProjectMetadata,
    tasks: Vec<Task>,
    resources: Vec<Resource>,
    milestones: Vec<Milestone>,
}

impl Project {
    pub fn new(metadata: ProjectMetadata) -> Result<Self, ProjectError> {
        Self::from_parts(metadata, Vec::new(), Vec::new(), Vec::new())
    }

    /// Builds a project from complete collections, validating everything
    /// (record invariants, duplicate ids, subtask forest, cross
    /// references, dependency graph) before the value exists.
    pub fn from_parts(
        metadata: ProjectMetadata,
        tasks: Vec<Task>,
        resources: Vec<Resource>,
        milestones: Vec<Milestone>,
    ) -> Result<Self, ProjectError> {
        Self::validate_metadata(&metadata)?;
        Self::validate_state(&tasks, &resources, &milestones)?;
        Ok(Self {
            metadata,
            tasks,
            resources,
            milestones,
        })
    }

    fn validate_metadata(metadata: &ProjectMetadata) -> Result<(), ProjectError> {
        if metadata.end_date < metadata.start_date {
            return Err(ProjectError::MetadataRange {
                start: metadata.start_date,
                end: metadata.end_date,
            });
        }
        Ok(())
    }

    fn validate_state(
        tasks: &[Task],
        resources: &[Resource],
        milestones: &[Milestone],
    ) -> Result<(), ProjectError> {
        task_validation::validate_task_collection(tasks)?;
        task_validation::validate_resource_collection(resources)?;
        task_validation::validate_milestone_collection(milestones)?;
        task_validation::validate_references(tasks, resources, milestones)?;
        DependencyGraph::build(tasks)?;
        Ok(())
    }

    pub fn metadata(&self) -> &ProjectMetadata {
        &self.metadata
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn milestones(&self) -> &[Milestone] {
        &self.milestones
    }

    pub fn find_task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    pub fn find_resource(&self, resource_id: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.id == resource_id)
    }

    pub fn find_milestone(&self, milestone_id: &str) -> Option<&Milestone> {
        self.milestones.iter().find(|m| m.id == milestone_id)
    }

    /// Subtasks of `task_id`, derived from the stored parent pointers.
    pub fn children_of(&self, task_id: &str) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| t.parent.as_deref() == Some(task_id))
            .collect()
    }

    pub fn set_metadata(&mut self, metadata: ProjectMetadata) -> Result<(), ProjectError> {
        Self::validate_metadata(&metadata)?;
        self.metadata = metadata;
        Ok(())
    }

    /// Adds a task, assigning a fresh id when the incoming one is empty.
    /// Returns the id under which the task was stored.
    pub fn add_task(&mut self, mut task: Task) -> Result<String, ProjectError> {
        if task.id.trim().is_empty() {
            task.id = Uuid::new_v4().to_string();
        }
        let id = task.id.clone();
        let mut candidate = self.tasks.clone();
        candidate.push(task);
        self.commit_tasks(candidate)?;
        debug!("added task '{id}'");
        Ok(id)
    }

    /// Full-record replacement of the task with the same id.
    pub fn update_task(&mut self, task: Task) -> Result<(), ProjectError> {
        let Some(pos) = self.tasks.iter().position(|t| t.id == task.id) else {
            return Err(ProjectError::UnknownTask(task.id));
        };
        let id = task.id.clone();
        let mut candidate = self.tasks.clone();
        candidate[pos] = task;
        self.commit_tasks(candidate)?;
        debug!("updated task '{id}'");
        Ok(())
    }

    /// Removes a task and scrubs references to it: dependency lists,
    /// parent pointers, and milestone associations. Returns whether
    /// anything was removed.
    pub fn delete_task(&mut self, task_id: &str) -> Result<bool, ProjectError> {
        if self.find_task(task_id).is_none() {
            return Ok(false);
        }
        let mut tasks: Vec<Task> = self
            .tasks
            .iter()
            .filter(|t| t.id != task_id)
            .cloned()
            .collect();
        for task in &mut tasks {
            task.dependencies.retain(|dep| dep != task_id);
            if task.parent.as_deref() == Some(task_id) {
                task.parent = None;
            }
        }
        let mut milestones = self.milestones.clone();
        for milestone in &mut milestones {
            milestone.tasks.retain(|id| id != task_id);
        }

        Self::validate_state(&tasks, &self.resources, &milestones)?;
        self.tasks = tasks;
        self.milestones = milestones;
        debug!("deleted task '{task_id}'");
        Ok(true)
    }

    pub fn add_resource(&mut self, mut resource: Resource) -> Result<String, ProjectError> {
        if resource.id.trim().is_empty() {
            resource.id = Uuid::new_v4().to_string();
        }
        let id = resource.id.clone();
        let mut candidate = self.resources.clone();
        candidate.push(resource);
        self.commit_resources(candidate)?;
        debug!("added resource '{id}'");
        Ok(id)
    }

    pub fn update_resource(&mut self, resource: Resource) -> Result<(), ProjectError> {
        let Some(pos) = self.resources.iter().position(|r| r.id == resource.id) else {
            return Err(ProjectError::UnknownResource(resource.id));
        };
        let mut candidate = self.resources.clone();
        candidate[pos] = resource;
        self.commit_resources(candidate)
    }

    /// Removes a resource and clears any assignments pointing at it.
    pub fn delete_resource(&mut self, resource_id: &str) -> Result<bool, ProjectError> {
        if self.find_resource(resource_id).is_none() {
            return Ok(false);
        }
        let resources: Vec<Resource> = self
            .resources
            .iter()
            .filter(|r| r.id != resource_id)
            .cloned()
            .collect();
        let mut tasks = self.tasks.clone();
        for task in &mut tasks {
            if task.assignee.as_deref() == Some(resource_id) {
                task.assignee = None;
            }
        }

        Self::validate_state(&tasks, &resources, &self.milestones)?;
        self.tasks = tasks;
        self.resources = resources;
        debug!("deleted resource '{resource_id}'");
        Ok(true)
    }

    pub fn add_milestone(&mut self, mut milestone: Milestone) -> Result<String, ProjectError> {
        if milestone.id.trim().is_empty() {
            milestone.id = Uuid::new_v4().to_string();
        }
        let id = milestone.id.clone();
        let mut candidate = self.milestones.clone();
        candidate.push(milestone);
        self.commit_milestones(candidate)?;
        debug!("added milestone '{id}'");
        Ok(id)
    }

    pub fn update_milestone(&mut self, milestone: Milestone) -> Result<(), ProjectError> {
        let Some(pos) = self.milestones.iter().position(|m| m.id == milestone.id) else {
            return Err(ProjectError::UnknownMilestone(milestone.id));
        };
        let mut candidate = self.milestones.clone();
        candidate[pos] = milestone;
        self.commit_milestones(candidate)
    }

    /// Removes a milestone and clears task references to it.
    pub fn delete_milestone(&mut self, milestone_id: &str) -> Result<bool, ProjectError> {
        if self.find_milestone(milestone_id).is_none() {
            return Ok(false);
        }
        let milestones: Vec<Milestone> = self
            .milestones
            .iter()
            .filter(|m| m.id != milestone_id)
            .cloned()
            .collect();
        let mut tasks = self.tasks.clone();
        for task in &mut tasks {
            if task.milestone.as_deref() == Some(milestone_id) {
                task.milestone = None;
            }
        }

        Self::validate_state(&tasks, &self.resources, &milestones)?;
        self.tasks = tasks;
        self.milestones = milestones;
        debug!("deleted milestone '{milestone_id}'");
        Ok(true)
    }

    /// Computes the schedule for the current snapshot.
    pub fn schedule(&self) -> Result<Schedule, ProjectError> {
        let graph = DependencyGraph::build(&self.tasks)?;
        Ok(Schedule::compute(&graph, &self.tasks))
    }

    /// Schedules the current snapshot and maps it onto timeline geometry.
    pub fn layout(&self, config: &LayoutConfig) -> Result<TimelineLayout, ProjectError> {
        let schedule = self.schedule()?;
        layout::layout(&schedule, &self.tasks, &self.milestones, config).map_err(Into::into)
    }

    /// Per-resource utilization over a query range.
    pub fn workload(
        &self,
        range_start: NaiveDate,
        range_end: NaiveDate,
    ) -> Result<HashMap<String, ResourceUtilization>, ProjectError> {
        workload::aggregate(&self.tasks, &self.resources, range_start, range_end)
            .map_err(Into::into)
    }

    fn commit_tasks(&mut self, tasks: Vec<Task>) -> Result<(), ProjectError> {
        Self::validate_state(&tasks, &self.resources, &self.milestones)?;
        self.tasks = tasks;
        Ok(())
    }

    fn commit_resources(&mut self, resources: Vec<Resource>) -> Result<(), ProjectError> {
        Self::validate_state(&self.tasks, &resources, &self.milestones)?;
        self.resources = resources;
        Ok(())
    }

    fn commit_milestones(&mut self, milestones: Vec<Milestone>) -> Result<(), ProjectError> {
        Self::validate_state(&self.tasks, &self.resources, &milestones)?;
        self.milestones = milestones;
        Ok(())
    }
}
