pub mod calculations;
pub mod calendar;
pub mod graph;
pub mod layout;
pub mod metadata;
pub mod milestone;
pub mod persistence;
pub mod project;
pub mod resource;
pub mod sample;
pub mod schedule;
pub mod task;
pub mod task_validation;
pub mod workload;

pub use graph::{DependencyGraph, GraphError};
pub use layout::{
    CalendarBand, GridLine, LayoutConfig, MIN_BAR_WIDTH, MilestoneMarker, TaskBar,
    TimelineLayout, layout,
};
pub use metadata::{ProjectMetadata, ProjectStatus};
pub use milestone::Milestone;
pub use persistence::{
    JsonFileStore, PersistenceError, ProjectStore, load_project_from_csv,
    load_project_from_json, save_project_to_csv, save_project_to_json,
};
pub use project::{Project, ProjectError};
pub use resource::Resource;
pub use sample::sample_project;
pub use schedule::{Schedule, ScheduledTask};
pub use task::{Priority, Status, Task};
pub use task_validation::ValidationError;
pub use workload::{ResourceUtilization, aggregate};
