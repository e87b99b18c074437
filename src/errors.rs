// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

use crate::model::{DependencyId, ProjectId, TaskId};

#[derive(Error, Debug)]
pub enum TaskplanError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A dependency cycle; `task` is the node that was revisited on the
    /// current DFS path and `cycle` is the path that closes back onto it.
    #[error("Circular dependency detected involving task {task} (cycle: {})", format_path(.cycle))]
    CyclicDependency { task: TaskId, cycle: Vec<TaskId> },

    #[error("Invalid project {project}: {reason}")]
    InvalidProject { project: ProjectId, reason: String },

    #[error("Invalid task {task}: {reason}")]
    InvalidTask { task: TaskId, reason: String },

    #[error("Project not found: {0}")]
    ProjectNotFound(ProjectId),

    #[error("Task not found: {0}")]
    TaskNotFound(TaskId),

    #[error("Dependency not found: {0}")]
    DependencyNotFound(DependencyId),

    #[error("Invalid dependency {task} -> {depends_on}: {reason}")]
    InvalidDependency {
        task: TaskId,
        depends_on: TaskId,
        reason: String,
    },

    #[error("Cannot mark task {task} complete: {reason}")]
    CompletionBlocked { task: TaskId, reason: String },

    /// The ready queue drained while tasks were still waiting on
    /// prerequisites. Unreachable for an acyclic graph.
    #[error("Scheduler stalled in project {project}; unscheduled tasks: {}", format_path(.pending))]
    SchedulerStalled {
        project: ProjectId,
        pending: Vec<TaskId>,
    },

    #[error("Date overflow while scheduling task {task}")]
    DateOverflow { task: TaskId },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn format_path(ids: &[TaskId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, TaskplanError>;
