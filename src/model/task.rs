// src/model/task.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::model::{AssigneeId, DependencyEdge, ProjectId, TaskId};

/// A project: a titled, owned collection of tasks with a start date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Project {
    pub id: ProjectId,
    pub owner: Option<AssigneeId>,
    pub title: String,
    /// `None` means "start today"; see [`Project::effective_start`].
    pub start_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Project {
    pub fn new(id: ProjectId, title: impl Into<String>) -> Self {
        Self {
            id,
            owner: None,
            title: title.into(),
            start_date: None,
            created_at: Utc::now(),
        }
    }

    /// Date scheduling starts from for this project.
    pub fn effective_start(&self, today: NaiveDate) -> NaiveDate {
        self.start_date.unwrap_or(today)
    }
}

/// A unit of work, optionally nested under a parent task.
///
/// A task belongs to a project, a parent task, or both. Completion is either
/// set explicitly or, for tasks with subtasks, derived from the subtasks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    pub id: TaskId,
    pub project: Option<ProjectId>,
    pub parent: Option<TaskId>,
    pub owner: Option<AssigneeId>,
    pub title: String,
    /// Whole days, always >= 1.
    pub duration_days: u32,
    pub completed: bool,
    pub started: bool,
    pub private: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn new(id: TaskId, title: impl Into<String>) -> Self {
        Self {
            id,
            project: None,
            parent: None,
            owner: None,
            title: title.into(),
            duration_days: 1,
            completed: false,
            started: false,
            private: false,
            completed_at: None,
            created_at: Utc::now(),
        }
    }

    /// `true` once the task has been started but not yet completed.
    pub fn in_progress(&self) -> bool {
        self.started && !self.completed
    }
}

/// What the scheduler sees of a task: identity, effort, assignee and its
/// outbound dependency edges.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskNode {
    pub id: TaskId,
    pub title: String,
    pub duration_days: u32,
    pub owner: Option<AssigneeId>,
    pub edges: Vec<DependencyEdge>,
}

impl TaskNode {
    pub fn new(id: TaskId, title: impl Into<String>, duration_days: u32) -> Self {
        Self {
            id,
            title: title.into(),
            duration_days,
            owner: None,
            edges: Vec::new(),
        }
    }
}
