// src/store/mod.rs

//! In-memory project/task/dependency store.
//!
//! This is the data layer the scheduler reads from. It enforces the record
//! invariants at mutation time so the scheduler can assume valid input:
//! - tasks have a project or a parent, last at least one day, and inherit
//!   privacy and project from their parent ([`tasks`]);
//! - dependency edges stay inside one project, never close a cycle, are
//!   unique per `(task, depends_on, logic)` and carry a resolved group id
//!   ([`dependencies`]);
//! - parent completion is re-derived whenever a subtask changes.
//!
//! Iteration is deterministic: projects and tasks by ascending id, edges in
//! creation order.

pub mod dependencies;
pub mod tasks;

use std::collections::BTreeMap;

use crate::errors::{Result, TaskplanError};
use crate::model::{Dependency, DependencyId, Project, ProjectId, Task, TaskId, TaskNode};
use crate::schedule::ScheduleSource;

pub use dependencies::DependencyUpdate;

#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    projects: BTreeMap<ProjectId, Project>,
    tasks: BTreeMap<TaskId, Task>,
    dependencies: BTreeMap<DependencyId, Dependency>,
    next_dependency_id: DependencyId,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a project. Ids must be unique.
    pub fn insert_project(&mut self, project: Project) -> Result<()> {
        if self.projects.contains_key(&project.id) {
            return Err(TaskplanError::InvalidProject {
                project: project.id,
                reason: "duplicate project id".to_string(),
            });
        }
        self.projects.insert(project.id, project);
        Ok(())
    }

    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.get(&id)
    }

    pub fn projects(&self) -> impl Iterator<Item = &Project> {
        self.projects.values()
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(&id)
    }

    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    /// Tasks of one project (including subtasks), by ascending id.
    pub fn tasks_in_project(&self, project: ProjectId) -> impl Iterator<Item = &Task> {
        self.tasks
            .values()
            .filter(move |t| t.project == Some(project))
    }

    pub fn dependency(&self, id: DependencyId) -> Option<&Dependency> {
        self.dependencies.get(&id)
    }

    pub fn dependencies(&self) -> impl Iterator<Item = &Dependency> {
        self.dependencies.values()
    }

    /// Outbound edges of `task`, in creation order.
    pub fn dependencies_of(&self, task: TaskId) -> impl Iterator<Item = &Dependency> {
        self.dependencies
            .values()
            .filter(move |d| d.task == task)
    }

    fn task_or_err(&self, id: TaskId) -> Result<&Task> {
        self.tasks.get(&id).ok_or(TaskplanError::TaskNotFound(id))
    }
}

impl ScheduleSource for TaskStore {
    fn projects(&self) -> Vec<&Project> {
        self.projects.values().collect()
    }

    fn project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.get(&id)
    }

    fn project_tasks(&self, project: ProjectId) -> Result<Vec<TaskNode>> {
        if !self.projects.contains_key(&project) {
            return Err(TaskplanError::ProjectNotFound(project));
        }

        let nodes = self
            .tasks_in_project(project)
            .map(|task| TaskNode {
                id: task.id,
                title: task.title.clone(),
                duration_days: task.duration_days,
                owner: task.owner.clone(),
                edges: self.dependencies_of(task.id).map(Dependency::edge).collect(),
            })
            .collect();

        Ok(nodes)
    }
}
