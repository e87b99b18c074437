#![allow(dead_code)]

use taskplan::model::{Project, ProjectId, Task, TaskId, TaskNode};
use taskplan::schedule::ScheduleSource;
use taskplan::store::TaskStore;
use taskplan::types::{Condition, Logic};

use crate::date;

/// Builder for a populated `TaskStore` to simplify test setup.
///
/// Every step goes through the store's validating API and panics on error,
/// so a broken fixture fails loudly.
pub struct StoreBuilder {
    store: TaskStore,
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self {
            store: TaskStore::new(),
        }
    }

    /// Add a project starting on `start` (`YYYY-MM-DD`).
    pub fn project(mut self, id: ProjectId, title: &str, start: &str) -> Self {
        let mut project = Project::new(id, title);
        project.start_date = Some(date(start));
        self.store
            .insert_project(project)
            .expect("Failed to insert project");
        self
    }

    /// Add a project without a start date (starts "today").
    pub fn project_without_start(mut self, id: ProjectId, title: &str) -> Self {
        self.store
            .insert_project(Project::new(id, title))
            .expect("Failed to insert project");
        self
    }

    pub fn task(mut self, task: TaskBuilder) -> Self {
        self.store
            .insert_task(task.build())
            .expect("Failed to insert task");
        self
    }

    /// `task` depends on `depends_on` with condition `completed`.
    pub fn depends(self, task: TaskId, depends_on: TaskId, logic: Logic) -> Self {
        self.depends_with(task, depends_on, Condition::Completed, logic)
    }

    pub fn depends_with(
        mut self,
        task: TaskId,
        depends_on: TaskId,
        condition: Condition,
        logic: Logic,
    ) -> Self {
        self.store
            .add_dependency(task, depends_on, condition, logic)
            .expect("Failed to add dependency");
        self
    }

    pub fn build(self) -> TaskStore {
        self.store
    }
}

impl Default for StoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `Task`.
pub struct TaskBuilder {
    task: Task,
}

impl TaskBuilder {
    /// A one-day, unassigned task `T<id>` in `project`.
    pub fn new(id: TaskId, project: ProjectId) -> Self {
        let mut task = Task::new(id, format!("T{id}"));
        task.project = Some(project);
        Self { task }
    }

    /// A subtask of `parent`; the project is inherited on insert.
    pub fn subtask(id: TaskId, parent: TaskId) -> Self {
        let mut task = Task::new(id, format!("T{id}"));
        task.parent = Some(parent);
        Self { task }
    }

    pub fn parent(mut self, parent: TaskId) -> Self {
        self.task.parent = Some(parent);
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.task.title = title.to_string();
        self
    }

    pub fn owner(mut self, owner: &str) -> Self {
        self.task.owner = Some(owner.to_string());
        self
    }

    pub fn days(mut self, days: u32) -> Self {
        self.task.duration_days = days;
        self
    }

    pub fn completed(mut self, val: bool) -> Self {
        self.task.completed = val;
        self
    }

    pub fn started(mut self, val: bool) -> Self {
        self.task.started = val;
        self
    }

    pub fn private(mut self, val: bool) -> Self {
        self.task.private = val;
        self
    }

    pub fn build(self) -> Task {
        self.task
    }
}

/// Builder for a bare `TaskNode`, for driving the scheduler without a store.
pub struct NodeBuilder {
    node: TaskNode,
}

impl NodeBuilder {
    pub fn new(id: TaskId, days: u32) -> Self {
        Self {
            node: TaskNode::new(id, format!("T{id}"), days),
        }
    }

    pub fn owner(mut self, owner: &str) -> Self {
        self.node.owner = Some(owner.to_string());
        self
    }

    /// Add an AND / `completed` edge to `depends_on`.
    pub fn after(mut self, depends_on: TaskId) -> Self {
        self.node.edges.push(taskplan::model::DependencyEdge {
            depends_on,
            condition: Condition::Completed,
            logic: Logic::And,
            group: taskplan::model::GroupId::new(),
        });
        self
    }

    pub fn build(self) -> TaskNode {
        self.node
    }
}

/// A bare `ScheduleSource` over hand-built projects and nodes.
///
/// Unlike `TaskStore` it performs no validation, so tests can feed the
/// scheduler graphs the store would refuse (cycles, foreign edges).
#[derive(Debug, Default)]
pub struct MemorySource {
    projects: Vec<Project>,
    tasks: std::collections::BTreeMap<ProjectId, Vec<TaskNode>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_project(mut self, project: Project, nodes: Vec<TaskNode>) -> Self {
        self.tasks.insert(project.id, nodes);
        self.projects.push(project);
        self
    }
}

impl ScheduleSource for MemorySource {
    fn projects(&self) -> Vec<&Project> {
        self.projects.iter().collect()
    }

    fn project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    fn project_tasks(&self, project: ProjectId) -> taskplan::errors::Result<Vec<TaskNode>> {
        self.tasks
            .get(&project)
            .cloned()
            .ok_or(taskplan::errors::TaskplanError::ProjectNotFound(project))
    }
}

/// A project starting on `start` (`YYYY-MM-DD`).
pub fn project_starting(id: ProjectId, title: &str, start: &str) -> Project {
    let mut project = Project::new(id, title);
    project.start_date = Some(date(start));
    project
}
