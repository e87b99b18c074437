// src/store/tasks.rs

//! Task insertion and completion rules.

use chrono::Utc;
use tracing::{debug, info};

use crate::dag::groups::{TargetState, all_groups_satisfied};
use crate::errors::{Result, TaskplanError};
use crate::model::{Dependency, Task, TaskId};
use crate::store::TaskStore;

impl TaskStore {
    /// Add a task, normalising it against its parent.
    ///
    /// - `duration_days` must be at least 1.
    /// - The task needs a project, a parent, or both; a parent must already
    ///   exist and a subtask inherits its parent's project.
    /// - A subtask of a private parent is private.
    /// - `completed_at` is set/cleared to match `completed`.
    ///
    /// Adding a subtask re-derives completion up the parent chain.
    pub fn insert_task(&mut self, mut task: Task) -> Result<()> {
        let invalid = |reason: &str| TaskplanError::InvalidTask {
            task: task.id,
            reason: reason.to_string(),
        };

        if self.tasks.contains_key(&task.id) {
            return Err(invalid("duplicate task id"));
        }
        if task.duration_days < 1 {
            return Err(invalid("duration must be at least one day"));
        }

        match task.parent {
            Some(parent_id) => {
                if parent_id == task.id {
                    return Err(invalid("task cannot be its own parent"));
                }
                let parent = self.tasks.get(&parent_id).ok_or_else(|| {
                    invalid(&format!("parent task {parent_id} does not exist"))
                })?;

                match (task.project, parent.project) {
                    (Some(own), Some(inherited)) if own != inherited => {
                        return Err(invalid(
                            "subtasks must belong to the same project as their parent",
                        ));
                    }
                    (None, inherited) => task.project = inherited,
                    _ => {}
                }

                if parent.private {
                    task.private = true;
                }
            }
            None => {
                if task.project.is_none() {
                    return Err(invalid("task must belong to a project or a parent task"));
                }
            }
        }

        if let Some(project) = task.project {
            if !self.projects.contains_key(&project) {
                return Err(TaskplanError::ProjectNotFound(project));
            }
        }

        if task.completed {
            task.completed_at.get_or_insert_with(Utc::now);
        } else {
            task.completed_at = None;
        }

        let parent = task.parent;
        debug!(task = task.id, project = ?task.project, ?parent, "inserted task");
        self.tasks.insert(task.id, task);

        if let Some(parent) = parent {
            self.rederive_completion(parent);
        }
        Ok(())
    }

    /// Direct subtasks of `task`, by ascending id.
    pub fn subtasks_of(&self, task: TaskId) -> Vec<&Task> {
        self.tasks
            .values()
            .filter(|t| t.parent == Some(task))
            .collect()
    }

    /// All subtasks of `task` at every depth, parents before their children.
    pub fn all_subtasks(&self, task: TaskId) -> Vec<&Task> {
        let mut out = Vec::new();
        let mut stack: Vec<&Task> = self.subtasks_of(task);
        stack.reverse();

        while let Some(current) = stack.pop() {
            out.push(current);
            let mut children = self.subtasks_of(current.id);
            children.reverse();
            stack.extend(children);
        }

        out
    }

    /// Whether `task` may be marked complete: all subtasks are complete and
    /// every dependency group is satisfied.
    pub fn can_mark_complete(&self, task: TaskId) -> Result<bool> {
        self.task_or_err(task)?;
        Ok(self.completion_blocker(task).is_none())
    }

    fn completion_blocker(&self, task: TaskId) -> Option<&'static str> {
        if self.subtasks_of(task).iter().any(|t| !t.completed) {
            return Some("task has incomplete subtasks");
        }

        let edges: Vec<_> = self.dependencies_of(task).map(Dependency::edge).collect();
        let lookup = |id: TaskId| {
            self.tasks.get(&id).map(|t| TargetState {
                completed: t.completed,
                started: t.started,
            })
        };
        if !all_groups_satisfied(&edges, lookup) {
            return Some("dependency groups are not satisfied");
        }

        None
    }

    /// Set a task's completion flag.
    ///
    /// Completing a task requires [`TaskStore::can_mark_complete`]. After the
    /// change, every ancestor with subtasks is re-derived: complete iff all
    /// of its subtasks are complete.
    pub fn set_completed(&mut self, task: TaskId, completed: bool) -> Result<()> {
        let current = self.task_or_err(task)?;
        if current.completed == completed {
            return Ok(());
        }

        if completed {
            if let Some(reason) = self.completion_blocker(task) {
                return Err(TaskplanError::CompletionBlocked {
                    task,
                    reason: reason.to_string(),
                });
            }
        }

        let parent = match self.tasks.get_mut(&task) {
            Some(t) => {
                apply_completion(t, completed);
                t.parent
            }
            None => return Err(TaskplanError::TaskNotFound(task)),
        };
        info!(task, completed, "task completion changed");

        if let Some(parent) = parent {
            self.rederive_completion(parent);
        }
        Ok(())
    }

    /// Mark a task as started (it counts as in progress until completed).
    pub fn mark_started(&mut self, task: TaskId) -> Result<()> {
        let t = self
            .tasks
            .get_mut(&task)
            .ok_or(TaskplanError::TaskNotFound(task))?;
        t.started = true;
        Ok(())
    }

    /// Walk up from `start`, re-deriving completion from subtasks. Stops at
    /// the first ancestor whose derived state did not change.
    fn rederive_completion(&mut self, start: TaskId) {
        let mut next = Some(start);

        while let Some(id) = next {
            let subtasks = self.subtasks_of(id);
            if subtasks.is_empty() {
                break;
            }
            let all_complete = subtasks.iter().all(|t| t.completed);

            let Some(task) = self.tasks.get_mut(&id) else {
                break;
            };
            if task.completed == all_complete {
                break;
            }

            apply_completion(task, all_complete);
            debug!(task = id, completed = all_complete, "derived completion from subtasks");
            next = task.parent;
        }
    }
}

fn apply_completion(task: &mut Task, completed: bool) {
    task.completed = completed;
    task.completed_at = if completed { Some(Utc::now()) } else { None };
}
