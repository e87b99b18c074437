// src/store/dependencies.rs

//! Dependency edge CRUD.
//!
//! Every mutation that creates an edge or changes its logic goes through
//! [`resolve_group`], so all edges of a task with the same logic share one
//! group id. Removing an edge only removes that edge; a group disappears
//! together with its last edge.

use petgraph::algo::astar;
use petgraph::graphmap::DiGraphMap;
use tracing::{debug, info};

use crate::dag::groups::{DependencyGroup, group_edges, resolve_group};
use crate::errors::{Result, TaskplanError};
use crate::model::{Dependency, DependencyId, TaskId};
use crate::store::TaskStore;
use crate::types::{Condition, Logic};

/// Partial update of a stored edge; `None` keeps the current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DependencyUpdate {
    pub depends_on: Option<TaskId>,
    pub condition: Option<Condition>,
    pub logic: Option<Logic>,
}

impl TaskStore {
    /// Create the edge "`task` depends on `depends_on`" and return its id.
    pub fn add_dependency(
        &mut self,
        task: TaskId,
        depends_on: TaskId,
        condition: Condition,
        logic: Logic,
    ) -> Result<DependencyId> {
        self.validate_edge(task, depends_on, logic, None)?;

        let group = resolve_group(self.dependencies.values(), task, logic);
        let id = self.next_dependency_id;
        self.next_dependency_id += 1;

        self.dependencies.insert(
            id,
            Dependency {
                id,
                task,
                depends_on,
                condition,
                logic,
                group,
            },
        );
        info!(id, task, depends_on, %condition, %logic, %group, "dependency added");
        Ok(id)
    }

    /// Update a stored edge.
    ///
    /// - Only the condition changed: updated in place.
    /// - Logic changed: the edge moves into the task's group for the new
    ///   logic (minting one if needed).
    /// - Target changed: the new target is validated like a new edge.
    pub fn update_dependency(&mut self, id: DependencyId, update: DependencyUpdate) -> Result<()> {
        let current = self
            .dependencies
            .get(&id)
            .cloned()
            .ok_or(TaskplanError::DependencyNotFound(id))?;

        let depends_on = update.depends_on.unwrap_or(current.depends_on);
        let condition = update.condition.unwrap_or(current.condition);
        let logic = update.logic.unwrap_or(current.logic);

        if depends_on != current.depends_on || logic != current.logic {
            self.validate_edge(current.task, depends_on, logic, Some(id))?;
        }

        let group = if logic != current.logic {
            resolve_group(
                self.dependencies.values().filter(|d| d.id != id),
                current.task,
                logic,
            )
        } else {
            current.group
        };

        if let Some(dep) = self.dependencies.get_mut(&id) {
            dep.depends_on = depends_on;
            dep.condition = condition;
            dep.logic = logic;
            dep.group = group;
        }
        debug!(id, depends_on, %condition, %logic, %group, "dependency updated");
        Ok(())
    }

    /// Delete one edge and return it.
    pub fn remove_dependency(&mut self, id: DependencyId) -> Result<Dependency> {
        let removed = self
            .dependencies
            .remove(&id)
            .ok_or(TaskplanError::DependencyNotFound(id))?;
        info!(id, task = removed.task, group = %removed.group, "dependency removed");
        Ok(removed)
    }

    /// Groups of `task`'s edges, AND groups first.
    pub fn dependency_groups(&self, task: TaskId) -> Vec<DependencyGroup> {
        let edges: Vec<_> = self.dependencies_of(task).map(Dependency::edge).collect();
        let mut groups = group_edges(&edges);
        groups.sort_by_key(|g| g.logic);
        groups
    }

    /// Checks shared by create and update. `ignore` is the edge being
    /// replaced, which must not count as a duplicate or as part of a cycle.
    fn validate_edge(
        &self,
        task: TaskId,
        depends_on: TaskId,
        logic: Logic,
        ignore: Option<DependencyId>,
    ) -> Result<()> {
        let invalid = |reason: &str| TaskplanError::InvalidDependency {
            task,
            depends_on,
            reason: reason.to_string(),
        };

        let source = self.task_or_err(task)?;
        let target = self.task_or_err(depends_on)?;

        if task == depends_on {
            return Err(invalid("task cannot depend on itself"));
        }
        if source.project != target.project {
            return Err(invalid("tasks must be in the same project"));
        }

        let duplicate = self.dependencies.values().any(|d| {
            Some(d.id) != ignore && d.task == task && d.depends_on == depends_on && d.logic == logic
        });
        if duplicate {
            return Err(invalid("dependency already exists"));
        }

        if let Some(path) = self.dependency_path(depends_on, task, ignore) {
            let mut cycle = Vec::with_capacity(path.len() + 1);
            cycle.push(task);
            cycle.extend(path);
            return Err(TaskplanError::CyclicDependency { task, cycle });
        }

        Ok(())
    }

    /// Path `from -> ... -> to` following "depends on" edges, if any.
    fn dependency_path(
        &self,
        from: TaskId,
        to: TaskId,
        ignore: Option<DependencyId>,
    ) -> Option<Vec<TaskId>> {
        let mut graph: DiGraphMap<TaskId, ()> = DiGraphMap::new();
        graph.add_node(from);
        graph.add_node(to);

        for dep in self.dependencies.values() {
            if Some(dep.id) != ignore {
                graph.add_edge(dep.task, dep.depends_on, ());
            }
        }

        astar(&graph, from, |n| n == to, |_| 1u32, |_| 0u32).map(|(_, path)| path)
    }
}
