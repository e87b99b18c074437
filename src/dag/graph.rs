// src/dag/graph.rs

use std::collections::HashMap;

use tracing::warn;

use crate::model::{TaskId, TaskNode};

/// Internal node structure: stores immediate deps and dependents.
#[derive(Debug, Clone)]
struct DagNode<'a> {
    task: &'a TaskNode,
    /// Direct dependencies: tasks that must finish before this one can start.
    /// One entry per edge, so a task depended on through both an AND and an
    /// OR edge appears twice.
    deps: Vec<TaskId>,
    /// Direct dependents: tasks that depend on this one.
    dependents: Vec<TaskId>,
}

/// Dependency graph of one project's tasks, keyed by task id.
///
/// Edges point from the depended-upon task to its dependent, i.e. in
/// completion order. Iteration follows the order tasks were handed in.
#[derive(Debug, Clone)]
pub struct DependencyGraph<'a> {
    nodes: HashMap<TaskId, DagNode<'a>>,
    order: Vec<TaskId>,
}

impl<'a> DependencyGraph<'a> {
    /// Build the graph from a project's tasks.
    ///
    /// Edges whose target is not part of `tasks` are dropped; the task then
    /// counts as having one dependency fewer.
    pub fn from_tasks(tasks: &'a [TaskNode]) -> Self {
        let mut nodes: HashMap<TaskId, DagNode<'a>> = HashMap::with_capacity(tasks.len());
        let mut order = Vec::with_capacity(tasks.len());

        // First pass: one node per task, every in-degree starts at zero.
        for task in tasks {
            if nodes.contains_key(&task.id) {
                warn!(task = task.id, "duplicate task in project input; keeping the first");
                continue;
            }
            nodes.insert(
                task.id,
                DagNode {
                    task,
                    deps: Vec::new(),
                    dependents: Vec::new(),
                },
            );
            order.push(task.id);
        }

        // Second pass: wire edges in the order each task lists them.
        for &id in &order {
            let task: Option<&'a TaskNode> = nodes.get(&id).map(|n| n.task);
            let edges = task.map(|t| t.edges.as_slice()).unwrap_or(&[]);
            let mut deps = Vec::with_capacity(edges.len());

            for edge in edges {
                match nodes.get_mut(&edge.depends_on) {
                    Some(target) => {
                        target.dependents.push(id);
                        deps.push(edge.depends_on);
                    }
                    None => {
                        warn!(
                            task = id,
                            depends_on = edge.depends_on,
                            "dependency points outside the project; ignoring"
                        );
                    }
                }
            }

            if let Some(node) = nodes.get_mut(&id) {
                node.deps = deps;
            }
        }

        Self { nodes, order }
    }

    /// Task ids in input order.
    pub fn tasks(&self) -> impl Iterator<Item = TaskId> + '_ {
        self.order.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Lookup a task by id.
    pub fn task(&self, id: TaskId) -> Option<&'a TaskNode> {
        self.nodes.get(&id).map(|n| n.task)
    }

    /// Immediate in-project dependencies of a task.
    pub fn dependencies_of(&self, id: TaskId) -> &[TaskId] {
        self.nodes
            .get(&id)
            .map(|n| n.deps.as_slice())
            .unwrap_or(&[])
    }

    /// Immediate dependents of a task (tasks that list this one as a dependency).
    pub fn dependents_of(&self, id: TaskId) -> &[TaskId] {
        self.nodes
            .get(&id)
            .map(|n| n.dependents.as_slice())
            .unwrap_or(&[])
    }

    /// Number of in-project dependency edges of a task.
    pub fn in_degree(&self, id: TaskId) -> usize {
        self.dependencies_of(id).len()
    }

    /// In-degree of every task; tasks without dependencies map to zero.
    pub fn in_degrees(&self) -> HashMap<TaskId, usize> {
        self.order
            .iter()
            .map(|&id| (id, self.in_degree(id)))
            .collect()
    }
}
