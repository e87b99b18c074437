// src/dag/groups.rs

//! Dependency groups: AND/OR sets of edges on one task.
//!
//! All edges of a task that share a logic tag converge into a single group,
//! so a task has at most one AND group and one OR group. Group ids are
//! assigned once, when an edge is created or moved, by [`resolve_group`].
//!
//! Satisfaction is evaluated per group: an AND group needs every edge
//! satisfied, an OR group needs at least one. A task may only be marked
//! complete once every one of its groups is satisfied.

use tracing::debug;

use crate::model::{Dependency, DependencyEdge, GroupId, TaskId};
use crate::types::{Condition, Logic};

/// Return the group id a new or moved edge of `task` with `logic` should use.
///
/// Reuses the group of an existing edge with the same task and logic, and
/// mints a fresh id otherwise. `existing` is the caller's current view of
/// stored edges; the edge being moved must already be excluded from it.
pub fn resolve_group<'d>(
    existing: impl IntoIterator<Item = &'d Dependency>,
    task: TaskId,
    logic: Logic,
) -> GroupId {
    match existing
        .into_iter()
        .find(|dep| dep.task == task && dep.logic == logic)
    {
        Some(dep) => {
            debug!(task, %logic, group = %dep.group, "reusing dependency group");
            dep.group
        }
        None => {
            let group = GroupId::new();
            debug!(task, %logic, %group, "minted dependency group");
            group
        }
    }
}

/// State of a dependency target, as far as conditions are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TargetState {
    pub completed: bool,
    pub started: bool,
}

impl Condition {
    /// Whether a target in `state` satisfies this condition.
    pub fn is_satisfied_by(self, state: TargetState) -> bool {
        match self {
            Condition::Completed => state.completed,
            Condition::NotCompleted => !state.completed,
            Condition::InProgress => state.started && !state.completed,
        }
    }
}

/// Edges of one task sharing a group id and logic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyGroup {
    pub group: GroupId,
    pub logic: Logic,
    pub edges: Vec<DependencyEdge>,
}

impl DependencyGroup {
    /// Ids of the tasks this group depends on, in edge order.
    pub fn depends_on(&self) -> Vec<TaskId> {
        self.edges.iter().map(|e| e.depends_on).collect()
    }

    /// Evaluate the group. Edges whose target `lookup` cannot resolve count
    /// as unsatisfied.
    pub fn is_satisfied<F>(&self, lookup: F) -> bool
    where
        F: Fn(TaskId) -> Option<TargetState>,
    {
        let edge_ok = |edge: &DependencyEdge| {
            lookup(edge.depends_on)
                .map(|state| edge.condition.is_satisfied_by(state))
                .unwrap_or(false)
        };

        match self.logic {
            Logic::And => self.edges.iter().all(edge_ok),
            Logic::Or => self.edges.iter().any(edge_ok),
        }
    }
}

/// Partition a task's edges into groups, in order of first appearance.
///
/// Groups are keyed by `(group id, logic)`, so a group can never mix AND and
/// OR edges even if stored data disagrees.
pub fn group_edges(edges: &[DependencyEdge]) -> Vec<DependencyGroup> {
    let mut groups: Vec<DependencyGroup> = Vec::new();

    for edge in edges {
        match groups
            .iter_mut()
            .find(|g| g.group == edge.group && g.logic == edge.logic)
        {
            Some(group) => group.edges.push(*edge),
            None => groups.push(DependencyGroup {
                group: edge.group,
                logic: edge.logic,
                edges: vec![*edge],
            }),
        }
    }

    groups
}

/// Whether every group formed from `edges` is satisfied. A task without
/// edges is trivially satisfied.
pub fn all_groups_satisfied<F>(edges: &[DependencyEdge], lookup: F) -> bool
where
    F: Fn(TaskId) -> Option<TargetState>,
{
    group_edges(edges)
        .iter()
        .all(|group| group.is_satisfied(&lookup))
}
