// src/model/dependency.rs

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{DependencyId, TaskId};
use crate::types::{Condition, Logic};

/// Opaque identifier of a dependency group.
///
/// Carries no meaning beyond equality; minted by
/// [`crate::dag::groups::resolve_group`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(Uuid);

impl GroupId {
    /// Mint a new, globally unique group id.
    pub fn new() -> Self {
        GroupId(Uuid::new_v4())
    }
}

impl Default for GroupId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A stored edge: `task` depends on `depends_on`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dependency {
    pub id: DependencyId,
    pub task: TaskId,
    pub depends_on: TaskId,
    pub condition: Condition,
    pub logic: Logic,
    pub group: GroupId,
}

impl Dependency {
    /// The outbound-edge view used by the scheduler and group evaluation.
    pub fn edge(&self) -> DependencyEdge {
        DependencyEdge {
            depends_on: self.depends_on,
            condition: self.condition,
            logic: self.logic,
            group: self.group,
        }
    }
}

/// Outbound dependency edge of a task, as enumerated by the data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DependencyEdge {
    pub depends_on: TaskId,
    pub condition: Condition,
    pub logic: Logic,
    pub group: GroupId,
}
