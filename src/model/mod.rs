// src/model/mod.rs

//! Domain records read by the scheduler.
//!
//! - [`Project`] and [`Task`] are owned by the store (see [`crate::store`]).
//! - [`Dependency`] is a stored edge; [`DependencyEdge`] is the read-only view
//!   of it handed to the scheduler inside a [`TaskNode`].
//! - [`GroupId`] is the opaque identifier shared by edges of one AND/OR group.

pub mod dependency;
pub mod task;

pub use dependency::{Dependency, DependencyEdge, GroupId};
pub use task::{Project, Task, TaskNode};

/// Project identity. Projects are prioritised in ascending id order.
pub type ProjectId = u64;

/// Task identity.
pub type TaskId = u64;

/// Stored dependency edge identity.
pub type DependencyId = u64;

/// Assignee identity (the owner's user name).
pub type AssigneeId = String;
