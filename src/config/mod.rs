// src/config/mod.rs

//! Snapshot loading and validation for taskplan.
//!
//! Responsibilities:
//! - Define the TOML-backed snapshot model (`model.rs`).
//! - Load a snapshot file from disk (`loader.rs`).
//! - Validate it into a [`crate::store::TaskStore`] (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_snapshot_path, load_and_validate, load_from_path};
pub use model::{
    DependencyConfig, ProjectConfig, RawSnapshot, SettingsSection, Snapshot, TaskConfig,
};
