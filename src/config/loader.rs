// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{RawSnapshot, Snapshot};
use crate::errors::Result;

/// Load a snapshot file from a given path and return the raw `RawSnapshot`.
///
/// This only performs TOML deserialization; it does **not** check record
/// invariants. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawSnapshot> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let raw: RawSnapshot = toml::from_str(&contents)?;
    debug!(
        path = %path.display(),
        projects = raw.projects.len(),
        tasks = raw.tasks.len(),
        dependencies = raw.dependencies.len(),
        "snapshot parsed"
    );

    Ok(raw)
}

/// Load a snapshot file from path and validate it into a [`Snapshot`].
///
/// This is the recommended entry point for the rest of the application:
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` default functions).
/// - Inserts every record through the store, which checks:
///   - task durations and project/parent membership,
///   - dangling references,
///   - dependency edges (same project, no duplicates, no cycles).
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<Snapshot> {
    let raw = load_from_path(&path)?;
    let snapshot = Snapshot::try_from(raw)?;
    Ok(snapshot)
}

/// Default snapshot location: `Taskplan.toml` in the working directory.
pub fn default_snapshot_path() -> PathBuf {
    PathBuf::from("Taskplan.toml")
}
