// src/types.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// State a dependency target must be in for the edge to be satisfied.
///
/// - `Completed`: the target is complete.
/// - `NotCompleted`: the target is not complete.
/// - `InProgress`: the target has been started and is not complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    #[default]
    Completed,
    NotCompleted,
    InProgress,
}

impl FromStr for Condition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "completed" => Ok(Condition::Completed),
            "not_completed" => Ok(Condition::NotCompleted),
            "in_progress" => Ok(Condition::InProgress),
            other => Err(format!(
                "invalid condition: {other} (expected \"completed\", \"not_completed\" or \"in_progress\")"
            )),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Condition::Completed => "completed",
            Condition::NotCompleted => "not_completed",
            Condition::InProgress => "in_progress",
        };
        f.write_str(s)
    }
}

/// Logical operator shared by all edges of one dependency group.
///
/// Ordered so that `AND` groups list before `OR` groups.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Logic {
    #[default]
    And,
    Or,
}

impl FromStr for Logic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "AND" => Ok(Logic::And),
            "OR" => Ok(Logic::Or),
            other => Err(format!(
                "invalid logic: {other} (expected \"AND\" or \"OR\")"
            )),
        }
    }
}

impl fmt::Display for Logic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Logic::And => f.write_str("AND"),
            Logic::Or => f.write_str("OR"),
        }
    }
}

/// How the CLI renders a computed schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}
