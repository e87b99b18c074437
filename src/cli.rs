// src/cli.rs

//! CLI argument parsing using `clap`.

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};

use crate::model::ProjectId;
use crate::types::OutputFormat;

/// Command-line arguments for `taskplan`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "taskplan",
    version,
    about = "Compute a dependency-aware, assignee-constrained timeline across projects.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the project/task snapshot (TOML).
    #[arg(long, value_name = "PATH", default_value = "Taskplan.toml")]
    pub snapshot: String,

    /// Only schedule this project (single-project view).
    ///
    /// Assignee availability starts empty, so work in other projects is
    /// not taken into account.
    #[arg(long, value_name = "ID")]
    pub project: Option<ProjectId>,

    /// Date used as "today" for projects without a start date.
    ///
    /// Overrides `[settings].today`; defaults to the local system date.
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub today: Option<NaiveDate>,

    /// Output format for the computed schedule.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `TASKPLAN_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Validate the snapshot and print it, without scheduling.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
