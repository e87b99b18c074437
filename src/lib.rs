// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod errors;
pub mod logging;
pub mod model;
pub mod schedule;
pub mod store;
pub mod types;

use std::io::{self, Write};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{Snapshot, load_and_validate};
use crate::schedule::{
    GlobalSchedule, generate_global_schedule, generate_project_schedule_by_id,
};
use crate::store::TaskStore;
use crate::types::OutputFormat;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - snapshot loading + validation
/// - resolving "today"
/// - global or single-project scheduling
/// - rendering to stdout
pub fn run(args: CliArgs) -> Result<()> {
    let snapshot = load_and_validate(&args.snapshot)
        .with_context(|| format!("loading snapshot {}", args.snapshot))?;

    if args.dry_run {
        print_dry_run(&snapshot);
        return Ok(());
    }

    let today = resolve_today(args.today, &snapshot);
    info!(%today, snapshot = %args.snapshot, "scheduling");

    let schedule = match args.project {
        Some(project) => {
            let entries = generate_project_schedule_by_id(&snapshot.store, project, today)?;
            GlobalSchedule::from_entries(entries)
        }
        None => generate_global_schedule(&snapshot.store, today)?,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &schedule)?;
            writeln!(out)?;
        }
        OutputFormat::Table => write_table(&mut out, &schedule)?,
    }

    Ok(())
}

/// `--today`, else `[settings].today`, else the local date.
fn resolve_today(cli_today: Option<NaiveDate>, snapshot: &Snapshot) -> NaiveDate {
    cli_today
        .or(snapshot.settings.today)
        .unwrap_or_else(|| Local::now().date_naive())
}

/// Render a schedule as a fixed-width table.
pub fn write_table(out: &mut impl Write, schedule: &GlobalSchedule) -> io::Result<()> {
    writeln!(
        out,
        "{:<6} {:<28} {:<10} {:<10} {:<12} {:>4}  {}",
        "TASK", "TITLE", "START", "END", "ASSIGNEE", "DAYS", "PROJECT"
    )?;

    for e in &schedule.schedule {
        writeln!(
            out,
            "{:<6} {:<28} {:<10} {:<10} {:<12} {:>4}  {} ({})",
            e.id,
            truncate(&e.title, 28),
            e.start_date,
            e.end_date,
            e.assignee.as_deref().unwrap_or("-"),
            e.duration_days,
            e.project_title,
            e.project_id,
        )?;
    }

    match (schedule.start_date, schedule.end_date) {
        (Some(start), Some(end)) => writeln!(out, "\n{} tasks, {start} .. {end}", schedule.schedule.len()),
        _ => writeln!(out, "\nno tasks to schedule"),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut t: String = s.chars().take(max.saturating_sub(1)).collect();
        t.push('…');
        t
    }
}

/// Simple dry-run output: print projects, tasks and dependency groups.
fn print_dry_run(snapshot: &Snapshot) {
    let store: &TaskStore = &snapshot.store;

    println!("taskplan dry-run");
    if let Some(today) = snapshot.settings.today {
        println!("  settings.today = {today}");
    }
    println!();

    for project in store.projects() {
        let start = project
            .start_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "today".to_string());
        println!("project {} \"{}\" (start: {start})", project.id, project.title);

        for task in store.tasks_in_project(project.id) {
            println!(
                "  - task {} \"{}\" [{}d, owner: {}]",
                task.id,
                task.title,
                task.duration_days,
                task.owner.as_deref().unwrap_or("-")
            );
            if let Some(parent) = task.parent {
                println!("      parent: {parent}");
            }
            if task.completed {
                println!("      completed: true");
            }
            for group in store.dependency_groups(task.id) {
                println!(
                    "      {} group {}: {:?}",
                    group.logic,
                    group.group,
                    group.depends_on()
                );
            }
        }
    }

    debug!("dry-run complete (no scheduling)");
}
