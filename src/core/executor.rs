//! Plan execution.
//!
//! Runs a validated plan against the filesystem in two phases. Phase one
//! creates every missing target folder and aborts the whole batch on the
//! first failure, before any file has moved. Phase two moves files one by
//! one; an individual failure is recorded and execution continues.
//!
//! A dry run walks the exact same code with the two mutation points
//! stubbed out, so its counts are the counts a real run would produce.

use crate::core::planner;
use crate::models::plan::{ExecutionReport, Operation, Plan};
use crate::utils::fs::move_file;
use crate::{Error, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Execute a plan.
///
/// Returns the report plus the operations that actually completed, in
/// execution order, for the rename log. Refuses invalid plans outright.
pub fn execute_plan<'a>(
    plan: &'a Plan,
    dry_run: bool,
) -> Result<(ExecutionReport, Vec<&'a Operation>)> {
    let validation = planner::validate(plan);
    if !validation.is_valid {
        return Err(Error::PlanValidationError(validation.issues.join("; ")));
    }

    let mut report = ExecutionReport {
        dry_run,
        ..Default::default()
    };

    // Phase one: target folders, fail-fast before any move.
    let folders: BTreeSet<PathBuf> = plan
        .mutations()
        .map(|op| op.target_folder.clone())
        .collect();
    for folder in folders {
        if folder.as_os_str().is_empty() || folder.exists() {
            continue;
        }
        if dry_run {
            tracing::info!("[dry-run] would create folder {}", folder.display());
            report.folder_create_count += 1;
            continue;
        }
        std::fs::create_dir_all(&folder)
            .map_err(|e| Error::FolderCreateError(folder.display().to_string(), e))?;
        tracing::info!("created folder {}", folder.display());
        report.folder_create_count += 1;
    }

    // Phase two: per-file moves, tolerant of individual failures.
    let mutations: Vec<&Operation> = plan.mutations().collect();
    let bar = progress_bar(mutations.len() as u64, dry_run);
    let mut executed = Vec::new();

    for op in mutations {
        let target = op.target_path();

        if target == op.source {
            bar.inc(1);
            continue;
        }

        // Shared by real and dry runs so both classify a vanished source
        // the same way.
        if !op.source.exists() {
            tracing::error!("source no longer exists: {}", op.source.display());
            report.error_count += 1;
            bar.inc(1);
            continue;
        }

        if target.exists() {
            tracing::warn!(
                "destination already exists, skipping: {}",
                target.display()
            );
            report.skipped_existing += 1;
            bar.inc(1);
            continue;
        }

        if dry_run {
            tracing::info!(
                "[dry-run] would rename {} -> {}",
                op.source.display(),
                target.display()
            );
            report.success_count += 1;
            executed.push(op);
            bar.inc(1);
            continue;
        }

        match move_file(&op.source, &target) {
            Ok(()) => {
                tracing::debug!("renamed {} -> {}", op.source.display(), target.display());
                report.success_count += 1;
                executed.push(op);
            }
            Err(e) => {
                tracing::error!("failed to rename {}: {}", op.source.display(), e);
                report.error_count += 1;
            }
        }
        bar.inc(1);
    }
    bar.finish_and_clear();

    report.success = report.error_count == 0;
    print_summary(&report);
    Ok((report, executed))
}

fn progress_bar(len: u64, dry_run: bool) -> ProgressBar {
    let bar = ProgressBar::new(len);
    bar.set_style(
        ProgressStyle::with_template("{prefix} [{bar:40.cyan/blue}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    bar.set_prefix(if dry_run { "Previewing" } else { "Renaming" });
    bar
}

fn print_summary(report: &ExecutionReport) {
    println!();
    if report.dry_run {
        println!("{}", "Dry run - nothing was changed".yellow().bold());
    }
    println!(
        "  {} renamed, {} failed, {} skipped (destination exists), {} folders created",
        report.success_count.to_string().green().bold(),
        if report.error_count > 0 {
            report.error_count.to_string().red().bold()
        } else {
            report.error_count.to_string().normal()
        },
        report.skipped_existing,
        report.folder_create_count
    );
}
