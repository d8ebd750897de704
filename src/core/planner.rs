//! Plan construction, validation, persistence and preview.
//!
//! Turns one [`Analysis`] into an ordered, immutable [`Plan`] that can be
//! saved to JSON, previewed, and later executed. Planning never touches
//! the filesystem beyond reading and writing the plan file itself.

use crate::core::analyzer::Analysis;
use crate::core::versions;
use crate::models::config::Config;
use crate::models::media::SeriesInfo;
use crate::models::plan::{Operation, OperationKind, Plan, UnmatchedItem, Validation};
use crate::naming::NameFormatter;
use crate::{Error, Result};
use colored::Colorize;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Destination folder for an episode.
///
/// Renames happen in place unless season folders are enabled, in which
/// case targets route into "Season NN" (or "Specials" for season 0)
/// under the library root.
fn target_folder_for(
    season: u16,
    in_place: &Path,
    library_root: &Path,
    season_folders: bool,
) -> PathBuf {
    if !season_folders {
        return in_place.to_path_buf();
    }
    if season == 0 {
        library_root.join("Specials")
    } else {
        library_root.join(format!("Season {:02}", season))
    }
}

/// Build a plan from a completed analysis.
///
/// Operation order is deterministic: plain renames in scan order, then
/// duplicate resolutions in episode-key order. The returned plan already
/// carries its validation outcome.
pub fn build_plan(
    series: &SeriesInfo,
    analysis: Analysis,
    formatter: &NameFormatter,
    config: &Config,
    library_root: &Path,
) -> Plan {
    let season_folders = config.naming.season_folders;
    let mut operations = Vec::new();
    let mut skip_count = 0usize;

    for file in analysis.skip {
        let Some(episode) = file.episode.clone() else {
            continue;
        };
        let folder = target_folder_for(
            episode.season_number,
            &file.record.parent_dir,
            library_root,
            season_folders,
        );
        // Byte-identical name, but season folders may still move the file.
        if folder == file.record.parent_dir {
            skip_count += 1;
        } else {
            operations.push(Operation {
                kind: OperationKind::Rename,
                source: file.record.path,
                target_name: file.target_name,
                target_folder: folder,
                episode: Some(episode.key()),
            });
        }
    }

    for file in analysis.rename {
        let Some(episode) = file.episode.clone() else {
            continue;
        };
        let folder = target_folder_for(
            episode.season_number,
            &file.record.parent_dir,
            library_root,
            season_folders,
        );
        operations.push(Operation {
            kind: OperationKind::Rename,
            source: file.record.path,
            target_name: file.target_name,
            target_folder: folder,
            episode: Some(episode.key()),
        });
    }

    for (key, group) in analysis.duplicates {
        for versioned in versions::assign_versions(group) {
            let Some(episode) = versioned.file.episode.clone() else {
                continue;
            };
            let target_name = formatter.render_episode_name(
                episode.season_number,
                episode.episode_number,
                &episode.title,
                &versioned.file.record.extension,
                Some(versioned.version),
            );
            let folder = target_folder_for(
                episode.season_number,
                &versioned.file.record.parent_dir,
                library_root,
                season_folders,
            );

            let kind = if versioned.file.record.filename == target_name
                && folder == versioned.file.record.parent_dir
            {
                OperationKind::Skip
            } else {
                OperationKind::Version
            };

            operations.push(Operation {
                kind,
                source: versioned.file.record.path,
                target_name,
                target_folder: folder,
                episode: Some(key),
            });
        }
    }

    let unmatched = analysis
        .unmatched
        .into_iter()
        .map(|(record, reason)| UnmatchedItem {
            path: record.path,
            reason,
        })
        .collect();

    let mut plan = Plan {
        id: Uuid::new_v4().to_string(),
        created_at: chrono::Utc::now().to_rfc3339(),
        series_name: formatter.series_name().to_string(),
        operations,
        skip_count,
        special_count: analysis.specials.len(),
        unmatched,
        validation: Validation::default(),
    };

    tracing::debug!(
        "built plan {} for '{}': {} operations",
        plan.id,
        series.name,
        plan.operations.len()
    );
    plan.validation = validate(&plan);
    plan
}

/// Validate a plan's internal consistency.
///
/// A plan is invalid when two operations share a destination, or when an
/// operation has an empty source path or empty target name.
pub fn validate(plan: &Plan) -> Validation {
    let mut issues = Vec::new();
    let mut seen_targets: HashSet<PathBuf> = HashSet::new();

    for op in &plan.operations {
        if op.source.as_os_str().is_empty() {
            issues.push(format!(
                "operation for '{}' has an empty source path",
                op.target_name
            ));
        }
        if op.target_name.is_empty() {
            issues.push(format!(
                "operation for {} has an empty target name",
                op.source.display()
            ));
        }
        let target = op.target_path();
        if !seen_targets.insert(target.clone()) {
            issues.push(format!("duplicate target: {}", target.display()));
        }
    }

    Validation {
        is_valid: issues.is_empty(),
        issues,
    }
}

/// Save a plan as pretty-printed JSON.
pub fn save_plan(plan: &Plan, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(plan)?;
    std::fs::write(path, json)?;
    tracing::info!("plan saved to {}", path.display());
    Ok(())
}

/// Load a plan from a JSON file.
pub fn load_plan(path: &Path) -> Result<Plan> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::InvalidPlanFile(format!("{}: {}", path.display(), e)))?;
    serde_json::from_str(&content)
        .map_err(|e| Error::InvalidPlanFile(format!("{}: {}", path.display(), e)))
}

/// Print a human-readable preview of the plan, grouped by target folder.
pub fn print_preview(plan: &Plan) {
    println!();
    println!(
        "{} {} ({})",
        "Plan for".bold(),
        plan.series_name.cyan().bold(),
        plan.created_at
    );
    println!();

    let mut by_folder: BTreeMap<&Path, Vec<&Operation>> = BTreeMap::new();
    for op in &plan.operations {
        by_folder.entry(op.target_folder.as_path()).or_default().push(op);
    }

    for (folder, ops) in by_folder {
        println!("  {}", folder.display().to_string().bold());
        for op in ops {
            let from = op
                .source
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            match op.kind {
                OperationKind::Skip => {
                    println!("    {} {}", "=".dimmed(), from.dimmed());
                }
                OperationKind::Rename => {
                    println!("    {} {} {}", from, "->".green(), op.target_name.green());
                }
                OperationKind::Version => {
                    println!("    {} {} {}", from, "->".yellow(), op.target_name.yellow());
                }
            }
        }
        println!();
    }

    if !plan.unmatched.is_empty() {
        println!("  {}", "Unmatched:".yellow().bold());
        for item in &plan.unmatched {
            println!("    {} ({})", item.path.display(), item.reason.dimmed());
        }
        println!();
    }

    let mutation_count = plan.mutations().count();
    println!(
        "  {} to rename, {} already correct, {} special, {} unmatched",
        mutation_count.to_string().green().bold(),
        plan.skip_count,
        plan.special_count,
        plan.unmatched.len()
    );

    if !plan.validation.is_valid {
        println!();
        println!("  {}", "Validation issues:".red().bold());
        for issue in &plan.validation.issues {
            println!("    {}", issue.red());
        }
    }
}

/// Append executed renames to a plain-text log next to the plan.
///
/// Format: a timestamped header per run, then one "original -> new" line
/// per completed operation.
pub fn write_rename_log(plan: &Plan, executed: &[&Operation], log_path: &Path) -> Result<()> {
    use std::io::Write;

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;

    writeln!(
        file,
        "# {} - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        plan.series_name
    )?;
    for op in executed {
        writeln!(
            file,
            "{} -> {}",
            op.source.display(),
            op.target_path().display()
        )?;
    }
    writeln!(file)?;
    Ok(())
}
