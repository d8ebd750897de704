//! The `plan` command: scan, classify and write the plan file.

use crate::core::{analyzer, planner, scanner};
use crate::models::config::Config;
use crate::naming::NameFormatter;
use crate::services::metadata;
use crate::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};

pub fn run(
    source: &Path,
    metadata_path: &Path,
    output: Option<PathBuf>,
    config: &Config,
) -> Result<()> {
    let (series, index) = metadata::load_metadata(metadata_path)?;
    let formatter = NameFormatter::new(series.name.as_str(), config.naming.style);

    let records = scanner::scan_videos(source)?;
    if records.is_empty() {
        println!("{}", "No video files found".yellow());
        return Ok(());
    }

    let analysis = analyzer::classify(records, &index, &formatter, &config.special_folders);
    tracing::debug!(
        "{} matched, {} special, {} unmatched",
        analysis.matched_count(),
        analysis.specials.len(),
        analysis.unmatched.len()
    );

    let plan = planner::build_plan(&series, analysis, &formatter, config, source);
    planner::print_preview(&plan);

    let plan_path = output.unwrap_or_else(|| source.join("plan.json"));
    planner::save_plan(&plan, &plan_path)?;
    println!(
        "Plan written to {}. Review it, then run: episode-renamer execute {}",
        plan_path.display().to_string().cyan(),
        plan_path.display()
    );
    Ok(())
}
