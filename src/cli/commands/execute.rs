//! The `execute` command: apply a saved plan to the filesystem.

use crate::core::{executor, planner};
use crate::Result;
use std::path::Path;

pub fn run(plan_file: &Path, dry_run: bool) -> Result<()> {
    let plan = planner::load_plan(plan_file)?;
    tracing::info!(
        "executing plan {} for '{}' ({} operations)",
        plan.id,
        plan.series_name,
        plan.operations.len()
    );

    let (report, executed) = executor::execute_plan(&plan, dry_run)?;

    if !dry_run && !executed.is_empty() {
        let log_path = plan_file
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join("rename.log");
        planner::write_rename_log(&plan, &executed, &log_path)?;
        tracing::info!("rename log appended to {}", log_path.display());
    }

    if !report.success {
        return Err(crate::Error::ExecuteError(format!(
            "{} operation(s) failed",
            report.error_count
        )));
    }
    Ok(())
}
