//! Organize command implementation.
//!
//! Plans and executes in one step. With `--dry-run` it stops after planning.

use super::execute::run_plan;
use super::plan::build_plan;
use super::{print_execution_report, print_plan_summary, print_stats};
use crate::core::executor::MoverConfig;
use crate::core::planner::PlannerConfig;
use crate::models::config::Config;
use crate::utils::fs as fs_utils;
use crate::Result;
use colored::Colorize;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Organize `input` into `output`.
pub async fn organize(
    input: &Path,
    output: &Path,
    dry_run: bool,
    config: &Config,
    cancel: Arc<AtomicBool>,
) -> Result<()> {
    fs_utils::ensure_directory(input)?;

    if dry_run {
        println!("{}", "[DRY RUN] No files will be moved".bold().yellow());
        if !output.exists() {
            return Err(crate::Error::PathNotFound(format!(
                "{} (create it first, or run without --dry-run)",
                output.display()
            )));
        }
    } else {
        fs::create_dir_all(output)?;
    }
    println!();

    let (plan, mut stats) = build_plan(input, output, PlannerConfig::from(&config.organizer)).await?;
    print_plan_summary(&plan);

    if dry_run {
        print_stats(&stats);
        return Ok(());
    }

    if cancel.load(Ordering::SeqCst) {
        println!("{}", "[CANCELLED] Nothing was moved".bold().yellow());
        return Ok(());
    }

    if plan.is_empty() {
        println!();
        println!("{}", "[OK] Nothing to move".green());
        print_stats(&stats);
        return Ok(());
    }

    let report = run_plan(plan, MoverConfig::from(&config.organizer), cancel, &mut stats).await?;
    print_execution_report(&report);
    print_stats(&stats);

    Ok(())
}
