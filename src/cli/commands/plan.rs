//! Plan command implementation.
//!
//! Scans the input directory and writes a plan.json without moving anything.

use super::{print_plan_summary, print_stats, run_blocking, ConsoleObserver};
use crate::core::planner::{self, Planner, PlannerConfig};
use crate::models::config::Config;
use crate::models::plan::{OperationStats, Plan};
use crate::utils::fs as fs_utils;
use crate::Result;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

/// Generate a plan and save it.
pub async fn plan(
    input: &Path,
    output: &Path,
    output_file: Option<&Path>,
    config: &Config,
) -> Result<()> {
    println!("{}", "[PLAN] Planning TV show organization...".bold().cyan());
    println!();

    fs_utils::ensure_directory(input)?;
    fs::create_dir_all(output)?;
    let (plan, stats) = build_plan(input, output, PlannerConfig::from(&config.organizer)).await?;

    print_plan_summary(&plan);
    print_stats(&stats);

    let plan_path = output_file
        .map(Path::to_path_buf)
        .unwrap_or_else(|| planner::default_plan_path(&plan.output_root));
    planner::save_plan(&plan, &plan_path)?;
    println!();
    println!("{} {}", "[OK] Plan saved to:".bold().green(), plan_path.display());

    if config.organizer.save_sessions {
        match planner::save_to_sessions(&plan, &config.sessions_dir) {
            Ok(dir) => println!("  {} {}", "Session:".bold(), dir.display()),
            Err(e) => tracing::warn!("Failed to save session copy: {}", e),
        }
    }

    println!();
    println!("{}", "[Next Steps]".bold().yellow());
    println!(
        "  To apply it: {}",
        format!("show-organizer execute {}", plan_path.display()).cyan()
    );

    Ok(())
}

/// Run the planner on a blocking thread with a console observer.
pub(crate) async fn build_plan(
    input: &Path,
    output: &Path,
    config: PlannerConfig,
) -> Result<(Plan, OperationStats)> {
    let input: PathBuf = input.to_path_buf();
    let output: PathBuf = output.to_path_buf();

    run_blocking(move || {
        let mut stats = OperationStats::default();
        let mut observer = ConsoleObserver::spinner();
        let result =
            Planner::with_config(config).generate(&input, &output, &mut stats, &mut observer);
        observer.finish();
        result.map(|plan| (plan, stats))
    })
    .await
}
