//! Execute command implementation.
//!
//! Reads a plan.json file and performs its moves.

use super::{print_execution_report, print_stats, run_blocking, ConsoleObserver};
use crate::core::executor::{FileMover, MoverConfig};
use crate::core::planner;
use crate::models::config::Config;
use crate::models::plan::{ExecutionReport, OperationStats, Plan};
use crate::Result;
use colored::Colorize;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Execute a plan file.
pub async fn execute_plan(plan_file: &Path, config: &Config, cancel: Arc<AtomicBool>) -> Result<()> {
    println!("{}", "[EXEC] Executing plan...".bold().cyan());
    println!();

    // Validate plan file exists
    if !plan_file.exists() {
        return Err(crate::Error::PathNotFound(plan_file.display().to_string()));
    }

    println!("[INFO] Loading plan: {}", plan_file.display());
    let plan = planner::load_plan(plan_file)?;

    println!("  {} {}", "Created:".bold(), plan.created_at);
    println!("  {} {}", "Source:".bold(), plan.input_root.display());
    println!("  {} {}", "Target:".bold(), plan.output_root.display());
    println!("  {} {}", "Moves:".bold(), plan.entries.len());
    println!();

    let mut stats = OperationStats::default();
    let report = run_plan(plan, MoverConfig::from(&config.organizer), cancel, &mut stats).await?;

    print_execution_report(&report);
    print_stats(&stats);

    Ok(())
}

/// Run the mover on a blocking thread, adding its counters to `stats`.
pub(crate) async fn run_plan(
    plan: Plan,
    config: MoverConfig,
    cancel: Arc<AtomicBool>,
    stats: &mut OperationStats,
) -> Result<ExecutionReport> {
    let mut local = stats.clone();

    let (report, local) = run_blocking(move || {
        let mover = FileMover::with_config(config).with_cancel_flag(cancel);
        let mut observer = ConsoleObserver::bar(plan.entries.len());
        let result = mover.execute(&plan, &mut local, &mut observer);
        observer.finish();
        result.map(|report| (report, local))
    })
    .await?;

    *stats = local;
    Ok(report)
}
