//! CLI command implementations.

pub mod execute;
pub mod organize;
pub mod plan;

use crate::core::events::{OrganizeEvent, OrganizeObserver, TracingObserver};
use crate::models::plan::{ExecutionReport, OperationStats, Plan};
use crate::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

/// Run blocking engine work off the async runtime.
pub(crate) async fn run_blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| crate::Error::other(format!("background task failed: {}", e)))?
}

/// Shows engine events on a progress bar and forwards them to tracing.
pub(crate) struct ConsoleObserver {
    pb: ProgressBar,
    log: TracingObserver,
}

impl ConsoleObserver {
    /// Spinner for planning, where the total is unknown.
    pub(crate) fn spinner() -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        Self {
            pb,
            log: TracingObserver,
        }
    }

    /// Progress bar over `total` moves.
    pub(crate) fn bar(total: usize) -> Self {
        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        Self {
            pb,
            log: TracingObserver,
        }
    }

    pub(crate) fn finish(&self) {
        self.pb.finish_and_clear();
    }
}

impl OrganizeObserver for ConsoleObserver {
    fn on_event(&mut self, event: &OrganizeEvent) {
        match event {
            OrganizeEvent::ShowStarted { name, .. } => {
                self.pb.set_message(format!("Scanning {}", name));
                self.pb.tick();
            }
            OrganizeEvent::FileMoved { to, .. } => {
                self.pb.set_message(
                    to.file_name()
                        .unwrap_or_default()
                        .to_string_lossy()
                        .to_string(),
                );
                self.pb.inc(1);
            }
            OrganizeEvent::MoveFailed { .. } => self.pb.inc(1),
            _ => {}
        }
        self.pb.suspend(|| self.log.on_event(event));
    }
}

/// Print the plan summary.
pub(crate) fn print_plan_summary(plan: &Plan) {
    println!();
    println!("{}", "[Plan Summary]".bold().green());
    println!("  {} {}", "Source:".bold(), plan.input_root.display());
    println!("  {} {}", "Target:".bold(), plan.output_root.display());
    println!("  {} {}", "Files to move:".bold(), plan.entries.len());
    println!("  {} {}", "Skipped:".bold(), plan.skipped.len());
    println!("  {} {}", "Warnings:".bold(), plan.warnings.len());
    println!("  {} {}", "Errors:".bold(), plan.errors.len());

    if !plan.errors.is_empty() {
        println!();
        println!("{}", "[Planning Errors]".bold().red());
        for issue in &plan.errors {
            println!("  {} {}", issue.path.display().to_string().red(), issue.reason);
        }
    }

    if !plan.entries.is_empty() {
        println!();
        println!("{}", "[Moves]".bold());
        for entry in &plan.entries {
            println!(
                "  {} {} {}",
                entry.source_path.display(),
                "->".dimmed(),
                entry.destination_path.display().to_string().cyan()
            );
        }
    }
}

/// Print the execution report.
pub(crate) fn print_execution_report(report: &ExecutionReport) {
    println!();
    if report.cancelled {
        println!("{}", "[CANCELLED] Stopped before finishing the plan".bold().yellow());
    }
    println!(
        "{} {} moved, {} failed",
        "[DONE]".bold().green(),
        report.moved.len(),
        report.failed.len()
    );
    for issue in &report.failed {
        println!("  {} {}", issue.path.display().to_string().red(), issue.reason);
    }
}

/// Print the accumulated counters.
pub(crate) fn print_stats(stats: &OperationStats) {
    println!();
    println!("{}", "[Statistics]".bold());
    println!("  {} {}", "Shows processed:".bold(), stats.shows);
    println!("  {} {}", "Seasons processed:".bold(), stats.seasons);
    println!("  {} {}", "Episodes planned:".bold(), stats.episodes);
    println!("  {} {}", "Already organized:".bold(), stats.already_organized);
    println!("  {} {}", "Files moved:".bold(), stats.moved);
    println!("  {} {}", "Errors:".bold(), stats.errors);
}
