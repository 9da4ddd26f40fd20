//! Plan data model.

use super::media::ResolutionMethod;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Plan file structure.
///
/// Identical for dry runs and real runs; a dry run stops after building it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Plan {
    /// Plan version.
    pub version: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Input directory (one subdirectory per show).
    pub input_root: PathBuf,
    /// Output directory.
    pub output_root: PathBuf,
    /// Moves to perform, in show/season/episode order.
    pub entries: Vec<PlanEntry>,
    /// Folders and files that were not planned (not errors).
    pub skipped: Vec<PlanIssue>,
    /// Recorded warnings.
    pub warnings: Vec<PlanIssue>,
    /// Planning errors (entries excluded from the plan).
    pub errors: Vec<PlanIssue>,
    /// Counters at the time the plan was built.
    pub stats: OperationStats,
}

impl Plan {
    /// Check whether the plan has nothing to move.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A single move in the plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEntry {
    /// Current location of the file.
    pub source_path: PathBuf,
    /// Canonical location of the file.
    pub destination_path: PathBuf,
    /// Normalized show name.
    pub show_name: String,
    /// Season number.
    pub season_number: u16,
    /// Episode number.
    pub episode_number: u16,
    /// Last episode of a multi-episode file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_episode: Option<u16>,
    /// How the episode number was decided.
    pub method: ResolutionMethod,
}

/// A path with the reason it was skipped, warned about or failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanIssue {
    /// Affected path.
    pub path: PathBuf,
    /// Human readable reason.
    pub reason: String,
}

impl PlanIssue {
    pub fn new<P: Into<PathBuf>, S: Into<String>>(path: P, reason: S) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Counters accumulated over a run.
///
/// Values only ever increase; callers own the accumulator and pass it into
/// planning and execution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationStats {
    /// Shows with at least one planned season.
    pub shows: usize,
    /// Season groups planned.
    pub seasons: usize,
    /// Episodes planned.
    pub episodes: usize,
    /// Planning and execution errors.
    pub errors: usize,
    /// Skipped folders and files.
    #[serde(default)]
    pub skipped: usize,
    /// Warnings recorded.
    #[serde(default)]
    pub warnings: usize,
    /// Files already at their canonical location.
    #[serde(default)]
    pub already_organized: usize,
    /// Files moved by the executor.
    #[serde(default)]
    pub moved: usize,
}

/// Outcome of executing a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutionReport {
    /// Entries moved successfully.
    pub moved: Vec<PlanEntry>,
    /// Entries that failed, with the reason.
    pub failed: Vec<PlanIssue>,
    /// Whether execution stopped early on a cancellation request.
    pub cancelled: bool,
}
