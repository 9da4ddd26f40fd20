//! Plan generation module.
//!
//! Coordinates the planning process:
//! 1. List show folders under the input root
//! 2. Detect each folder's structure and group its files into seasons
//! 3. Resolve episode numbers
//! 4. Generate destination paths and reject collisions
//! 5. Output plan.json
//!
//! Nothing here touches the files being organized.

use crate::core::events::{OrganizeEvent, OrganizeObserver, TracingObserver};
use crate::core::resolver;
use crate::core::scanner::{self, ScanOutcome, ScannerConfig, ShowScan};
use crate::generators;
use crate::models::config::OrganizerConfig;
use crate::models::plan::{OperationStats, Plan, PlanEntry, PlanIssue};
use crate::utils::fs as fs_utils;
use crate::Result;
use chrono::Utc;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;
use walkdir::WalkDir;

/// Current plan file version.
pub const PLAN_VERSION: &str = "1.0";

/// Planner configuration.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Ignore sample files and extras folders.
    pub skip_samples: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self { skip_samples: true }
    }
}

impl From<&OrganizerConfig> for PlannerConfig {
    fn from(config: &OrganizerConfig) -> Self {
        Self {
            skip_samples: config.skip_samples,
        }
    }
}

/// Plan generator.
#[derive(Debug, Clone, Default)]
pub struct Planner {
    config: PlannerConfig,
}

/// Destinations claimed so far, mapped to the file that claimed them.
type ClaimedDestinations = HashMap<PathBuf, PathBuf>;

impl Planner {
    /// Create a new planner with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new planner with custom configuration.
    pub fn with_config(config: PlannerConfig) -> Self {
        Self { config }
    }

    /// Build a plan for every show folder under `input_root`.
    ///
    /// Fails only when either root is missing or unreadable. Everything else
    /// (skips, warnings, collisions) is recorded in the returned plan and
    /// accumulated into `stats`.
    pub fn generate(
        &self,
        input_root: &Path,
        output_root: &Path,
        stats: &mut OperationStats,
        observer: &mut dyn OrganizeObserver,
    ) -> Result<Plan> {
        fs_utils::ensure_directory(input_root)?;
        fs_utils::ensure_directory(output_root)?;
        let input_root = fs::canonicalize(input_root)?;
        let output_root = fs::canonicalize(output_root)?;

        let mut plan = Plan {
            version: PLAN_VERSION.to_string(),
            created_at: Utc::now().to_rfc3339(),
            input_root: input_root.clone(),
            output_root: output_root.clone(),
            ..Default::default()
        };

        let show_folders = list_show_folders(&input_root)?;
        tracing::info!(
            "Found {} potential show folders in {}",
            show_folders.len(),
            input_root.display()
        );

        let scanner_config = ScannerConfig {
            skip_samples: self.config.skip_samples,
        };
        let mut claimed = ClaimedDestinations::new();

        for show_path in show_folders {
            match scanner::scan_show(&show_path, &scanner_config) {
                Ok(ScanOutcome::Found(scan)) => {
                    self.plan_show(scan, &output_root, &mut plan, &mut claimed, stats, observer)
                }
                Ok(ScanOutcome::NoMedia { skipped }) => {
                    record_skipped(&mut plan, stats, skipped);
                    let issue = PlanIssue::new(&show_path, "no media found");
                    stats.skipped += 1;
                    observer.on_event(&OrganizeEvent::ShowSkipped {
                        path: issue.path.clone(),
                        reason: issue.reason.clone(),
                    });
                    plan.skipped.push(issue);
                }
                Err(e) => {
                    let issue = PlanIssue::new(&show_path, format!("failed to scan: {}", e));
                    record_error(&mut plan, stats, observer, issue);
                }
            }
        }

        plan.stats = stats.clone();
        tracing::info!(
            "Plan ready: {} moves, {} skipped, {} warnings, {} errors",
            plan.entries.len(),
            plan.skipped.len(),
            plan.warnings.len(),
            plan.errors.len()
        );

        Ok(plan)
    }

    /// Add one scanned show to the plan.
    fn plan_show(
        &self,
        scan: ShowScan,
        output_root: &Path,
        plan: &mut Plan,
        claimed: &mut ClaimedDestinations,
        stats: &mut OperationStats,
        observer: &mut dyn OrganizeObserver,
    ) {
        let ShowScan {
            show,
            groups,
            skipped,
        } = scan;

        observer.on_event(&OrganizeEvent::ShowStarted {
            name: show.normalized_name.clone(),
            path: show.path.clone(),
            structure: show.structure,
        });
        stats.shows += 1;

        record_skipped(plan, stats, skipped);

        for group in groups {
            let resolution = resolver::resolve_group(group);
            stats.seasons += 1;

            for warning in resolution.warnings {
                stats.warnings += 1;
                observer.on_event(&OrganizeEvent::Warning {
                    path: warning.path.clone(),
                    message: warning.reason.clone(),
                });
                plan.warnings.push(warning);
            }

            let season = resolution.season;
            let mut planned = 0;
            for episode in season.episodes {
                let source = episode.file.original_path;
                let destination = generators::episode_destination(
                    output_root,
                    &show.normalized_name,
                    season.season_number,
                    episode.episode_number,
                    episode.last_episode,
                    &episode.file.extension,
                );

                if let Some(first) = claimed.get(&destination) {
                    let issue = PlanIssue::new(
                        &source,
                        format!(
                            "destination {} already claimed by {}",
                            destination.display(),
                            first.display()
                        ),
                    );
                    record_error(plan, stats, observer, issue);
                    continue;
                }
                claimed.insert(destination.clone(), source.clone());

                if destination == source {
                    tracing::debug!("Already organized: {}", source.display());
                    stats.already_organized += 1;
                    continue;
                }

                tracing::debug!("Plan: {} -> {}", source.display(), destination.display());
                stats.episodes += 1;
                planned += 1;
                plan.entries.push(PlanEntry {
                    source_path: source,
                    destination_path: destination,
                    show_name: show.normalized_name.clone(),
                    season_number: season.season_number,
                    episode_number: episode.episode_number,
                    last_episode: episode.last_episode,
                    method: episode.method,
                });
            }

            observer.on_event(&OrganizeEvent::SeasonPlanned {
                show: show.normalized_name.clone(),
                season: season.season_number,
                episodes: planned,
            });
        }
    }
}

/// Record files and folders the scanner set aside.
fn record_skipped(plan: &mut Plan, stats: &mut OperationStats, skipped: Vec<PlanIssue>) {
    for issue in skipped {
        tracing::debug!("Skipped {}: {}", issue.path.display(), issue.reason);
        stats.skipped += 1;
        plan.skipped.push(issue);
    }
}

/// Record a planning error in the plan, the stats and the observer.
fn record_error(
    plan: &mut Plan,
    stats: &mut OperationStats,
    observer: &mut dyn OrganizeObserver,
    issue: PlanIssue,
) {
    stats.errors += 1;
    observer.on_event(&OrganizeEvent::PlanningError {
        path: issue.path.clone(),
        reason: issue.reason.clone(),
    });
    plan.errors.push(issue);
}

/// Immediate subdirectories of the input root, sorted case-insensitively.
fn list_show_folders(input_root: &Path) -> Result<Vec<PathBuf>> {
    let mut folders = Vec::new();

    for entry in WalkDir::new(input_root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by(|a, b| {
            a.file_name()
                .to_string_lossy()
                .to_lowercase()
                .cmp(&b.file_name().to_string_lossy().to_lowercase())
        })
    {
        let entry = entry
            .map_err(|e| crate::Error::other(format!("{}: {}", input_root.display(), e)))?;
        if entry.file_type().is_dir() {
            folders.push(entry.into_path());
        } else {
            tracing::debug!("Ignoring file in input root: {}", entry.path().display());
        }
    }

    Ok(folders)
}

/// Generate a plan with default configuration (convenience function).
pub fn generate_plan(input_root: &Path, output_root: &Path) -> Result<Plan> {
    let mut stats = OperationStats::default();
    Planner::new().generate(input_root, output_root, &mut stats, &mut TracingObserver)
}

/// Check that no two entries share a destination.
pub fn validate_plan(plan: &Plan) -> Result<()> {
    let mut seen: HashMap<&Path, &Path> = HashMap::new();
    let mut duplicates = Vec::new();

    for entry in &plan.entries {
        if let Some(first) = seen.insert(&entry.destination_path, &entry.source_path) {
            duplicates.push(format!(
                "{} and {} both target {}",
                first.display(),
                entry.source_path.display(),
                entry.destination_path.display()
            ));
        }
    }

    if duplicates.is_empty() {
        Ok(())
    } else {
        Err(crate::Error::PlanValidationError(duplicates.join("; ")))
    }
}

/// Save a plan to a JSON file.
pub fn save_plan(plan: &Plan, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(plan)?;

    // Create parent directory if needed
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut file = fs::File::create(path)?;
    file.write_all(json.as_bytes())?;

    tracing::info!("Plan saved to {:?}", path);
    Ok(())
}

/// Load a plan from a JSON file.
pub fn load_plan(path: &Path) -> Result<Plan> {
    let content = fs::read_to_string(path)?;
    let plan: Plan = serde_json::from_str(&content)
        .map_err(|e| crate::Error::InvalidPlanFile(format!("{}: {}", path.display(), e)))?;
    Ok(plan)
}

/// Get the default plan output path inside `output_root`.
pub fn default_plan_path(output_root: &Path) -> PathBuf {
    let filename = format!("plan_{}.json", Utc::now().format("%Y%m%d_%H%M%S"));
    output_root.join(filename)
}

/// Save plan to the sessions directory.
pub fn save_to_sessions(plan: &Plan, sessions_dir: &Path) -> Result<PathBuf> {
    let session_id = format!(
        "{}_{}",
        Utc::now().format("%Y%m%d_%H%M%S"),
        &Uuid::new_v4().to_string()[..8]
    );

    let session_dir = sessions_dir.join(&session_id);
    fs::create_dir_all(&session_dir)?;

    let plan_path = session_dir.join("plan.json");
    save_plan(plan, &plan_path)?;

    tracing::info!("Session saved: {}", session_id);
    Ok(session_dir)
}
