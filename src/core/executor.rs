//! Plan executor module.
//!
//! Applies the moves recorded in a plan. Each entry either succeeds or is
//! recorded as a failure; one bad entry never stops the rest.

use crate::core::events::{OrganizeEvent, OrganizeObserver};
use crate::core::planner::validate_plan;
use crate::models::config::OrganizerConfig;
use crate::models::plan::{ExecutionReport, OperationStats, Plan, PlanEntry, PlanIssue};
use crate::utils::hash;
use crate::Result;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Executor configuration.
#[derive(Debug, Clone)]
pub struct MoverConfig {
    /// Verify checksums when a move has to fall back to copy + delete.
    pub verify_checksum: bool,
}

impl Default for MoverConfig {
    fn default() -> Self {
        Self {
            verify_checksum: true,
        }
    }
}

impl From<&OrganizerConfig> for MoverConfig {
    fn from(config: &OrganizerConfig) -> Self {
        Self {
            verify_checksum: config.verify_checksum,
        }
    }
}

/// Moves files according to a plan.
#[derive(Debug, Clone, Default)]
pub struct FileMover {
    config: MoverConfig,
    cancel: Option<Arc<AtomicBool>>,
}

impl FileMover {
    /// Create a new mover with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new mover with custom configuration.
    pub fn with_config(config: MoverConfig) -> Self {
        Self {
            config,
            cancel: None,
        }
    }

    /// Stop between entries once `flag` is set.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }

    /// Execute every entry of `plan` in order.
    ///
    /// Returns an error only when the plan itself is invalid. Per-entry
    /// failures end up in the report and in `stats.errors`.
    pub fn execute(
        &self,
        plan: &Plan,
        stats: &mut OperationStats,
        observer: &mut dyn OrganizeObserver,
    ) -> Result<ExecutionReport> {
        validate_plan(plan)?;

        let total = plan.entries.len();
        tracing::info!("Executing {} moves", total);

        let mut report = ExecutionReport::default();

        for (idx, entry) in plan.entries.iter().enumerate() {
            if self.is_cancelled() {
                let remaining = total - idx;
                tracing::warn!("Cancellation requested, {} moves not attempted", remaining);
                observer.on_event(&OrganizeEvent::Cancelled { remaining });
                report.cancelled = true;
                break;
            }

            tracing::debug!(
                "Execute [{}/{}]: {}",
                idx + 1,
                total,
                entry.destination_path.display()
            );

            match self.move_entry(entry) {
                Ok(()) => {
                    stats.moved += 1;
                    observer.on_event(&OrganizeEvent::FileMoved {
                        from: entry.source_path.clone(),
                        to: entry.destination_path.clone(),
                    });
                    report.moved.push(entry.clone());
                }
                Err(e) => {
                    let issue = PlanIssue::new(&entry.source_path, e.to_string());
                    stats.errors += 1;
                    observer.on_event(&OrganizeEvent::MoveFailed {
                        path: issue.path.clone(),
                        reason: issue.reason.clone(),
                    });
                    report.failed.push(issue);
                }
            }
        }

        tracing::info!(
            "Execution finished: {} moved, {} failed{}",
            report.moved.len(),
            report.failed.len(),
            if report.cancelled { " (cancelled)" } else { "" }
        );

        Ok(report)
    }

    fn move_entry(&self, entry: &PlanEntry) -> Result<()> {
        let from = &entry.source_path;
        let to = &entry.destination_path;

        if !from.exists() {
            return Err(crate::Error::PathNotFound(from.display().to_string()));
        }
        if to.exists() {
            return Err(crate::Error::FileAlreadyExists(to.display().to_string()));
        }

        // Create parent directory if needed
        if let Some(parent) = to.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        // Try atomic rename first (same filesystem, instant)
        match fs::rename(from, to) {
            Ok(()) => {
                tracing::debug!("Moved (rename): {:?} -> {:?}", from, to);
                return Ok(());
            }
            Err(e) if e.kind() == std::io::ErrorKind::CrossesDevices => {
                tracing::debug!("Cross-filesystem move detected, using copy+delete");
            }
            Err(e) => {
                return Err(crate::Error::ExecuteError(format!(
                    "failed to move {:?}: {}",
                    from, e
                )));
            }
        }

        self.copy_and_remove(from, to)
    }

    fn copy_and_remove(&self, from: &Path, to: &Path) -> Result<()> {
        let checksum = if self.config.verify_checksum {
            Some(hash::sha256_file(from)?)
        } else {
            None
        };

        if let Err(e) = fs::copy(from, to) {
            discard_copy(to);
            return Err(e.into());
        }

        if let Some(original) = checksum {
            let copied = match hash::sha256_file(to) {
                Ok(copied) => copied,
                Err(e) => {
                    discard_copy(to);
                    return Err(e);
                }
            };
            if original != copied {
                discard_copy(to);
                return Err(crate::Error::ChecksumMismatch(to.display().to_string()));
            }
        }

        // The source must not survive next to its copy.
        if let Err(e) = fs::remove_file(from) {
            discard_copy(to);
            return Err(crate::Error::ExecuteError(format!(
                "failed to remove {:?} after copying: {}",
                from, e
            )));
        }

        tracing::debug!("Moved (copy+delete): {:?} -> {:?}", from, to);
        Ok(())
    }
}

/// Remove a copy that did not complete the move.
fn discard_copy(to: &Path) {
    if let Err(e) = fs::remove_file(to) {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!("Failed to remove partial copy {:?}: {}", to, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mover_config_default() {
        let config = MoverConfig::default();
        assert!(config.verify_checksum);
    }

    #[test]
    fn test_execute_empty_plan() {
        let plan = Plan::default();
        let mut stats = OperationStats::default();
        let report = FileMover::new()
            .execute(&plan, &mut stats, &mut crate::core::events::NullObserver)
            .unwrap();
        assert!(report.moved.is_empty());
        assert!(report.failed.is_empty());
        assert!(!report.cancelled);
    }

    #[test]
    fn test_copy_and_remove() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let from = temp_dir.path().join("a.mkv");
        let to = temp_dir.path().join("b.mkv");
        fs::write(&from, b"episode").unwrap();

        FileMover::new().copy_and_remove(&from, &to).unwrap();

        assert!(!from.exists());
        assert_eq!(fs::read(&to).unwrap(), b"episode");
    }

    #[test]
    fn test_copy_and_remove_missing_source_leaves_nothing() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let from = temp_dir.path().join("gone.mkv");
        let to = temp_dir.path().join("b.mkv");

        let mover = FileMover::with_config(MoverConfig {
            verify_checksum: false,
        });
        assert!(mover.copy_and_remove(&from, &to).is_err());
        assert!(!to.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_and_remove_undoes_copy_when_source_is_kept() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = tempfile::TempDir::new().unwrap();
        let source_dir = temp_dir.path().join("TV");
        let target_dir = temp_dir.path().join("Library");
        fs::create_dir_all(&source_dir).unwrap();
        fs::create_dir_all(&target_dir).unwrap();
        let from = source_dir.join("a.mkv");
        let to = target_dir.join("b.mkv");
        fs::write(&from, b"episode").unwrap();

        // A read-only directory refuses unlinking its entries.
        fs::set_permissions(&source_dir, fs::Permissions::from_mode(0o555)).unwrap();
        let unlink_blocked = fs::write(source_dir.join("check"), b"").is_err();

        let result = FileMover::new().copy_and_remove(&from, &to);
        fs::set_permissions(&source_dir, fs::Permissions::from_mode(0o755)).unwrap();

        if !unlink_blocked {
            // Permission bits are not enforced for this user (root).
            return;
        }
        assert!(matches!(result, Err(crate::Error::ExecuteError(_))));
        assert!(from.exists());
        assert!(!to.exists());
    }

    #[test]
    fn test_discard_copy_ignores_missing_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let to = temp_dir.path().join("never_written.mkv");
        discard_copy(&to);
        assert!(!to.exists());
    }
}
