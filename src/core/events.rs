//! Structured events emitted while planning and executing.
//!
//! The engine never writes to the console. Callers receive events through an
//! [`OrganizeObserver`] and decide how to present them.

use crate::models::media::FolderStructure;
use std::path::PathBuf;

/// Something that happened during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrganizeEvent {
    ShowStarted {
        name: String,
        path: PathBuf,
        structure: FolderStructure,
    },
    ShowSkipped {
        path: PathBuf,
        reason: String,
    },
    SeasonPlanned {
        show: String,
        season: u16,
        episodes: usize,
    },
    Warning {
        path: PathBuf,
        message: String,
    },
    PlanningError {
        path: PathBuf,
        reason: String,
    },
    FileMoved {
        from: PathBuf,
        to: PathBuf,
    },
    MoveFailed {
        path: PathBuf,
        reason: String,
    },
    Cancelled {
        remaining: usize,
    },
}

/// Receiver for [`OrganizeEvent`]s.
pub trait OrganizeObserver {
    fn on_event(&mut self, event: &OrganizeEvent);
}

/// Forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl OrganizeObserver for TracingObserver {
    fn on_event(&mut self, event: &OrganizeEvent) {
        match event {
            OrganizeEvent::ShowStarted {
                name, structure, ..
            } => tracing::info!("Processing show: {} ({})", name, structure),
            OrganizeEvent::ShowSkipped { path, reason } => {
                tracing::warn!("Skipped {}: {}", path.display(), reason)
            }
            OrganizeEvent::SeasonPlanned {
                show,
                season,
                episodes,
            } => tracing::info!("  {} season {}: {} episodes", show, season, episodes),
            OrganizeEvent::Warning { path, message } => {
                tracing::warn!("{}: {}", path.display(), message)
            }
            OrganizeEvent::PlanningError { path, reason } => {
                tracing::error!("Planning error for {}: {}", path.display(), reason)
            }
            OrganizeEvent::FileMoved { from, to } => {
                tracing::info!("Moved {} -> {}", from.display(), to.display())
            }
            OrganizeEvent::MoveFailed { path, reason } => {
                tracing::error!("Failed to move {}: {}", path.display(), reason)
            }
            OrganizeEvent::Cancelled { remaining } => {
                tracing::warn!("Cancelled with {} entries left", remaining)
            }
        }
    }
}

/// Drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl OrganizeObserver for NullObserver {
    fn on_event(&mut self, _event: &OrganizeEvent) {}
}

/// Keeps every event in memory.
#[derive(Debug, Default, Clone)]
pub struct CollectingObserver {
    pub events: Vec<OrganizeEvent>,
}

impl OrganizeObserver for CollectingObserver {
    fn on_event(&mut self, event: &OrganizeEvent) {
        self.events.push(event.clone());
    }
}
