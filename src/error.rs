//! Error types for the show organizer.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the show organizer.
///
/// Only fatal conditions travel through this type. Skips, warnings, planning
/// errors and per-file move failures are recorded as data in the plan and
/// execution report instead.
#[derive(Error, Debug)]
pub enum Error {
    // File system errors
    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("File already exists: {0}")]
    FileAlreadyExists(String),

    // Plan/Execute errors
    #[error("Invalid plan file: {0}")]
    InvalidPlanFile(String),

    #[error("Plan validation failed: {0}")]
    PlanValidationError(String),

    #[error("Execute operation failed: {0}")]
    ExecuteError(String),

    #[error("Checksum mismatch after copying: {0}")]
    ChecksumMismatch(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Generic errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a string.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }
}
