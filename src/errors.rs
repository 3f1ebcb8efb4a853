//! Unified application error type.
//! All modules (db, core, cli, export) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

/// Local validation failures. These block a submission before anything
/// reaches the repository.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("No employee selected")]
    NoEmployeeSelected,

    #[error("End time {end} must be later than start time {start}")]
    EndNotAfterStart { start: String, end: String },

    #[error("No target cells selected")]
    EmptyTargets,
}

/// Failure reported by the backing store (rejected write/read or I/O).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", .message.as_deref().unwrap_or(GENERIC_REPOSITORY_FAILURE))]
pub struct RepositoryError {
    message: Option<String>,
}

pub const GENERIC_REPOSITORY_FAILURE: &str = "The schedule store could not complete the request";

impl RepositoryError {
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            message: if message.trim().is_empty() {
                None
            } else {
                Some(message)
            },
        }
    }

    /// Failure without a message from the store.
    pub fn generic() -> Self {
        Self { message: None }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(e: rusqlite::Error) -> Self {
        RepositoryError::new(e.to_string())
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    // ---------------------------
    // Scheduling
    // ---------------------------
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Employee {0} not found")]
    EmployeeNotFound(i64),

    #[error("Shift {0} not found")]
    ShiftNotFound(i64),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid month format: {0}")]
    InvalidMonth(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("Invalid shift template: {0}")]
    InvalidTemplate(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    // ---------------------------
    // Export / snapshot errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Snapshot {0} not found")]
    SnapshotNotFound(i64),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
