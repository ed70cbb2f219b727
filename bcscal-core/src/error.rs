//! Error types for bcscal.

use thiserror::Error;

/// Errors that can occur while loading the catalog or reconciling a category.
#[derive(Error, Debug)]
pub enum BcsError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Category not found: {name} (available: {available})")]
    CategoryNotFound { name: String, available: String },

    #[error("Could not parse '{input}': {reason}")]
    Parse { input: String, reason: String },

    #[error("Local time {0} does not exist in {1} (skipped by a DST transition)")]
    NonexistentLocalTime(String, String),

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    #[error("Calendar service error: {0}")]
    Calendar(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BcsError {
    pub(crate) fn parse(input: &str, reason: impl Into<String>) -> Self {
        BcsError::Parse {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for bcscal operations.
pub type BcsResult<T> = Result<T, BcsError>;
