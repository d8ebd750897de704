//! Error types for the episode renamer.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the episode renamer.
#[derive(Error, Debug)]
pub enum Error {
    // File system errors
    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    // Metadata errors
    #[error("Invalid metadata file: {0}")]
    InvalidMetadataFile(String),

    #[error("Empty episode list for series: {0}")]
    EmptyEpisodeList(String),

    // Plan errors
    #[error("Invalid plan file: {0}")]
    InvalidPlanFile(String),

    #[error("Plan validation failed: {0}")]
    PlanValidationError(String),

    // Execute errors
    #[error("Execute operation failed: {0}")]
    ExecuteError(String),

    #[error("Failed to create target folder {0}: {1}")]
    FolderCreateError(String, #[source] std::io::Error),

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
