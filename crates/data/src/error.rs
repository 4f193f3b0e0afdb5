use std::path::PathBuf;
use thiserror::Error;

/// Errors from reading or writing persisted draw history.
#[derive(Error, Debug)]
pub enum HistoryError {
    /// The history file does not exist.
    #[error("history file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// IO error reading/writing file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writer error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
