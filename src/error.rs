use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while serving a county data lookup.
///
/// The variants fall into three families:
/// - client input errors (HTTP 400), returned with a fixed message
/// - configuration errors (database file missing), surfaced as HTTP 500
/// - runtime errors (SQLite or filesystem failures), surfaced as HTTP 500
#[derive(Debug, Error)]
pub enum LookupError {
    /// Request body is not valid JSON
    #[error("Invalid JSON")]
    InvalidJson,

    /// ZIP code is not exactly 5 digits after stripping non-digits
    #[error("Invalid zip code")]
    InvalidZip,

    /// Measure name is not in the allow-list after normalization
    #[error("Invalid measure name")]
    InvalidMeasure,

    /// No candidate location holds the database file
    #[error("{file_name} not found (searched: {})", display_paths(.searched))]
    DatabaseNotFound {
        file_name: String,
        searched: Vec<PathBuf>,
    },

    /// Error from SQLite while opening or querying the database
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Filesystem error while resolving the database location
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Result rows could not be serialized
    #[error("Failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

impl LookupError {
    /// Whether the caller can fix this error by changing the request.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            LookupError::InvalidJson | LookupError::InvalidZip | LookupError::InvalidMeasure
        )
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "no candidate locations".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
