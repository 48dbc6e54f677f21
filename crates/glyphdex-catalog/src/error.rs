//! Error types for the catalog pipeline.

use std::path::PathBuf;

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving, caching, or registering icons.
///
/// Expected conditions (a missing source file, malformed JSON, a failed
/// remote request) are absorbed at component boundaries and converted into
/// fallthrough or fallback behavior. Only `NoWorkspace` and `WriteFailure`
/// reach the registrar's public surface.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error.
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exists but its contents do not parse as a record collection.
    #[error("Malformed collection file '{path}': {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Remote request failed before producing a response.
    #[error("Network error: {0}")]
    Network(String),

    /// Remote request exceeded the configured fetch timeout.
    #[error("Remote fetch timed out")]
    Timeout,

    /// Remote host answered with a non-success status.
    #[error("HTTP {0}")]
    HttpStatus(u16),

    /// No workspace root is configured, so there is nowhere to persist
    /// a registered icon. Not retryable without opening a project.
    #[error("No workspace is open; cannot persist custom icons")]
    NoWorkspace,

    /// Persisting the collection failed. The in-memory mutation is kept;
    /// the operation may be retried.
    #[error("Failed to write collection file '{path}': {source}")]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a read I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a malformed-collection error.
    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }

    /// Create a write-failure error.
    pub fn write_failure(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteFailure {
            path: path.into(),
            source,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if let Some(status) = err.status() {
            Self::HttpStatus(status.as_u16())
        } else {
            Self::Network(err.to_string())
        }
    }
}
