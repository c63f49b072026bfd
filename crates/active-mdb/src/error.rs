//! Error types for active-mdb.
//!
//! Configuration mistakes fail fast with [`MdbError::Config`]. Anything the
//! external mdbtools binaries report is surfaced as [`MdbError::ToolFailed`]
//! without further interpretation.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the active-mdb library.
#[derive(Debug, Error)]
pub enum MdbError {
    // Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid table pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Unknown format: {format}")]
    UnknownFormat { format: String },

    #[error("Unknown backend: {backend}")]
    UnknownBackend { backend: String },

    // Data source errors
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("mdbtools does not think a table named \"{table}\" exists")]
    TableNotFound { table: String },

    // Upstream tool errors
    #[error("{tool} failed: {message}")]
    ToolFailed { tool: String, message: String },

    // File system errors
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    // Serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },
}

/// Result type alias for active-mdb operations.
pub type Result<T> = std::result::Result<T, MdbError>;

impl From<std::io::Error> for MdbError {
    fn from(err: std::io::Error) -> Self {
        MdbError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for MdbError {
    fn from(err: serde_json::Error) -> Self {
        MdbError::Json {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl MdbError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        MdbError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// Create a tool failure for the named mdbtools binary.
    pub fn tool(tool: impl Into<String>, message: impl Into<String>) -> Self {
        MdbError::ToolFailed {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Whether this error stems from caller configuration rather than the data source.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            MdbError::Config { .. }
                | MdbError::InvalidPattern { .. }
                | MdbError::UnknownFormat { .. }
                | MdbError::UnknownBackend { .. }
        )
    }

    /// Whether this error was reported by (or while running) an external tool.
    pub fn is_upstream_failure(&self) -> bool {
        matches!(
            self,
            MdbError::ToolFailed { .. } | MdbError::FileNotFound(_) | MdbError::Io { .. }
        )
    }
}
