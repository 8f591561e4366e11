//! Error types for loading benchmark results.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a JMH result file.
#[derive(Debug, Error)]
pub enum CompareError {
    /// The file could not be opened or read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON.
    #[error("failed to parse {} as JSON: {source}", path.display())]
    Parse {
        /// File that was being parsed.
        path: PathBuf,
        /// JSON syntax error.
        #[source]
        source: serde_json::Error,
    },

    /// The JSON is well-formed but does not match the JMH result schema.
    #[error("{} is not a JMH result array: {source}", path.display())]
    Schema {
        /// File that was being parsed.
        path: PathBuf,
        /// Deserialization error naming the offending field.
        #[source]
        source: serde_json::Error,
    },
}

impl CompareError {
    /// Path of the file that failed to load.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } | Self::Schema { path, .. } => path,
        }
    }
}

/// Result type for loading operations.
pub type Result<T> = std::result::Result<T, CompareError>;
