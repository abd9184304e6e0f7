use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using [`SyncError`]
pub type Result<T> = std::result::Result<T, SyncError>;

/// Errors surfaced by a reconciliation cycle or by configuration loading
#[derive(Debug, Error)]
pub enum SyncError {
    /// A scan root does not exist
    #[error("Root directory not found: {}", path.display())]
    RootNotFound {
        /// Missing root
        path: PathBuf,
    },

    /// A scan root exists but is not a directory
    #[error("Not a directory: {}", path.display())]
    NotADirectory {
        /// Offending root
        path: PathBuf,
    },

    /// A scan root exists but its metadata cannot be read
    #[error("Failed to read root {}: {source}", path.display())]
    RootUnreadable {
        /// Unreadable root
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Traversal of a tree failed part-way; the snapshot is discarded
    #[error("Failed to scan {}: {source}", root.display())]
    Scan {
        /// Root being scanned
        root: PathBuf,
        /// Underlying traversal error
        #[source]
        source: walkdir::Error,
    },

    /// A filesystem mutation failed; the rest of the cycle is abandoned
    #[error("Failed to {op} {}: {source}", path.display())]
    Apply {
        /// Operation being attempted (e.g. "copy file to")
        op: &'static str,
        /// Path the operation targeted
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The durable action log could not be opened or written
    #[error("Failed to write action log {}: {source}", path.display())]
    LogSink {
        /// Log file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A configuration file could not be read
    #[error("Failed to read config file {}: {source}", path.display())]
    ConfigRead {
        /// Config file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A configuration file is not valid TOML for [`crate::config::Config`]
    #[error("Failed to parse config file {}: {source}", path.display())]
    ConfigParse {
        /// Config file path
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: toml::de::Error,
    },

    /// An exclusion or inclusion pattern does not compile
    #[error("Invalid pattern '{pattern}': {source}")]
    Pattern {
        /// The pattern as written
        pattern: String,
        /// Underlying matcher error
        #[source]
        source: ignore::Error,
    },

    /// Semantically invalid configuration or root layout
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl SyncError {
    pub(crate) fn apply(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Apply {
            op,
            path: path.into(),
            source,
        }
    }
}
