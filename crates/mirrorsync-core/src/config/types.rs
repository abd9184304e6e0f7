//! Configuration types and structures

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::comparison::CompareMethod;
use crate::sync::TimestampFormat;

/// Interval between reconciliation cycles when none is configured
pub const DEFAULT_INTERVAL_SECS: u64 = 300;

/// Main configuration structure
///
/// Optional scalar fields stay `None` until some file or flag sets them, so
/// merging can tell "unset" apart from "set to the default".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Gitignore-style patterns excluded from both trees
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,

    /// Patterns re-included after exclusion
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,

    /// Seconds between cycles in `run` mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval_secs: Option<u64>,

    /// Content comparison method
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compare: Option<CompareMethod>,

    /// Timestamp shape in action log lines
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<TimestampFormat>,

    /// Durable action log file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,

    /// Classify and log without mutating the target
    #[serde(default)]
    pub dry_run: bool,
}

impl Config {
    /// Effective interval between cycles
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.unwrap_or(DEFAULT_INTERVAL_SECS))
    }

    /// Effective comparison method
    #[must_use]
    pub fn compare_method(&self) -> CompareMethod {
        self.compare.unwrap_or_default()
    }

    /// Effective timestamp format
    #[must_use]
    pub fn timestamp_format(&self) -> TimestampFormat {
        self.timestamp.unwrap_or_default()
    }
}
