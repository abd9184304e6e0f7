//! Configuration merging with precedence rules
//!
//! # Merging Semantics
//!
//! - **Arrays** (`exclude`, `include`): additive, all values from all files
//! - **Optional scalars** (`interval_secs`, `compare`, `timestamp`,
//!   `log_file`): the highest-precedence file that sets one wins
//! - **Booleans** (`dry_run`): OR, any file may enable it

use std::fs;
use std::path::Path;

use super::discovery::ConfigFiles;
use super::types::Config;
use crate::error::{Result, SyncError};

/// Configuration merger
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge config files from lowest to highest precedence
    ///
    /// # Errors
    ///
    /// Returns an error if a config file cannot be read or parsed.
    pub fn merge(files: &ConfigFiles) -> Result<Config> {
        let mut merged = Config::default();

        for path in files.in_merge_order() {
            let config = Self::load(path)?;
            Self::merge_into(&mut merged, config);
        }

        Ok(merged)
    }

    /// Parse a single config file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid config TOML.
    pub fn load(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path).map_err(|source| SyncError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| SyncError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Overlay `overlay` onto `base`
    pub fn merge_into(base: &mut Config, overlay: Config) {
        base.exclude.extend(overlay.exclude);
        base.include.extend(overlay.include);

        if overlay.interval_secs.is_some() {
            base.interval_secs = overlay.interval_secs;
        }
        if overlay.compare.is_some() {
            base.compare = overlay.compare;
        }
        if overlay.timestamp.is_some() {
            base.timestamp = overlay.timestamp;
        }
        if overlay.log_file.is_some() {
            base.log_file = overlay.log_file;
        }

        base.dry_run |= overlay.dry_run;
    }
}
