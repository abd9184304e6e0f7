//! Configuration file parsing, merging, and validation
//!
//! This module handles:
//! - Config file discovery from multiple locations
//! - TOML parsing with serde
//! - Config merging with precedence rules
//! - Validation and error reporting

mod discovery;
mod merge;
mod types;
mod validation;


use std::path::Path;

pub use discovery::{ConfigDiscovery, ConfigFiles, LOCAL_CONFIG_NAME, PROJECT_CONFIG_NAME};
pub use merge::ConfigMerger;
pub use types::{Config, DEFAULT_INTERVAL_SECS};
pub use validation::ConfigValidator;

use crate::error::Result;

/// Coordinates discovery, parsing, merging, and validation
pub struct ConfigManager;

impl ConfigManager {
    /// Load and merge configuration from all discovered sources
    ///
    /// # Errors
    ///
    /// Returns an error if config files are invalid or cannot be read.
    pub fn load(cli_config_path: Option<&Path>) -> Result<Config> {
        Self::load_files(&ConfigDiscovery::discover(cli_config_path))
    }

    /// Load and merge an explicit set of config files
    ///
    /// # Errors
    ///
    /// Returns an error if config files are invalid or cannot be read.
    pub fn load_files(files: &ConfigFiles) -> Result<Config> {
        let merged = ConfigMerger::merge(files)?;
        ConfigValidator::validate(&merged)?;
        Ok(merged)
    }
}
