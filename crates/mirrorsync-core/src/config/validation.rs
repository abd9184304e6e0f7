//! Configuration validation and error reporting

use super::types::Config;
use crate::error::{Result, SyncError};
use crate::scanner::EntryFilter;

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(config: &Config) -> Result<()> {
        if config.interval_secs == Some(0) {
            return Err(SyncError::Config(
                "interval_secs must be greater than zero".to_string(),
            ));
        }

        if config.exclude.iter().any(|p| p.trim().is_empty()) {
            return Err(SyncError::Config(
                "Exclude pattern cannot be empty".to_string(),
            ));
        }

        if config.include.iter().any(|p| p.trim().is_empty()) {
            return Err(SyncError::Config(
                "Include pattern cannot be empty".to_string(),
            ));
        }

        if config
            .log_file
            .as_ref()
            .is_some_and(|p| p.as_os_str().is_empty())
        {
            return Err(SyncError::Config("log_file cannot be empty".to_string()));
        }

        // Patterns must compile
        EntryFilter::with_patterns(&config.exclude, &config.include)?;

        Ok(())
    }
}
