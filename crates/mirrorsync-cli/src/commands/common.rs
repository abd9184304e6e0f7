use std::path::Path;

use anyhow::Context;
use mirrorsync_core::comparison::CompareMethod;
use mirrorsync_core::config::{Config, ConfigManager, ConfigValidator};
use mirrorsync_core::sync::{SyncEngine, SyncSettings};

/// Options shared by every command
pub struct SyncOptions<'a> {
    /// Suppress console action lines
    pub quiet: bool,
    /// Preview changes without applying (dry-run)
    pub dry_run: bool,
    /// Exclusion patterns from the command line
    pub exclude: &'a [String],
    /// Comparison method from the command line
    pub compare: Option<CompareMethod>,
    /// Path to custom config file
    pub config_path: Option<&'a Path>,
    /// Skip loading all config files
    pub no_config: bool,
}

impl SyncOptions<'_> {
    /// Load config files and layer command-line flags on top
    pub fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = if self.no_config {
            Config::default()
        } else {
            ConfigManager::load(self.config_path).context("Failed to load configuration")?
        };

        // Exclusions are additive, scalar flags win
        config.exclude.extend(self.exclude.iter().cloned());
        if let Some(compare) = self.compare {
            config.compare = Some(compare);
        }
        if self.dry_run {
            config.dry_run = true;
        }

        ConfigValidator::validate(&config).context("Invalid configuration")?;

        Ok(config)
    }

    /// Build an engine for one source/target pair
    pub fn engine(
        &self,
        source: &Path,
        target: &Path,
        log_file: Option<&Path>,
        config: &Config,
    ) -> anyhow::Result<SyncEngine> {
        let mut settings = SyncSettings::from_config(source, target, config);
        if let Some(log_file) = log_file {
            settings.log_file = Some(log_file.to_path_buf());
        }
        settings.console = !self.quiet;

        SyncEngine::new(settings).context("Failed to initialize sync engine")
    }
}
