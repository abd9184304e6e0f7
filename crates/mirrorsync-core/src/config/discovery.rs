//! Configuration file discovery from multiple locations

use std::path::{Path, PathBuf};

/// Project-local override file name
pub const LOCAL_CONFIG_NAME: &str = ".mirrorsync.local.toml";
/// Project file name
pub const PROJECT_CONFIG_NAME: &str = ".mirrorsync.toml";

/// Configuration file locations in order of precedence
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigFiles {
    /// Config from CLI flag (highest precedence)
    pub cli: Option<PathBuf>,
    /// Project-local config (`.mirrorsync.local.toml`)
    pub local: Option<PathBuf>,
    /// Project config (`.mirrorsync.toml`)
    pub project: Option<PathBuf>,
    /// Global XDG config
    pub global: Option<PathBuf>,
}

impl ConfigFiles {
    /// Discovered files from lowest to highest precedence
    pub fn in_merge_order(&self) -> impl Iterator<Item = &Path> {
        [&self.global, &self.project, &self.local, &self.cli]
            .into_iter()
            .filter_map(|p| p.as_deref())
    }
}

/// Config file discovery
pub struct ConfigDiscovery;

impl ConfigDiscovery {
    /// Discover all available configuration files
    ///
    /// An explicit CLI path is always returned, even if missing, so that
    /// loading reports it instead of silently falling back.
    #[must_use]
    pub fn discover(cli_path: Option<&Path>) -> ConfigFiles {
        ConfigFiles {
            cli: cli_path.map(Path::to_path_buf),
            local: Self::find_file(LOCAL_CONFIG_NAME),
            project: Self::find_file(PROJECT_CONFIG_NAME),
            global: Self::find_global_config(),
        }
    }

    /// Find a config file in the current directory or parent directories
    fn find_file(name: &str) -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            let candidate = current.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Find global config in XDG config directory
    fn find_global_config() -> Option<PathBuf> {
        let global_config = dirs::config_dir()?.join("mirrorsync").join("config.toml");

        global_config.is_file().then_some(global_config)
    }
}
