use anyhow::Context;
use mirrorsync_core::config::ConfigDiscovery;

use crate::commands::SyncOptions;

pub struct Config;

impl Config {
    pub fn execute(options: &SyncOptions) -> anyhow::Result<()> {
        println!("Config files (lowest to highest precedence):");
        if options.no_config {
            println!("  (disabled by --no-config)");
        } else {
            let files = ConfigDiscovery::discover(options.config_path);
            let mut any = false;
            for path in files.in_merge_order() {
                println!("  {}", path.display());
                any = true;
            }
            if !any {
                println!("  (none found)");
            }
        }

        let config = options.load_config()?;
        let rendered =
            toml::to_string_pretty(&config).context("Failed to render configuration")?;

        println!("\nEffective configuration:");
        println!("{rendered}");
        println!("# interval: {}s", config.interval().as_secs());

        Ok(())
    }
}
