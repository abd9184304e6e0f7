use std::path::Path;

use anyhow::Context;
use mirrorsync_core::sync::SyncReporter;

use crate::commands::SyncOptions;

pub struct Once;

impl Once {
    pub fn execute(
        source: &Path,
        target: &Path,
        log_file: Option<&Path>,
        options: &SyncOptions,
    ) -> anyhow::Result<()> {
        let config = options.load_config()?;
        let engine = options.engine(source, target, log_file, &config)?;

        let report = engine.run_cycle().context("Sync operation failed")?;

        if !options.quiet {
            println!("{}", SyncReporter::generate_summary(&report));
        }

        Ok(())
    }
}
