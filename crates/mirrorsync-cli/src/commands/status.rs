use std::path::Path;

use anyhow::Context;

use crate::commands::SyncOptions;

pub struct Status;

impl Status {
    pub fn execute(source: &Path, target: &Path, options: &SyncOptions) -> anyhow::Result<()> {
        let config = options.load_config()?;
        let engine = options.engine(source, target, None, &config)?;

        let plan = engine.plan().context("Failed to compare trees")?;

        println!("Source: {}", plan.source.root().display());
        println!("Target: {}", plan.target.root().display());

        for skipped in plan.source.skipped().iter().chain(plan.target.skipped()) {
            println!("Skipping {}", skipped.display());
        }

        if plan.actions.is_empty() {
            println!("\n✓ Already in sync ({} entries)", plan.source.len());
            return Ok(());
        }

        println!("\nPending actions ({}):", plan.actions.len());
        for action in &plan.actions {
            println!("  {action}");
        }

        Ok(())
    }
}
