use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;

use anyhow::Context;
use chrono::Local;
use mirrorsync_core::config::ConfigValidator;
use mirrorsync_core::sync::SyncReporter;
use tracing::{debug, error, info};

use crate::commands::SyncOptions;

pub struct Run;

impl Run {
    /// Run cycles until Ctrl+C
    ///
    /// The first Ctrl+C stops the loop once the current cycle has finished;
    /// a second one exits immediately with status 130.
    pub fn execute(
        source: &Path,
        target: &Path,
        log_file: Option<&Path>,
        interval: Option<u64>,
        options: &SyncOptions,
    ) -> anyhow::Result<()> {
        let mut config = options.load_config()?;
        if interval.is_some() {
            config.interval_secs = interval;
            ConfigValidator::validate(&config).context("Invalid interval")?;
        }
        let interval = config.interval();
        let stamp = config.timestamp_format();

        let engine = options.engine(source, target, log_file, &config)?;

        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let stopping = AtomicBool::new(false);
        ctrlc::set_handler(move || {
            if stopping.swap(true, Ordering::SeqCst) {
                eprintln!("\n\nInterrupted by user (Ctrl+C)");
                std::process::exit(130);
            }
            eprintln!("\nStopping after the current cycle (Ctrl+C again to force)");
            // Receiver only goes away when the loop has already ended
            let _ = stop_tx.send(());
        })
        .context("Failed to set Ctrl+C handler")?;

        info!(
            "Mirroring {} into {} every {}s",
            source.display(),
            target.display(),
            interval.as_secs()
        );

        loop {
            match engine.run_cycle() {
                Ok(report) => {
                    debug!("{}", SyncReporter::generate_summary(&report));
                    info!("Sync completed at {}", stamp.render(&Local::now()));
                }
                Err(e) => error!("Sync cycle failed: {e}"),
            }

            match stop_rx.recv_timeout(interval) {
                Err(mpsc::RecvTimeoutError::Timeout) => {}
                Ok(()) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
            }
        }

        info!("Stopped");
        Ok(())
    }
}
