//! Timestamped action log
//!
//! Every applied mutation produces one line of fixed shape:
//!
//! ```text
//! [HH:MM:SS] Created <target_path> to <target_root>
//! [HH:MM:SS] Updated <target_path> to <target_root>
//! [HH:MM:SS] Removed <target_path> from <target_root>
//! ```
//!
//! Lines are appended to a durable log file and mirrored to stdout. The file
//! is opened per cycle and flushed by [`ActionLog::finish`], or on drop when
//! a cycle is abandoned.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::actions::ActionVerb;
use crate::error::{Result, SyncError};

/// Shape of the timestamp at the start of each log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimestampFormat {
    /// `HH:MM:SS`
    #[default]
    Time,
    /// `YYYY-MM-DD HH:MM:SS`, unambiguous across midnight
    DateTime,
}

impl TimestampFormat {
    /// Render `at` in this format
    #[must_use]
    pub fn render(self, at: &DateTime<Local>) -> String {
        match self {
            Self::Time => at.format("%H:%M:%S").to_string(),
            Self::DateTime => at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// One logged mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRecord {
    /// Logged verb
    pub verb: ActionVerb,
    /// Mutated path
    pub path: PathBuf,
    /// Formatted log line, without trailing newline
    pub line: String,
}

/// Durable and console sinks for action records
pub struct ActionLog {
    sink: Option<(PathBuf, BufWriter<File>)>,
    console: bool,
    dry_run: bool,
    stamp: TimestampFormat,
}

impl ActionLog {
    /// Open `path` for appending, creating it and its parent directories
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::LogSink`] if the file cannot be opened.
    pub fn open(path: &Path, stamp: TimestampFormat) -> Result<Self> {
        let to_sink_error = |source| SyncError::LogSink {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(to_sink_error)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(to_sink_error)?;

        Ok(Self {
            sink: Some((path.to_path_buf(), BufWriter::new(file))),
            console: true,
            dry_run: false,
            stamp,
        })
    }

    /// Log that only writes to the console
    #[must_use]
    pub const fn console_only(stamp: TimestampFormat) -> Self {
        Self {
            sink: None,
            console: true,
            dry_run: false,
            stamp,
        }
    }

    /// Enable or disable mirroring to stdout
    #[must_use]
    pub const fn with_console(mut self, console: bool) -> Self {
        self.console = console;
        self
    }

    /// Mark console lines as previews
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Format one line
    #[must_use]
    pub fn format_line(
        &self,
        at: &DateTime<Local>,
        verb: ActionVerb,
        target_path: &Path,
        target_root: &Path,
    ) -> String {
        format!(
            "[{}] {verb} {} {} {}",
            self.stamp.render(at),
            target_path.display(),
            verb.preposition(),
            target_root.display()
        )
    }

    /// Write a record to every sink
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::LogSink`] if the durable sink cannot be written.
    pub fn record(
        &mut self,
        at: &DateTime<Local>,
        verb: ActionVerb,
        target_path: &Path,
        target_root: &Path,
    ) -> Result<ActionRecord> {
        let line = self.format_line(at, verb, target_path, target_root);

        if let Some((path, writer)) = &mut self.sink {
            writeln!(writer, "{line}").map_err(|source| SyncError::LogSink {
                path: path.clone(),
                source,
            })?;
        }

        if self.console {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            // Console mirror is best effort; a closed stdout must not abort the cycle
            let _ = if self.dry_run {
                writeln!(out, "[DRY RUN] {line}")
            } else {
                writeln!(out, "{line}")
            };
        }

        debug!("{line}");

        Ok(ActionRecord {
            verb,
            path: target_path.to_path_buf(),
            line,
        })
    }

    /// Record with the current local time
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::LogSink`] if the durable sink cannot be written.
    pub fn record_now(
        &mut self,
        verb: ActionVerb,
        target_path: &Path,
        target_root: &Path,
    ) -> Result<ActionRecord> {
        self.record(&Local::now(), verb, target_path, target_root)
    }

    /// Flush and close the durable sink
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::LogSink`] if buffered lines cannot be flushed.
    pub fn finish(mut self) -> Result<()> {
        if let Some((path, mut writer)) = self.sink.take() {
            writer
                .flush()
                .map_err(|source| SyncError::LogSink { path, source })?;
        }
        Ok(())
    }
}
