//! Filesystem mutations for reconciliation actions

use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, warn};

use super::CycleReport;
use super::actions::ReconciliationAction;
use super::journal::ActionLog;
use crate::error::{Result, SyncError};
use crate::scanner::{EntryKind, PathEntry};

/// Applies actions to the target tree in order, logging each one
pub struct ActionExecutor {
    dry_run: bool,
}

impl ActionExecutor {
    /// Create a new executor
    #[must_use]
    pub const fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Apply every action in order, stopping at the first failure
    ///
    /// Each action is logged after it succeeds. Actions applied before a
    /// failure stay applied.
    ///
    /// # Errors
    ///
    /// Returns the first filesystem or log-sink error.
    pub fn apply(
        &self,
        actions: &[ReconciliationAction],
        target_root: &Path,
        log: &mut ActionLog,
        report: &mut CycleReport,
    ) -> Result<()> {
        for action in actions {
            let dest = action.target_path(target_root);

            if !self.dry_run {
                Self::execute(action, &dest)?;
            }

            let record = log.record_now(action.verb(), &dest, target_root)?;
            report.count(action);
            report.records.push(record);
        }
        Ok(())
    }

    fn execute(action: &ReconciliationAction, dest: &Path) -> Result<()> {
        debug!("Applying {action}");

        match action {
            ReconciliationAction::Create { source, .. } => Self::materialize(source, dest),
            ReconciliationAction::UpdateContent { source, .. } => {
                Self::clear_non_directory(dest)?;
                Self::copy_file(&source.path, dest)
            }
            ReconciliationAction::ResolveTypeMismatch { source, .. } => {
                Self::remove_any(dest)?;
                Self::materialize(source, dest)
            }
            ReconciliationAction::Delete { kind, .. } => Self::remove(dest, *kind),
        }
    }

    /// Reproduce a source entry at `dest`
    fn materialize(source: &PathEntry, dest: &Path) -> Result<()> {
        Self::clear_non_directory(dest)?;
        match source.kind {
            EntryKind::Directory => fs::create_dir_all(dest)
                .map_err(|e| SyncError::apply("create directory", dest, e)),
            EntryKind::File => Self::copy_file(&source.path, dest),
        }
    }

    /// Copy file contents, creating missing parent directories first
    fn copy_file(source: &Path, dest: &Path) -> Result<()> {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| SyncError::apply("create directory", parent, e))?;
        }

        fs::copy(source, dest).map_err(|e| SyncError::apply("copy file to", dest, e))?;

        Ok(())
    }

    /// Remove a file or symlink occupying `dest`, leaving directories alone
    ///
    /// Writing through an existing symlink would modify its target, so the
    /// link itself is removed first.
    fn clear_non_directory(dest: &Path) -> Result<()> {
        match fs::symlink_metadata(dest) {
            Ok(meta) if !meta.is_dir() => {
                fs::remove_file(dest).map_err(|e| SyncError::apply("remove file", dest, e))
            }
            Ok(_) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SyncError::apply("inspect", dest, e)),
        }
    }

    /// Remove whatever is at `dest`, recursively for directories
    fn remove_any(dest: &Path) -> Result<()> {
        match fs::symlink_metadata(dest) {
            Ok(meta) if meta.is_dir() => Self::remove(dest, EntryKind::Directory),
            Ok(_) => Self::remove(dest, EntryKind::File),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SyncError::apply("inspect", dest, e)),
        }
    }

    fn remove(dest: &Path, kind: EntryKind) -> Result<()> {
        let (op, outcome) = match kind {
            EntryKind::Directory => ("remove directory", fs::remove_dir_all(dest)),
            EntryKind::File => ("remove file", fs::remove_file(dest)),
        };

        match outcome {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!("{} vanished before removal", dest.display());
                Ok(())
            }
            Err(e) => Err(SyncError::apply(op, dest, e)),
        }
    }
}
