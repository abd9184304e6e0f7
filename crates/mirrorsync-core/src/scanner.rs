//! Tree snapshotting
//!
//! A scan walks one root iteratively and returns an immutable
//! [`TreeSnapshot`]. Within each directory, subdirectories come first (each
//! immediately followed by its own contents), then files. Siblings are
//! ordered by name, so repeated scans of an unchanged tree are identical.
//!
//! Only regular files and directories are recorded. Symlinks and special
//! files are skipped and reported through [`TreeSnapshot::skipped`]; links
//! are never followed.

mod entry;
mod filters;
mod snapshot;

#[cfg(test)]
mod integration_tests;

use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

pub use entry::{EntryKind, PathEntry, RelativeKey};
pub use filters::EntryFilter;
pub use snapshot::TreeSnapshot;

use crate::error::{Result, SyncError};

/// Enumerates a directory tree into a [`TreeSnapshot`]
#[derive(Debug, Clone, Default)]
pub struct TreeScanner {
    filter: EntryFilter,
}

impl TreeScanner {
    /// Create a scanner that applies `filter` to every relative key
    #[must_use]
    pub const fn new(filter: EntryFilter) -> Self {
        Self { filter }
    }

    /// Snapshot every file and directory beneath `root`
    ///
    /// # Errors
    ///
    /// Returns an error if `root` is missing or not a directory, or if any
    /// part of the tree cannot be read. A failed scan yields no snapshot.
    pub fn scan(&self, root: &Path) -> Result<TreeSnapshot> {
        Self::check_root(root)?;

        let mut entries = Vec::new();
        let mut skipped = Vec::new();

        let mut walker = WalkDir::new(root)
            .follow_links(false)
            .min_depth(1)
            .sort_by(directories_first)
            .into_iter();

        while let Some(next) = walker.next() {
            let entry = next.map_err(|source| SyncError::Scan {
                root: root.to_path_buf(),
                source,
            })?;

            let Some(key) = RelativeKey::from_suffix(entry.path(), entry.depth()) else {
                warn!("Skipping {}: path shorter than its depth", entry.path().display());
                continue;
            };

            let file_type = entry.file_type();

            if file_type.is_dir() {
                if !self.filter.should_include(&key) {
                    debug!("Excluded directory {key}");
                    walker.skip_current_dir();
                    continue;
                }
                entries.push(PathEntry {
                    path: entry.into_path(),
                    kind: EntryKind::Directory,
                    key,
                    size: 0,
                });
            } else if file_type.is_file() {
                if !self.filter.should_include(&key) {
                    debug!("Excluded file {key}");
                    continue;
                }
                let size = entry
                    .metadata()
                    .map_err(|source| SyncError::Scan {
                        root: root.to_path_buf(),
                        source,
                    })?
                    .len();
                entries.push(PathEntry {
                    path: entry.into_path(),
                    kind: EntryKind::File,
                    key,
                    size,
                });
            } else {
                warn!(
                    "Skipping {} (symlink or special file)",
                    entry.path().display()
                );
                skipped.push(entry.into_path());
            }
        }

        debug!(
            "Scanned {}: {} entries, {} skipped",
            root.display(),
            entries.len(),
            skipped.len()
        );

        Ok(TreeSnapshot::new(root.to_path_buf(), entries, skipped))
    }

    fn check_root(root: &Path) -> Result<()> {
        match fs::metadata(root) {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(SyncError::NotADirectory {
                path: root.to_path_buf(),
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(SyncError::RootNotFound {
                path: root.to_path_buf(),
            }),
            Err(source) => Err(SyncError::RootUnreadable {
                path: root.to_path_buf(),
                source,
            }),
        }
    }
}

/// Directories sort before files, then by file name
fn directories_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    b.file_type()
        .is_dir()
        .cmp(&a.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}
