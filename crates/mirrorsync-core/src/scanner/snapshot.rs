//! Immutable point-in-time enumeration of one tree

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::entry::{PathEntry, RelativeKey};

/// Ordered entries of one root, captured at one instant
#[derive(Debug, Clone)]
pub struct TreeSnapshot {
    root: PathBuf,
    entries: Vec<PathEntry>,
    index: HashMap<RelativeKey, usize>,
    skipped: Vec<PathBuf>,
}

impl TreeSnapshot {
    /// Build a snapshot from entries in scan order
    #[must_use]
    pub fn new(root: PathBuf, entries: Vec<PathEntry>, skipped: Vec<PathBuf>) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.key.clone(), i))
            .collect();

        Self {
            root,
            entries,
            index,
            skipped,
        }
    }

    /// Root the snapshot was taken of
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Entry at `key`, if the tree has one
    #[must_use]
    pub fn get(&self, key: &RelativeKey) -> Option<&PathEntry> {
        self.index.get(key).map(|&i| &self.entries[i])
    }

    /// Whether the tree has an entry at `key`
    #[must_use]
    pub fn contains(&self, key: &RelativeKey) -> bool {
        self.index.contains_key(key)
    }

    /// Entries in scan order
    pub fn iter(&self) -> impl Iterator<Item = &PathEntry> {
        self.entries.iter()
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the tree has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Symlinks and special files left out of the snapshot
    #[must_use]
    pub fn skipped(&self) -> &[PathBuf] {
        &self.skipped
    }
}

impl<'a> IntoIterator for &'a TreeSnapshot {
    type Item = &'a PathEntry;
    type IntoIter = std::slice::Iter<'a, PathEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
