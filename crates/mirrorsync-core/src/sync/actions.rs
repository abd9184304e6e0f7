//! Reconciliation actions

use std::fmt;
use std::path::{Path, PathBuf};

use crate::scanner::{EntryKind, PathEntry, RelativeKey};

/// Verb an action is logged under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionVerb {
    /// Entry added to the target
    Created,
    /// Entry content or type replaced in the target
    Updated,
    /// Entry removed from the target
    Removed,
}

impl ActionVerb {
    /// Word joining the path and the root in a log line
    #[must_use]
    pub const fn preposition(self) -> &'static str {
        match self {
            Self::Created | Self::Updated => "to",
            Self::Removed => "from",
        }
    }
}

impl fmt::Display for ActionVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Created => "Created",
            Self::Updated => "Updated",
            Self::Removed => "Removed",
        })
    }
}

/// One mutation needed to bring the target in line with the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconciliationAction {
    /// Key missing from the target: make the directory or copy the file
    Create {
        /// Relative location
        key: RelativeKey,
        /// Source entry to reproduce
        source: PathEntry,
    },
    /// Both sides are files with different contents: overwrite the target
    UpdateContent {
        /// Relative location
        key: RelativeKey,
        /// Source file to copy
        source: PathEntry,
    },
    /// Same key, different kinds: remove the target entry and recreate it
    /// with the source's kind
    ResolveTypeMismatch {
        /// Relative location
        key: RelativeKey,
        /// Source entry to reproduce
        source: PathEntry,
    },
    /// Key missing from the source: remove it (recursively for directories)
    Delete {
        /// Relative location
        key: RelativeKey,
        /// Kind of the stale target entry
        kind: EntryKind,
    },
}

impl ReconciliationAction {
    /// Relative location the action targets
    #[must_use]
    pub const fn key(&self) -> &RelativeKey {
        match self {
            Self::Create { key, .. }
            | Self::UpdateContent { key, .. }
            | Self::ResolveTypeMismatch { key, .. }
            | Self::Delete { key, .. } => key,
        }
    }

    /// Verb used when logging the action
    #[must_use]
    pub const fn verb(&self) -> ActionVerb {
        match self {
            Self::Create { .. } => ActionVerb::Created,
            Self::UpdateContent { .. } | Self::ResolveTypeMismatch { .. } => ActionVerb::Updated,
            Self::Delete { .. } => ActionVerb::Removed,
        }
    }

    /// Absolute path the action mutates under `target_root`
    #[must_use]
    pub fn target_path(&self, target_root: &Path) -> PathBuf {
        self.key().to_path_under(target_root)
    }

    /// Whether the action removes a target entry without replacing it
    #[must_use]
    pub const fn is_deletion(&self) -> bool {
        matches!(self, Self::Delete { .. })
    }
}

impl fmt::Display for ReconciliationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create { key, source } => write!(f, "create {} {key}", source.kind),
            Self::UpdateContent { key, .. } => write!(f, "update file {key}"),
            Self::ResolveTypeMismatch { key, source } => {
                write!(f, "replace {key} with {}", source.kind)
            }
            Self::Delete { key, kind } => write!(f, "delete {kind} {key}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_entry(key: &str) -> PathEntry {
        PathEntry {
            path: PathBuf::from("/source").join(key),
            kind: EntryKind::File,
            key: RelativeKey::from_relative(key),
            size: 1,
        }
    }

    #[test]
    fn test_verbs_and_prepositions() {
        let entry = file_entry("a.txt");
        let key = entry.key.clone();

        let create = ReconciliationAction::Create {
            key: key.clone(),
            source: entry.clone(),
        };
        let mismatch = ReconciliationAction::ResolveTypeMismatch {
            key: key.clone(),
            source: entry,
        };
        let delete = ReconciliationAction::Delete {
            key,
            kind: EntryKind::Directory,
        };

        assert_eq!(create.verb(), ActionVerb::Created);
        assert_eq!(mismatch.verb(), ActionVerb::Updated);
        assert_eq!(delete.verb(), ActionVerb::Removed);
        assert_eq!(ActionVerb::Updated.preposition(), "to");
        assert_eq!(ActionVerb::Removed.preposition(), "from");
        assert!(delete.is_deletion());
    }

    #[test]
    fn test_target_path() {
        let action = ReconciliationAction::Delete {
            key: RelativeKey::from_relative("a/b.txt"),
            kind: EntryKind::File,
        };

        assert_eq!(
            action.target_path(Path::new("/mirror")),
            Path::new("/mirror").join("a").join("b.txt")
        );
        assert_eq!(action.to_string(), "delete file a/b.txt");
    }
}
