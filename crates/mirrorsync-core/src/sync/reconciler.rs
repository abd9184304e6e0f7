//! Classification of two snapshots into reconciliation actions
//!
//! Classification is read-only. Pass 1 walks the source snapshot and yields
//! creates, content updates, and type-mismatch resolutions; pass 2 walks the
//! target snapshot and yields deletions. All pass-1 actions precede all
//! pass-2 actions in the result.

use tracing::debug;

use super::actions::ReconciliationAction;
use crate::comparison::FileComparator;
use crate::scanner::{EntryKind, PathEntry, TreeSnapshot};

/// Correlates a source and a target snapshot by relative key
#[derive(Debug, Clone, Copy, Default)]
pub struct Reconciler {
    comparator: FileComparator,
}

impl Reconciler {
    /// Create a reconciler that decides file equality with `comparator`
    #[must_use]
    pub const fn new(comparator: FileComparator) -> Self {
        Self { comparator }
    }

    /// Actions that turn `target` into a copy of `source`, in apply order
    #[must_use]
    pub fn reconcile(
        &self,
        source: &TreeSnapshot,
        target: &TreeSnapshot,
    ) -> Vec<ReconciliationAction> {
        let mut actions: Vec<ReconciliationAction> = source
            .iter()
            .filter_map(|entry| self.classify_source_entry(entry, target))
            .collect();

        actions.extend(
            target
                .iter()
                .filter_map(|entry| Self::classify_target_entry(entry, source)),
        );

        for action in &actions {
            debug!("Planned: {action}");
        }

        actions
    }

    /// Pass 1
    fn classify_source_entry(
        &self,
        entry: &PathEntry,
        target: &TreeSnapshot,
    ) -> Option<ReconciliationAction> {
        let key = entry.key.clone();

        let Some(existing) = target.get(&entry.key) else {
            return Some(ReconciliationAction::Create {
                key,
                source: entry.clone(),
            });
        };

        match (entry.kind, existing.kind) {
            (EntryKind::Directory, EntryKind::Directory) => None,
            (EntryKind::File, EntryKind::File) => {
                if entry.size == existing.size
                    && self.comparator.files_equal(&entry.path, &existing.path)
                {
                    None
                } else {
                    Some(ReconciliationAction::UpdateContent {
                        key,
                        source: entry.clone(),
                    })
                }
            }
            _ => Some(ReconciliationAction::ResolveTypeMismatch {
                key,
                source: entry.clone(),
            }),
        }
    }

    /// Pass 2
    ///
    /// Only the topmost stale entry of a subtree is deleted. An entry whose
    /// parent is stale goes with the parent's recursive removal; an entry
    /// whose parent is a file in the source went with the directory that
    /// pass 1 replaced.
    fn classify_target_entry(
        entry: &PathEntry,
        source: &TreeSnapshot,
    ) -> Option<ReconciliationAction> {
        if source.contains(&entry.key) {
            return None;
        }

        let covered = entry
            .key
            .parent()
            .is_some_and(|parent| source.get(&parent).is_none_or(|p| !p.is_dir()));

        if covered {
            return None;
        }

        Some(ReconciliationAction::Delete {
            key: entry.key.clone(),
            kind: entry.kind,
        })
    }
}
