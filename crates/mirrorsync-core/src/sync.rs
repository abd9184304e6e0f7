//! One-way reconciliation engine
//!
//! A cycle scans both trees, classifies their differences into
//! [`ReconciliationAction`]s, applies them to the target in order, and writes
//! one [`ActionRecord`] per mutation to the [`ActionLog`]. Nothing is kept
//! between cycles except the target tree itself.

mod actions;
mod executor;
mod journal;
mod orchestrator;
mod reconciler;
mod reporting;

pub use actions::{ActionVerb, ReconciliationAction};
pub use executor::ActionExecutor;
pub use journal::{ActionLog, ActionRecord, TimestampFormat};
pub use orchestrator::{CyclePlan, SyncEngine, SyncSettings};
pub use reconciler::Reconciler;
pub use reporting::SyncReporter;

/// Outcome of one reconciliation cycle
#[derive(Debug, Clone, Default)]
pub struct CycleReport {
    /// Entries created in the target
    pub created: usize,
    /// Files whose contents were overwritten
    pub updated: usize,
    /// Entries replaced because their kind differed
    pub replaced: usize,
    /// Stale entries removed (a directory counts once)
    pub removed: usize,
    /// Source entries that needed no action
    pub unchanged: usize,
    /// Log records, in apply order
    pub records: Vec<ActionRecord>,
    /// Non-fatal scan warnings
    pub warnings: Vec<String>,
    /// Whether mutations were only previewed
    pub dry_run: bool,
}

impl CycleReport {
    /// Total operations performed
    #[must_use]
    pub const fn total_operations(&self) -> usize {
        self.created + self.updated + self.replaced + self.removed
    }

    /// Whether the target was already in sync
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.total_operations() == 0
    }

    pub(crate) fn count(&mut self, action: &ReconciliationAction) {
        match action {
            ReconciliationAction::Create { .. } => self.created += 1,
            ReconciliationAction::UpdateContent { .. } => self.updated += 1,
            ReconciliationAction::ResolveTypeMismatch { .. } => self.replaced += 1,
            ReconciliationAction::Delete { .. } => self.removed += 1,
        }
    }
}
