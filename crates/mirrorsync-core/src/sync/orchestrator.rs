//! Sync orchestration - one reconciliation cycle end to end

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info};

use super::actions::ReconciliationAction;
use super::executor::ActionExecutor;
use super::journal::{ActionLog, TimestampFormat};
use super::reconciler::Reconciler;
use super::CycleReport;
use crate::comparison::{CompareMethod, FileComparator};
use crate::config::Config;
use crate::error::{Result, SyncError};
use crate::scanner::{EntryFilter, TreeScanner, TreeSnapshot};

/// Everything one cycle needs to know
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSettings {
    /// Tree to copy from
    pub source: PathBuf,
    /// Tree to make identical to the source
    pub target: PathBuf,
    /// Durable action log; console only when `None`
    pub log_file: Option<PathBuf>,
    /// Content comparison method
    pub compare: CompareMethod,
    /// Timestamp shape in log lines
    pub timestamp: TimestampFormat,
    /// Gitignore-style exclusions applied to both trees
    pub exclude: Vec<String>,
    /// Patterns re-included after exclusion
    pub include: Vec<String>,
    /// Classify and log without mutating the target
    pub dry_run: bool,
    /// Mirror action lines to stdout
    pub console: bool,
}

impl SyncSettings {
    /// Default settings for a source/target pair
    #[must_use]
    pub fn new(source: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            log_file: None,
            compare: CompareMethod::default(),
            timestamp: TimestampFormat::default(),
            exclude: Vec::new(),
            include: Vec::new(),
            dry_run: false,
            console: true,
        }
    }

    /// Settings for a source/target pair taken from a loaded [`Config`]
    #[must_use]
    pub fn from_config(
        source: impl Into<PathBuf>,
        target: impl Into<PathBuf>,
        config: &Config,
    ) -> Self {
        Self {
            log_file: config.log_file.clone(),
            compare: config.compare_method(),
            timestamp: config.timestamp_format(),
            exclude: config.exclude.clone(),
            include: config.include.clone(),
            dry_run: config.dry_run,
            ..Self::new(source, target)
        }
    }
}

/// Snapshots and classified actions for one cycle, before anything is applied
#[derive(Debug, Clone)]
pub struct CyclePlan {
    /// Source snapshot
    pub source: TreeSnapshot,
    /// Target snapshot
    pub target: TreeSnapshot,
    /// Actions in apply order
    pub actions: Vec<ReconciliationAction>,
}

/// Main sync engine
pub struct SyncEngine {
    settings: SyncSettings,
    scanner: TreeScanner,
    reconciler: Reconciler,
}

impl SyncEngine {
    /// Create a new sync engine
    ///
    /// # Errors
    ///
    /// Returns an error if an exclusion pattern does not compile.
    pub fn new(settings: SyncSettings) -> Result<Self> {
        let filter = EntryFilter::with_patterns(&settings.exclude, &settings.include)?;
        let comparator = FileComparator::new(settings.compare);

        Ok(Self {
            settings,
            scanner: TreeScanner::new(filter),
            reconciler: Reconciler::new(comparator),
        })
    }

    /// Scan both trees and classify, without applying or logging
    ///
    /// A missing target is planned as an empty tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the roots are invalid or a scan fails.
    pub fn plan(&self) -> Result<CyclePlan> {
        let (source_root, target_root) = self.resolve_roots()?;
        self.plan_roots(&source_root, &target_root)
    }

    /// Run one full scan, classify, apply, log cycle
    ///
    /// # Errors
    ///
    /// Returns an error if a scan fails, a mutation fails, or the action log
    /// cannot be written. Actions applied before a failure stay applied and
    /// stay logged.
    pub fn run_cycle(&self) -> Result<CycleReport> {
        let started = Instant::now();
        let dry_run = self.settings.dry_run;
        let (source_root, target_root) = self.resolve_roots()?;

        if !dry_run && !target_root.exists() {
            info!("Creating target root {}", target_root.display());
            fs::create_dir_all(&target_root)
                .map_err(|e| SyncError::apply("create directory", &target_root, e))?;
        }

        let plan = self.plan_roots(&source_root, &target_root)?;

        let mut log = match (&self.settings.log_file, dry_run) {
            (Some(path), false) => ActionLog::open(path, self.settings.timestamp)?,
            _ => ActionLog::console_only(self.settings.timestamp),
        }
        .with_console(self.settings.console)
        .with_dry_run(dry_run);

        let mut report = CycleReport {
            dry_run,
            ..CycleReport::default()
        };
        report.warnings.extend(
            plan.source
                .skipped()
                .iter()
                .chain(plan.target.skipped())
                .map(|p| format!("Skipped symlink or special file: {}", p.display())),
        );
        let pass_one = plan.actions.iter().filter(|a| !a.is_deletion()).count();
        report.unchanged = plan.source.len().saturating_sub(pass_one);

        let applied = ActionExecutor::new(dry_run).apply(
            &plan.actions,
            &target_root,
            &mut log,
            &mut report,
        );
        let flushed = log.finish();
        applied?;
        flushed?;

        info!(
            "Cycle finished in {:?}: {} created, {} updated, {} replaced, {} removed, {} unchanged",
            started.elapsed(),
            report.created,
            report.updated,
            report.replaced,
            report.removed,
            report.unchanged
        );

        Ok(report)
    }

    fn plan_roots(&self, source_root: &Path, target_root: &Path) -> Result<CyclePlan> {
        let source = self.scanner.scan(source_root)?;
        let target = if target_root.exists() {
            self.scanner.scan(target_root)?
        } else {
            TreeSnapshot::new(target_root.to_path_buf(), Vec::new(), Vec::new())
        };

        debug!(
            "Source has {} entries, target has {} entries",
            source.len(),
            target.len()
        );

        let actions = self.reconciler.reconcile(&source, &target);

        Ok(CyclePlan {
            source,
            target,
            actions,
        })
    }

    /// Absolute roots, checked so neither tree contains the other or the log
    fn resolve_roots(&self) -> Result<(PathBuf, PathBuf)> {
        let source = resolve(&self.settings.source)?;
        let target = resolve(&self.settings.target)?;

        if !source.exists() {
            return Err(SyncError::RootNotFound { path: source });
        }
        if !source.is_dir() {
            return Err(SyncError::NotADirectory { path: source });
        }

        if target.starts_with(&source) || source.starts_with(&target) {
            return Err(SyncError::Config(format!(
                "source {} and target {} must not contain each other",
                source.display(),
                target.display()
            )));
        }

        if let Some(log_file) = &self.settings.log_file {
            let log_path = resolve(log_file)?;
            if log_path.starts_with(&source) || log_path.starts_with(&target) {
                return Err(SyncError::Config(format!(
                    "log file {} must not be inside the source or target tree",
                    log_file.display()
                )));
            }
        }

        Ok((source, target))
    }
}

/// Canonical form of `path`; a missing path is resolved through its nearest
/// existing ancestor
fn resolve(path: &Path) -> Result<PathBuf> {
    let unreadable = |source| SyncError::RootUnreadable {
        path: path.to_path_buf(),
        source,
    };

    let absolute = std::path::absolute(path).map_err(unreadable)?;

    match dunce::canonicalize(&absolute) {
        Ok(canonical) => Ok(canonical),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            match (absolute.parent(), absolute.file_name()) {
                (Some(parent), Some(name)) => Ok(resolve(parent)?.join(name)),
                _ => Ok(absolute),
            }
        }
        Err(e) => Err(unreadable(e)),
    }
}
