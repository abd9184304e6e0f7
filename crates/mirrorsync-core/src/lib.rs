//! # mirrorsync-core
//!
//! Core library for one-way directory mirroring.
//!
//! Each reconciliation cycle snapshots a source and a target tree, classifies
//! the differences by relative path, applies the create/update/delete actions
//! that make the target an exact copy of the source, and records every
//! mutation in a timestamped action log.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Error types for the mirrorsync library
pub mod error;

/// Tree snapshotting
pub mod scanner;

/// File content comparison
pub mod comparison;

/// Configuration file parsing and management
pub mod config;

/// Reconciliation engine and action log
pub mod sync;

pub use error::{Result, SyncError};
