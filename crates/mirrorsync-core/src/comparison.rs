//! File content comparison
//!
//! Equality is decided by size first, then by content. Content is compared
//! either by streaming both files side by side or by SHA-256 digests.
//! Comparison never fails: a file that cannot be opened or read is reported
//! as different, so the caller re-copies it instead of trusting it.

mod content;
mod hash;

#[cfg(test)]
mod integration_tests;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

pub use content::ContentComparator;
pub use hash::{FileHash, FileHasher};

/// How file contents are compared once sizes match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompareMethod {
    /// Stream both files and compare byte for byte
    #[default]
    Bytes,
    /// Compare SHA-256 digests of both files
    Checksum,
}

/// File comparator with a size fast-path
#[derive(Debug, Clone, Copy, Default)]
pub struct FileComparator {
    method: CompareMethod,
}

impl FileComparator {
    /// Create a comparator using `method` for same-sized files
    #[must_use]
    pub const fn new(method: CompareMethod) -> Self {
        Self { method }
    }

    /// Whether the two files have identical contents
    ///
    /// Returns `false` if either file cannot be inspected.
    #[must_use]
    pub fn files_equal(&self, a: &Path, b: &Path) -> bool {
        let (size_a, size_b) = match (fs::metadata(a), fs::metadata(b)) {
            (Ok(ma), Ok(mb)) => (ma.len(), mb.len()),
            (Err(e), _) => {
                warn!("Cannot stat {}: {e}; treating as changed", a.display());
                return false;
            }
            (_, Err(e)) => {
                warn!("Cannot stat {}: {e}; treating as changed", b.display());
                return false;
            }
        };

        if size_a != size_b {
            return false;
        }

        let outcome = match self.method {
            CompareMethod::Bytes => ContentComparator::equal(a, b),
            CompareMethod::Checksum => {
                FileHasher::hash(a).and_then(|ha| FileHasher::hash(b).map(|hb| ha == hb))
            }
        };

        outcome.unwrap_or_else(|e| {
            warn!(
                "Cannot compare {} with {}: {e}; treating as changed",
                a.display(),
                b.display()
            );
            false
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_method_default() {
        assert_eq!(CompareMethod::default(), CompareMethod::Bytes);
    }

    #[test]
    fn test_compare_method_serde() {
        let bytes = serde_json::to_string(&CompareMethod::Bytes).unwrap();
        let checksum = serde_json::to_string(&CompareMethod::Checksum).unwrap();

        assert_eq!(bytes, r#""bytes""#);
        assert_eq!(checksum, r#""checksum""#);
    }
}
