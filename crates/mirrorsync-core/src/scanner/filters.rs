//! Gitignore-style exclusion of relative keys using the ignore crate

use ignore::gitignore::{Gitignore, GitignoreBuilder};

use super::entry::RelativeKey;
use crate::error::{Result, SyncError};

/// Decides which relative keys take part in a scan
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    gitignore: Option<Gitignore>,
}

impl EntryFilter {
    /// Filter that lets every entry through
    #[must_use]
    pub const fn new() -> Self {
        Self { gitignore: None }
    }

    /// Build a filter from exclusion patterns and negating inclusion patterns
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Pattern`] if a pattern does not compile.
    pub fn with_patterns(exclude: &[String], include: &[String]) -> Result<Self> {
        if exclude.is_empty() && include.is_empty() {
            return Ok(Self::new());
        }

        let mut builder = GitignoreBuilder::new("");

        for pattern in exclude {
            builder
                .add_line(None, pattern)
                .map_err(|source| SyncError::Pattern {
                    pattern: pattern.clone(),
                    source,
                })?;
        }

        // Include patterns are negated ignores
        for pattern in include {
            builder
                .add_line(None, &format!("!{pattern}"))
                .map_err(|source| SyncError::Pattern {
                    pattern: pattern.clone(),
                    source,
                })?;
        }

        let gitignore = builder.build().map_err(|source| SyncError::Pattern {
            pattern: exclude.join(", "),
            source,
        })?;

        Ok(Self {
            gitignore: Some(gitignore),
        })
    }

    /// Whether the entry at `key` should be part of the snapshot
    ///
    /// Exclusion is decided by key alone: a key matched as either a file or
    /// a directory is excluded whatever its kind, so the same key is left out
    /// of both trees even when their kinds differ.
    #[must_use]
    pub fn should_include(&self, key: &RelativeKey) -> bool {
        self.gitignore.as_ref().is_none_or(|gi| {
            let path = key.to_path_buf();
            !gi.matched(&path, false).is_ignore() && !gi.matched(&path, true).is_ignore()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> RelativeKey {
        RelativeKey::from_relative(s)
    }

    #[test]
    fn test_no_patterns() {
        let filter = EntryFilter::new();
        assert!(filter.should_include(&key("any/file.txt")));
    }

    #[test]
    fn test_exclude_pattern() {
        let filter = EntryFilter::with_patterns(&["*.tmp".to_string()], &[]).unwrap();

        assert!(!filter.should_include(&key("file.tmp")));
        assert!(!filter.should_include(&key("nested/file.tmp")));
        assert!(filter.should_include(&key("file.txt")));
    }

    #[test]
    fn test_include_overrides_exclude() {
        let filter = EntryFilter::with_patterns(
            &["*.tmp".to_string()],
            &["important.tmp".to_string()],
        )
        .unwrap();

        assert!(!filter.should_include(&key("file.tmp")));
        assert!(filter.should_include(&key("important.tmp")));
    }

    #[test]
    fn test_directory_only_pattern() {
        let filter = EntryFilter::with_patterns(&[".git/".to_string()], &[]).unwrap();

        // A directory-only pattern still claims the key for a file
        assert!(!filter.should_include(&key(".git")));
        assert!(!filter.should_include(&key("sub/.git")));
        assert!(filter.should_include(&key("src")));
    }

    #[test]
    fn test_invalid_pattern() {
        let result = EntryFilter::with_patterns(&["{a".to_string()], &[]);
        assert!(matches!(result, Err(SyncError::Pattern { .. })));
    }
}
