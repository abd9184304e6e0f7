//! Snapshot entries and the relative keys that correlate them across trees

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Kind of filesystem entry recorded in a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Regular file
    File,
    /// Directory
    Directory,
}

impl EntryKind {
    /// Whether this is [`EntryKind::Directory`]
    #[must_use]
    pub const fn is_dir(self) -> bool {
        matches!(self, Self::Directory)
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => f.write_str("file"),
            Self::Directory => f.write_str("directory"),
        }
    }
}

/// Path of an entry relative to its scan root, kept as path segments
///
/// Keys compare segment by segment, so the same relative location under two
/// roots with different lengths or separator conventions yields equal keys.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RelativeKey {
    segments: Vec<OsString>,
}

impl RelativeKey {
    /// Build a key from the last `depth` normal components of `path`
    ///
    /// `depth` is the number of levels `path` sits below its scan root, as
    /// reported by the directory walker. Returns `None` if `path` has fewer
    /// than `depth` normal components.
    #[must_use]
    pub fn from_suffix(path: &Path, depth: usize) -> Option<Self> {
        let normal: Vec<&OsStr> = path
            .components()
            .filter_map(|c| match c {
                Component::Normal(s) => Some(s),
                _ => None,
            })
            .collect();

        let start = normal.len().checked_sub(depth)?;
        Some(Self {
            segments: normal[start..].iter().map(|s| (*s).to_os_string()).collect(),
        })
    }

    /// Build a key from a relative path such as `a/b/c.txt`
    ///
    /// Root, prefix, `.` and `..` components are not valid key segments and
    /// are dropped.
    #[must_use]
    pub fn from_relative(path: impl AsRef<Path>) -> Self {
        Self {
            segments: path
                .as_ref()
                .components()
                .filter_map(|c| match c {
                    Component::Normal(s) => Some(s.to_os_string()),
                    _ => None,
                })
                .collect(),
        }
    }

    /// Key of the containing directory, `None` for direct children of the root
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        match self.segments.split_last() {
            Some((_, rest)) if !rest.is_empty() => Some(Self {
                segments: rest.to_vec(),
            }),
            _ => None,
        }
    }

    /// Relative path using the platform separator
    #[must_use]
    pub fn to_path_buf(&self) -> PathBuf {
        self.segments.iter().collect()
    }

    /// Absolute location of this key under `root`
    #[must_use]
    pub fn to_path_under(&self, root: &Path) -> PathBuf {
        let mut path = root.to_path_buf();
        path.extend(&self.segments);
        path
    }
}

impl fmt::Display for RelativeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{}", segment.to_string_lossy())?;
        }
        Ok(())
    }
}

/// A filesystem location discovered during a scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathEntry {
    /// Absolute path as found on disk
    pub path: PathBuf,
    /// File or directory
    pub kind: EntryKind,
    /// Location relative to the scan root
    pub key: RelativeKey,
    /// Size in bytes (0 for directories)
    pub size: u64,
}

impl PathEntry {
    /// Whether the entry is a directory
    #[must_use]
    pub const fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_ignores_root_length() {
        let short = RelativeKey::from_suffix(Path::new("/a/docs/readme.md"), 2).unwrap();
        let long =
            RelativeKey::from_suffix(Path::new("/mnt/backups/very/long/root/docs/readme.md"), 2)
                .unwrap();

        assert_eq!(short, long);
        assert_eq!(short.to_string(), "docs/readme.md");
    }

    #[test]
    fn test_suffix_deeper_than_path() {
        assert!(RelativeKey::from_suffix(Path::new("a/b"), 3).is_none());
    }

    #[test]
    fn test_from_relative_drops_curdir() {
        let key = RelativeKey::from_relative("./a/b.txt");
        assert_eq!(key.to_string(), "a/b.txt");
        assert_eq!(key, RelativeKey::from_relative("a/b.txt"));
    }

    #[test]
    fn test_parent_chain() {
        let key = RelativeKey::from_relative("a/b/c.txt");
        let parent = key.parent().unwrap();

        assert_eq!(parent.to_string(), "a/b");
        assert_eq!(parent.parent().unwrap().to_string(), "a");
        assert!(parent.parent().unwrap().parent().is_none());
    }

    #[test]
    fn test_to_path_under_root() {
        let key = RelativeKey::from_relative("nested/file.txt");
        let path = key.to_path_under(Path::new("/target"));

        assert_eq!(path, Path::new("/target").join("nested").join("file.txt"));
    }
}
