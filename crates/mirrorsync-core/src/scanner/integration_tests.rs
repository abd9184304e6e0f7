//! Integration tests for tree snapshotting

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use super::{EntryFilter, EntryKind, RelativeKey, TreeScanner};
use crate::error::SyncError;

fn create_test_file(dir: &Path, rel_path: &str, content: &str) {
    let path = dir.join(rel_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn keys(scanner: &TreeScanner, root: &Path) -> Vec<String> {
    scanner
        .scan(root)
        .unwrap()
        .iter()
        .map(|e| e.key.to_string())
        .collect()
}

#[test]
fn test_scan_empty_directory() {
    let tmp = TempDir::new().unwrap();
    let snapshot = TreeScanner::default().scan(tmp.path()).unwrap();

    assert!(snapshot.is_empty());
    assert_eq!(snapshot.root(), tmp.path());
}

#[test]
fn test_scan_descends_before_sibling_files() {
    let tmp = TempDir::new().unwrap();
    create_test_file(tmp.path(), "z_top.txt", "top");
    create_test_file(tmp.path(), "a_dir/inner.txt", "inner");
    create_test_file(tmp.path(), "a_dir/sub/deep.txt", "deep");
    create_test_file(tmp.path(), "b_dir/other.txt", "other");
    create_test_file(tmp.path(), "a_top.txt", "top");

    let order = keys(&TreeScanner::default(), tmp.path());

    assert_eq!(
        order,
        vec![
            "a_dir",
            "a_dir/sub",
            "a_dir/sub/deep.txt",
            "a_dir/inner.txt",
            "b_dir",
            "b_dir/other.txt",
            "a_top.txt",
            "z_top.txt",
        ]
    );
}

#[test]
fn test_scan_records_kind_and_size() {
    let tmp = TempDir::new().unwrap();
    create_test_file(tmp.path(), "dir/file.bin", "12345");

    let snapshot = TreeScanner::default().scan(tmp.path()).unwrap();

    let dir = snapshot.get(&RelativeKey::from_relative("dir")).unwrap();
    assert_eq!(dir.kind, EntryKind::Directory);
    assert_eq!(dir.path, tmp.path().join("dir"));

    let file = snapshot
        .get(&RelativeKey::from_relative("dir/file.bin"))
        .unwrap();
    assert_eq!(file.kind, EntryKind::File);
    assert_eq!(file.size, 5);
}

#[test]
fn test_keys_match_across_roots_of_different_length() {
    let short = TempDir::new().unwrap();
    let long = TempDir::new().unwrap();
    let long_root = long.path().join("some").join("much").join("longer").join("root");
    fs::create_dir_all(&long_root).unwrap();

    create_test_file(short.path(), "docs/readme.md", "a");
    create_test_file(&long_root, "docs/readme.md", "b");

    let scanner = TreeScanner::default();
    let a = scanner.scan(short.path()).unwrap();
    let b = scanner.scan(&long_root).unwrap();

    for entry in &a {
        assert!(b.contains(&entry.key), "missing {}", entry.key);
    }
    assert_eq!(a.len(), b.len());
}

#[test]
fn test_scan_missing_root() {
    let tmp = TempDir::new().unwrap();
    let result = TreeScanner::default().scan(&tmp.path().join("nope"));

    assert!(matches!(result, Err(SyncError::RootNotFound { .. })));
}

#[test]
fn test_scan_root_is_file() {
    let tmp = TempDir::new().unwrap();
    create_test_file(tmp.path(), "file.txt", "x");

    let result = TreeScanner::default().scan(&tmp.path().join("file.txt"));

    assert!(matches!(result, Err(SyncError::NotADirectory { .. })));
}

#[test]
fn test_scan_excluded_directory_is_pruned() {
    let tmp = TempDir::new().unwrap();
    create_test_file(tmp.path(), ".git/config", "x");
    create_test_file(tmp.path(), "src/main.rs", "fn main() {}");
    create_test_file(tmp.path(), "src/scratch.tmp", "tmp");

    let filter =
        EntryFilter::with_patterns(&[".git/".to_string(), "*.tmp".to_string()], &[]).unwrap();
    let order = keys(&TreeScanner::new(filter), tmp.path());

    assert_eq!(order, vec!["src", "src/main.rs"]);
}

#[cfg(unix)]
#[test]
fn test_scan_skips_symlinks() {
    let tmp = TempDir::new().unwrap();
    create_test_file(tmp.path(), "real.txt", "data");
    std::os::unix::fs::symlink(tmp.path().join("real.txt"), tmp.path().join("link.txt")).unwrap();
    std::os::unix::fs::symlink(tmp.path(), tmp.path().join("loop")).unwrap();

    let snapshot = TreeScanner::default().scan(tmp.path()).unwrap();

    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot.skipped().len(), 2);
    assert!(!snapshot.contains(&RelativeKey::from_relative("link.txt")));
}

#[cfg(unix)]
#[test]
fn test_scan_unreadable_subdirectory_aborts() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = TempDir::new().unwrap();
    create_test_file(tmp.path(), "locked/secret.txt", "x");
    let locked = tmp.path().join("locked");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Privileged users can read the directory regardless of its mode
    let readable = fs::read_dir(&locked).is_ok();
    let result = TreeScanner::default().scan(tmp.path());

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    if !readable {
        assert!(matches!(result, Err(SyncError::Scan { .. })));
    }
}
