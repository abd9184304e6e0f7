//! Integration tests for file comparison

use std::fs;

use tempfile::TempDir;

use super::{CompareMethod, FileComparator};

const METHODS: [CompareMethod; 2] = [CompareMethod::Bytes, CompareMethod::Checksum];

#[test]
fn test_identical_files() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("source.txt");
    let dest = tmp.path().join("dest.txt");
    fs::write(&source, "identical content\n").unwrap();
    fs::write(&dest, "identical content\n").unwrap();

    for method in METHODS {
        assert!(FileComparator::new(method).files_equal(&source, &dest));
    }
}

#[test]
fn test_same_size_different_content() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("source.txt");
    let dest = tmp.path().join("dest.txt");
    fs::write(&source, "abcd").unwrap();
    fs::write(&dest, "abce").unwrap();

    for method in METHODS {
        assert!(!FileComparator::new(method).files_equal(&source, &dest));
    }
}

#[test]
fn test_size_mismatch() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("f.txt");
    let dest = tmp.path().join("g.txt");
    fs::write(&source, "hello").unwrap();
    fs::write(&dest, "hell").unwrap();

    assert!(!FileComparator::default().files_equal(&source, &dest));
}

#[test]
fn test_missing_file_is_not_equal() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("source.txt");
    fs::write(&source, "content").unwrap();

    for method in METHODS {
        let comparator = FileComparator::new(method);
        assert!(!comparator.files_equal(&source, &tmp.path().join("gone.txt")));
        assert!(!comparator.files_equal(&tmp.path().join("gone.txt"), &source));
    }
}

#[test]
fn test_directory_is_not_equal_to_file() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("source.txt");
    let dir = tmp.path().join("dir");
    fs::write(&source, "").unwrap();
    fs::create_dir(&dir).unwrap();

    assert!(!FileComparator::default().files_equal(&source, &dir));
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_is_not_equal() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("source.txt");
    let dest = tmp.path().join("dest.txt");
    fs::write(&source, "same").unwrap();
    fs::write(&dest, "same").unwrap();
    fs::set_permissions(&dest, fs::Permissions::from_mode(0o000)).unwrap();

    // Privileged users can open the file regardless of its mode
    let readable = fs::File::open(&dest).is_ok();
    let equal = FileComparator::default().files_equal(&source, &dest);

    fs::set_permissions(&dest, fs::Permissions::from_mode(0o644)).unwrap();

    assert_eq!(equal, readable);
}
