//! Resolution against a real on-disk tree.

use std::fs;

use wincase_resolve::{CaseResolver, StdProbe};

fn resolver() -> CaseResolver<StdProbe> {
    CaseResolver::new(StdProbe)
}

#[test]
fn miscased_leaf_resolves_to_disk_spelling() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Foo.H"), "#pragma once\n").unwrap();

    let r = resolver();
    let request = format!("{}/foo.h", dir.path().display());
    let resolved = r.resolve(&request).into_owned();
    assert_eq!(resolved, format!("{}/Foo.H", dir.path().display()));
    assert!(fs::metadata(&resolved).is_ok());
}

#[test]
fn every_mismatched_ancestor_is_corrected() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("A/B")).unwrap();
    fs::write(dir.path().join("A/B/c.txt"), "x").unwrap();

    let r = resolver();
    let request = format!("{}/a/b/C.TXT", dir.path().display());
    let resolved = r.resolve(&request).into_owned();
    assert_eq!(resolved, format!("{}/A/B/c.txt", dir.path().display()));
}

#[test]
fn exact_case_path_is_returned_borrowed() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Exact.h"), "x").unwrap();

    let r = resolver();
    let request = format!("{}/Exact.h", dir.path().display());
    assert!(matches!(r.resolve(&request), std::borrow::Cow::Borrowed(_)));
}

#[test]
fn missing_everywhere_is_returned_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let r = resolver();
    let request = format!("{}/missing.h", dir.path().display());
    assert_eq!(r.resolve(&request), request.as_str());
}

#[test]
fn resolution_is_idempotent_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("Include")).unwrap();
    fs::write(dir.path().join("Include/Windows.h"), "x").unwrap();

    let r = resolver();
    let request = format!("{}/include/windows.H", dir.path().display());
    let once = r.resolve(&request).into_owned();
    let twice = r.resolve(&once).into_owned();
    assert_eq!(once, format!("{}/Include/Windows.h", dir.path().display()));
    assert_eq!(once, twice);
}

#[test]
fn dangling_symlink_counts_as_existing() {
    let dir = tempfile::tempdir().unwrap();
    let link = dir.path().join("Gone.h");
    std::os::unix::fs::symlink("/nonexistent/target", &link).unwrap();

    let r = resolver();
    let request = link.display().to_string();
    assert!(matches!(r.resolve(&request), std::borrow::Cow::Borrowed(_)));
}

#[test]
fn excluded_namespace_is_left_alone() {
    // /proc/SELF has a case-insensitive match on disk, but the /proc prefix
    // is opaque to the resolver.
    let r = resolver();
    assert_eq!(r.resolve("/proc/SELF/status"), "/proc/SELF/status");
}
