//! Case-insensitive path resolution.
//!
//! [`CaseResolver::resolve`] maps a caller-supplied path to the matching
//! on-disk path, correcting the letter case of every mismatched component
//! along the chain. Paths that already exist, fall under an excluded
//! prefix, or have no case-insensitive match are returned unchanged.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::exclude::is_excluded;

/// Fault while enumerating a directory. Always mapped to "no match" by the
/// resolver; never surfaced to the intercepted call.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("directory scan failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("directory scan failed (errno {0})")]
    Errno(i32),
}

/// Minimal filesystem probe the resolver runs against.
///
/// The preload shim implements this with raw, non-intercepted libc
/// primitives so resolution can never re-enter the interception layer.
pub trait FsProbe {
    /// Whether `path` exists under its exact given case (lstat semantics:
    /// a dangling symlink counts as existing).
    fn exists(&self, path: &str) -> bool;

    /// Entry names of `dir`, excluding `.` and `..`. Order is
    /// filesystem-dependent and unspecified.
    fn scan_dir(&self, dir: &str) -> Result<Vec<String>, ScanError>;
}

/// [`FsProbe`] backed by `std::fs`, for tests and standalone callers.
#[derive(Debug, Default)]
pub struct StdProbe;

impl FsProbe for StdProbe {
    fn exists(&self, path: &str) -> bool {
        std::fs::symlink_metadata(path).is_ok()
    }

    fn scan_dir(&self, dir: &str) -> Result<Vec<String>, ScanError> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            if let Ok(name) = entry?.file_name().into_string() {
                names.push(name);
            }
        }
        Ok(names)
    }
}

/// The resolution engine: probe + memoization cache.
///
/// The cache maps exact input strings (original case) to resolved paths and
/// only holds entries that required a successful directory scan; exact-case
/// hits and excluded paths are never inserted. It grows monotonically for
/// the life of the process and is never invalidated, which is correct for
/// short-lived build-tool invocations.
pub struct CaseResolver<F> {
    probe: F,
    cache: Mutex<HashMap<Box<str>, Box<str>>>,
}

impl<F: FsProbe> CaseResolver<F> {
    pub fn new(probe: F) -> Self {
        Self {
            probe,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Map `path` to its on-disk spelling.
    ///
    /// Returns `Cow::Borrowed` when the input needs no rewriting (empty,
    /// excluded, already exact-case, or no match anywhere); `Cow::Owned`
    /// carries a corrected path independent of the input buffer.
    pub fn resolve<'a>(&self, path: &'a str) -> Cow<'a, str> {
        if path.is_empty() || is_excluded(path) || self.probe.exists(path) {
            return Cow::Borrowed(path);
        }

        // The lock is held across the whole miss path (ancestor recursion,
        // scan, insert) so concurrent requests for the same unseen key
        // perform exactly one scan and observe identical values.
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        match self.resolve_locked(path, &mut cache) {
            Some(fixed) => Cow::Owned(fixed),
            None => Cow::Borrowed(path),
        }
    }

    /// Miss path: caller has already ruled out empty/excluded/exact-case.
    /// Returns `None` when no case-insensitive match exists.
    fn resolve_locked(
        &self,
        path: &str,
        cache: &mut HashMap<Box<str>, Box<str>>,
    ) -> Option<String> {
        if let Some(hit) = cache.get(path) {
            return Some(hit.to_string());
        }

        let (parent, leaf) = split_path(path);
        if leaf.is_empty() {
            // Trailing slash or bare root; nothing to correct at this level.
            return None;
        }

        // Correct the ancestor chain first so the scan below runs against a
        // directory that actually exists.
        let scan_parent: Cow<'_, str> = if self.probe.exists(parent) {
            Cow::Borrowed(parent)
        } else {
            match self.resolve_locked(parent, cache) {
                Some(fixed) => Cow::Owned(fixed),
                None => Cow::Borrowed(parent),
            }
        };

        // Scan faults (missing parent, permission, I/O) mean "no match".
        let entries = self.probe.scan_dir(&scan_parent).ok()?;

        // First match wins; colliding entries that differ only by case are
        // an accepted ambiguity of the underlying enumeration order.
        let matched = entries.iter().find(|e| e.eq_ignore_ascii_case(leaf))?;
        let fixed = join_path(&scan_parent, matched);
        cache.insert(path.into(), fixed.as_str().into());
        Some(fixed)
    }
}

/// Split at the last `/`. A path with no separator is resolved against the
/// current directory; `/leaf` keeps `/` as its parent.
fn split_path(path: &str) -> (&str, &str) {
    match path.rsplit_once('/') {
        Some(("", leaf)) => ("/", leaf),
        Some((parent, leaf)) => (parent, leaf),
        None => (".", path),
    }
}

fn join_path(parent: &str, leaf: &str) -> String {
    if parent.ends_with('/') {
        format!("{parent}{leaf}")
    } else {
        format!("{parent}/{leaf}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// In-memory probe with a scan counter for determinism tests.
    #[derive(Default)]
    struct MockProbe {
        files: HashSet<String>,
        dirs: HashMap<String, Vec<String>>,
        scans: AtomicUsize,
    }

    impl MockProbe {
        fn with_dir(mut self, dir: &str, entries: &[&str]) -> Self {
            self.dirs
                .insert(dir.to_string(), entries.iter().map(|s| s.to_string()).collect());
            self
        }

        fn with_file(mut self, path: &str) -> Self {
            self.files.insert(path.to_string());
            self
        }

        fn scan_count(&self) -> usize {
            self.scans.load(Ordering::SeqCst)
        }
    }

    impl FsProbe for MockProbe {
        fn exists(&self, path: &str) -> bool {
            self.files.contains(path) || self.dirs.contains_key(path)
        }

        fn scan_dir(&self, dir: &str) -> Result<Vec<String>, ScanError> {
            self.scans.fetch_add(1, Ordering::SeqCst);
            self.dirs
                .get(dir)
                .cloned()
                .ok_or(ScanError::Errno(libc_enoent()))
        }
    }

    // Avoid a libc dependency in this crate just for one constant.
    fn libc_enoent() -> i32 {
        2
    }

    #[test]
    fn exact_case_is_identity() {
        let probe = MockProbe::default().with_file("/inc/Foo.H");
        let r = CaseResolver::new(probe);
        assert_eq!(r.resolve("/inc/Foo.H"), "/inc/Foo.H");
        // No scan was needed, and nothing was cached.
        assert_eq!(r.probe.scan_count(), 0);
        assert!(r.cache.lock().unwrap().is_empty());
    }

    #[test]
    fn leaf_case_corrected() {
        let probe = MockProbe::default()
            .with_dir("/inc", &["Bar.h", "Foo.H"])
            .with_file("/inc/Foo.H");
        let r = CaseResolver::new(probe);
        assert_eq!(r.resolve("/inc/foo.h"), "/inc/Foo.H");
    }

    #[test]
    fn ancestor_chain_corrected() {
        let probe = MockProbe::default()
            .with_dir("/", &["A"])
            .with_dir("/A", &["B"])
            .with_dir("/A/B", &["c.txt"]);
        let r = CaseResolver::new(probe);
        assert_eq!(r.resolve("/a/b/C.TXT"), "/A/B/c.txt");
    }

    #[test]
    fn no_match_returns_input() {
        let probe = MockProbe::default().with_dir("/inc", &["other.h"]);
        let r = CaseResolver::new(probe);
        assert_eq!(r.resolve("/inc/missing.h"), "/inc/missing.h");
        assert!(r.cache.lock().unwrap().is_empty());
    }

    #[test]
    fn empty_and_trailing_slash_pass_through() {
        let r = CaseResolver::new(MockProbe::default().with_dir("/inc", &["Foo.H"]));
        assert_eq!(r.resolve(""), "");
        assert_eq!(r.resolve("/inc/sub/"), "/inc/sub/");
    }

    #[test]
    fn excluded_prefix_is_never_rewritten() {
        // Even with a scannable mock tree under /proc, exclusion wins.
        let probe = MockProbe::default().with_dir("/proc", &["Self"]);
        let r = CaseResolver::new(probe);
        assert_eq!(r.resolve("/proc/self"), "/proc/self");
        assert_eq!(r.probe.scan_count(), 0);
    }

    #[test]
    fn relative_leaf_resolves_against_cwd() {
        let probe = MockProbe::default().with_dir(".", &["Makefile"]);
        let r = CaseResolver::new(probe);
        assert_eq!(r.resolve("makefile"), "./Makefile");
    }

    #[test]
    fn first_enumerated_match_wins_on_collision() {
        let probe = MockProbe::default().with_dir("/inc", &["a.h", "A.H"]);
        let r = CaseResolver::new(probe);
        // Both entries fold to the same name; enumeration order decides.
        assert_eq!(r.resolve("/inc/a.H"), "/inc/a.h");
    }

    #[test]
    fn idempotent() {
        let probe = MockProbe::default()
            .with_dir("/inc", &["Foo.H"])
            .with_file("/inc/Foo.H");
        let r = CaseResolver::new(probe);
        let once = r.resolve("/inc/foo.h").into_owned();
        let twice = r.resolve(&once).into_owned();
        assert_eq!(once, twice);
    }

    #[test]
    fn concurrent_requests_share_one_scan() {
        let probe = MockProbe::default()
            .with_dir("/inc", &["Foo.H"])
            .with_file("/inc/Foo.H");
        let r = Arc::new(CaseResolver::new(probe));

        let mut handles = Vec::new();
        for _ in 0..2 {
            let r = Arc::clone(&r);
            handles.push(std::thread::spawn(move || {
                r.resolve("/inc/foo.h").into_owned()
            }));
        }
        let results: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert!(results.iter().all(|v| v == "/inc/Foo.H"));
        assert_eq!(r.probe.scan_count(), 1);
        assert_eq!(r.cache.lock().unwrap().len(), 1);
    }

    #[test]
    fn cache_serves_repeat_requests_without_rescanning() {
        let probe = MockProbe::default()
            .with_dir("/inc", &["Foo.H"])
            .with_file("/inc/Foo.H");
        let r = CaseResolver::new(probe);
        assert_eq!(r.resolve("/inc/foo.h"), "/inc/Foo.H");
        assert_eq!(r.resolve("/inc/foo.h"), "/inc/Foo.H");
        assert_eq!(r.probe.scan_count(), 1);
    }
}
