//! Fixed exclusion set for kernel-managed virtual namespaces.
//!
//! Entries under these roots are synthetic and must never be rewritten; a
//! false positive only forfeits case correction for that subtree.

/// Virtual filesystem roots that are never scanned or rewritten.
pub const EXCLUDED_PREFIXES: &[&str] = &["/proc", "/sys", "/dev", "/run"];

/// Prefix-membership predicate over [`EXCLUDED_PREFIXES`].
///
/// Matches on component boundaries only: `/proc` and `/proc/self` are
/// excluded, `/procmail` is not.
pub fn is_excluded(path: &str) -> bool {
    EXCLUDED_PREFIXES.iter().any(|prefix| {
        path.strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excludes_virtual_roots() {
        assert!(is_excluded("/proc"));
        assert!(is_excluded("/proc/self/status"));
        assert!(is_excluded("/sys/kernel"));
        assert!(is_excluded("/dev/null"));
        assert!(is_excluded("/run/lock"));
    }

    #[test]
    fn component_boundary_only() {
        assert!(!is_excluded("/procmail"));
        assert!(!is_excluded("/system/lib"));
        assert!(!is_excluded("/device.h"));
    }

    #[test]
    fn regular_paths_pass() {
        assert!(!is_excluded("/usr/include/stdio.h"));
        assert!(!is_excluded("relative/path.h"));
        assert!(!is_excluded(""));
    }

    #[test]
    fn case_variants_of_excluded_roots_are_not_excluded() {
        // The filter matches exact prefixes only; a miscased virtual root
        // is handled like any other path.
        assert!(!is_excluded("/PROC/self"));
    }
}
