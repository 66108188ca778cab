//! Raw-primitive filesystem probe.
//!
//! Implements [`FsProbe`] for the resolution engine using only the private
//! real-symbol table, never the exported shims, so a directory scan can
//! never recurse back into the interception layer.

use libc::{c_char, c_int};
use std::ffi::{CStr, CString};

use wincase_resolve::{FsProbe, ScanError};

use crate::reals::{real_fn, REAL_CLOSEDIR, REAL_LSTAT, REAL_OPENDIR, REAL_READDIR};

type LstatFn = unsafe extern "C" fn(*const c_char, *mut libc::stat) -> c_int;
type OpendirFn = unsafe extern "C" fn(*const c_char) -> *mut libc::DIR;
type ReaddirFn = unsafe extern "C" fn(*mut libc::DIR) -> *mut libc::dirent;
type ClosedirFn = unsafe extern "C" fn(*mut libc::DIR) -> c_int;

pub struct RawFs;

impl FsProbe for RawFs {
    fn exists(&self, path: &str) -> bool {
        let Ok(cpath) = CString::new(path) else {
            // Interior NUL can't name a real file; claim existence so the
            // caller forwards the path untouched.
            return true;
        };
        let Some(lstat) = real_fn!(REAL_LSTAT, LstatFn) else {
            return true;
        };
        let mut st: libc::stat = unsafe { std::mem::zeroed() };
        unsafe { lstat(cpath.as_ptr(), &mut st) == 0 }
    }

    fn scan_dir(&self, dir: &str) -> Result<Vec<String>, ScanError> {
        let cdir = CString::new(dir).map_err(|_| ScanError::Errno(libc::EINVAL))?;
        let opendir =
            real_fn!(REAL_OPENDIR, OpendirFn).ok_or(ScanError::Errno(libc::ENOSYS))?;
        let readdir =
            real_fn!(REAL_READDIR, ReaddirFn).ok_or(ScanError::Errno(libc::ENOSYS))?;
        let closedir =
            real_fn!(REAL_CLOSEDIR, ClosedirFn).ok_or(ScanError::Errno(libc::ENOSYS))?;

        let dirp = unsafe { opendir(cdir.as_ptr()) };
        if dirp.is_null() {
            let errno = unsafe { *libc::__errno_location() };
            return Err(ScanError::Errno(errno));
        }

        let mut names = Vec::new();
        loop {
            let entry = unsafe { readdir(dirp) };
            if entry.is_null() {
                break;
            }
            let name = unsafe { CStr::from_ptr((*entry).d_name.as_ptr()) };
            // Non-UTF-8 entries can never match a UTF-8 request; skip them.
            if let Ok(name) = name.to_str() {
                if name != "." && name != ".." {
                    names.push(name.to_owned());
                }
            }
        }
        unsafe { closedir(dirp) };
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // In the test binary dlsym(RTLD_NEXT) binds straight to libc, so the
    // probe runs against the real filesystem.

    #[test]
    fn exists_matches_disk() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Present.h"), "x").unwrap();

        let probe = RawFs;
        assert!(probe.exists(&format!("{}/Present.h", dir.path().display())));
        assert!(!probe.exists(&format!("{}/absent.h", dir.path().display())));
    }

    #[test]
    fn scan_lists_entries_without_dot_dirs() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Foo.H"), "x").unwrap();
        std::fs::create_dir(dir.path().join("Sub")).unwrap();

        let probe = RawFs;
        let mut names = probe.scan_dir(&dir.path().display().to_string()).unwrap();
        names.sort();
        assert_eq!(names, vec!["Foo.H".to_string(), "Sub".to_string()]);
    }

    #[test]
    fn scan_of_missing_dir_fails_with_errno() {
        let probe = RawFs;
        match probe.scan_dir("/definitely/not/here") {
            Err(ScanError::Errno(e)) => assert_eq!(e, libc::ENOENT),
            other => panic!("expected errno error, got {other:?}"),
        }
    }
}
