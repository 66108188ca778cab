//! Path rewriting at the FFI boundary.
//!
//! Converts a caller-supplied C path into the case-corrected equivalent.
//! Every bail-out (null, non-UTF-8, early init, re-entry, no change)
//! resolves to forwarding the caller's original pointer.

use libc::{c_char, c_int};
use std::borrow::Cow;
use std::ffi::{CStr, CString};
use std::sync::atomic::Ordering;

use crate::state::{ShimGuard, ShimState, EARLY};

/// Outcome of a rewrite attempt.
pub(crate) enum Rewritten {
    /// Forward the caller's pointer as-is.
    Original,
    /// Forward this owned, case-corrected path instead.
    Corrected(CString),
}

impl Rewritten {
    /// The pointer to hand to the real entry point.
    pub(crate) fn as_ptr_or(&self, original: *const c_char) -> *const c_char {
        match self {
            Rewritten::Original => original,
            Rewritten::Corrected(c) => c.as_ptr(),
        }
    }
}

/// Resolve `path` to its on-disk case. Total: never fails, never panics;
/// anything unexpected degrades to [`Rewritten::Original`].
pub(crate) unsafe fn correct_case(path: *const c_char) -> Rewritten {
    if path.is_null() || EARLY.load(Ordering::Relaxed) {
        return Rewritten::Original;
    }
    let Some(_guard) = ShimGuard::enter() else {
        return Rewritten::Original;
    };
    let Ok(path_str) = CStr::from_ptr(path).to_str() else {
        return Rewritten::Original;
    };
    let Some(state) = ShimState::get() else {
        return Rewritten::Original;
    };

    match state.resolver.resolve(path_str) {
        Cow::Borrowed(_) => Rewritten::Original,
        Cow::Owned(fixed) => {
            case_debug!("{} -> {}", path_str, fixed);
            match CString::new(fixed) {
                Ok(c) => Rewritten::Corrected(c),
                Err(_) => Rewritten::Original,
            }
        }
    }
}

/// Directory-relative variant: a path interpreted against an arbitrary
/// dirfd cannot be resolved without fd tracking, so only absolute paths
/// and AT_FDCWD-relative ones are rewritten.
pub(crate) unsafe fn correct_case_at(dirfd: c_int, path: *const c_char) -> Rewritten {
    if path.is_null() {
        return Rewritten::Original;
    }
    if dirfd != libc::AT_FDCWD && *path != b'/' as c_char {
        return Rewritten::Original;
    }
    correct_case(path)
}
