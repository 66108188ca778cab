//! open family.
//!
//! The creation mode is an optional variadic argument in the C signature.
//! Declaring it as a fixed `mode_t` parameter matches the SysV register
//! convention for the first variadic slot, so the materialized value is
//! what gets forwarded, never a `va_list` handle.

use libc::{c_char, c_int, mode_t};

use crate::path::{correct_case, correct_case_at};
use crate::reals::{real_fn, REAL_OPEN, REAL_OPEN64, REAL_OPENAT, REAL_OPENAT64};
use crate::syscalls::fail_unbound;

type OpenFn = unsafe extern "C" fn(*const c_char, c_int, mode_t) -> c_int;
type OpenatFn = unsafe extern "C" fn(c_int, *const c_char, c_int, mode_t) -> c_int;

pub(crate) unsafe fn open_impl(path: *const c_char, flags: c_int, mode: mode_t) -> c_int {
    let Some(real) = real_fn!(REAL_OPEN, OpenFn) else {
        return fail_unbound("open");
    };
    let fixed = correct_case(path);
    real(fixed.as_ptr_or(path), flags, mode)
}

pub(crate) unsafe fn open64_impl(path: *const c_char, flags: c_int, mode: mode_t) -> c_int {
    let Some(real) = real_fn!(REAL_OPEN64, OpenFn) else {
        return fail_unbound("open64");
    };
    let fixed = correct_case(path);
    real(fixed.as_ptr_or(path), flags, mode)
}

pub(crate) unsafe fn openat_impl(
    dirfd: c_int,
    path: *const c_char,
    flags: c_int,
    mode: mode_t,
) -> c_int {
    let Some(real) = real_fn!(REAL_OPENAT, OpenatFn) else {
        return fail_unbound("openat");
    };
    let fixed = correct_case_at(dirfd, path);
    real(dirfd, fixed.as_ptr_or(path), flags, mode)
}

pub(crate) unsafe fn openat64_impl(
    dirfd: c_int,
    path: *const c_char,
    flags: c_int,
    mode: mode_t,
) -> c_int {
    let Some(real) = real_fn!(REAL_OPENAT64, OpenatFn) else {
        return fail_unbound("openat64");
    };
    let fixed = correct_case_at(dirfd, path);
    real(dirfd, fixed.as_ptr_or(path), flags, mode)
}
