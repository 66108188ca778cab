//! access family.

use libc::{c_char, c_int};

use crate::path::{correct_case, correct_case_at};
use crate::reals::{real_fn, REAL_ACCESS, REAL_FACCESSAT};
use crate::syscalls::fail_unbound;

type AccessFn = unsafe extern "C" fn(*const c_char, c_int) -> c_int;
type FaccessatFn = unsafe extern "C" fn(c_int, *const c_char, c_int, c_int) -> c_int;

pub(crate) unsafe fn access_impl(path: *const c_char, mode: c_int) -> c_int {
    let Some(real) = real_fn!(REAL_ACCESS, AccessFn) else {
        return fail_unbound("access");
    };
    let fixed = correct_case(path);
    real(fixed.as_ptr_or(path), mode)
}

pub(crate) unsafe fn faccessat_impl(
    dirfd: c_int,
    path: *const c_char,
    mode: c_int,
    flags: c_int,
) -> c_int {
    let Some(real) = real_fn!(REAL_FACCESSAT, FaccessatFn) else {
        return fail_unbound("faccessat");
    };
    let fixed = correct_case_at(dirfd, path);
    real(dirfd, fixed.as_ptr_or(path), mode, flags)
}
