//! stat family: modern entry points plus the legacy versioned glibc ABI
//! (`__xstat` and friends) that older runtimes call internally.

use libc::{c_char, c_int, stat as libc_stat, stat64 as libc_stat64};

use crate::path::{correct_case, correct_case_at};
use crate::reals::{
    real_fn, REAL_FSTATAT, REAL_FSTATAT64, REAL_FXSTATAT, REAL_FXSTATAT64, REAL_LSTAT,
    REAL_LSTAT64, REAL_LXSTAT, REAL_LXSTAT64, REAL_STAT, REAL_STAT64, REAL_XSTAT, REAL_XSTAT64,
};
use crate::syscalls::fail_unbound;

type StatFn = unsafe extern "C" fn(*const c_char, *mut libc_stat) -> c_int;
type Stat64Fn = unsafe extern "C" fn(*const c_char, *mut libc_stat64) -> c_int;
type XstatFn = unsafe extern "C" fn(c_int, *const c_char, *mut libc_stat) -> c_int;
type Xstat64Fn = unsafe extern "C" fn(c_int, *const c_char, *mut libc_stat64) -> c_int;
type FstatatFn = unsafe extern "C" fn(c_int, *const c_char, *mut libc_stat, c_int) -> c_int;
type Fstatat64Fn = unsafe extern "C" fn(c_int, *const c_char, *mut libc_stat64, c_int) -> c_int;
type FxstatatFn =
    unsafe extern "C" fn(c_int, c_int, *const c_char, *mut libc_stat, c_int) -> c_int;
type Fxstatat64Fn =
    unsafe extern "C" fn(c_int, c_int, *const c_char, *mut libc_stat64, c_int) -> c_int;

pub(crate) unsafe fn stat_impl(path: *const c_char, buf: *mut libc_stat) -> c_int {
    let Some(real) = real_fn!(REAL_STAT, StatFn) else {
        return fail_unbound("stat");
    };
    let fixed = correct_case(path);
    real(fixed.as_ptr_or(path), buf)
}

pub(crate) unsafe fn stat64_impl(path: *const c_char, buf: *mut libc_stat64) -> c_int {
    let Some(real) = real_fn!(REAL_STAT64, Stat64Fn) else {
        return fail_unbound("stat64");
    };
    let fixed = correct_case(path);
    real(fixed.as_ptr_or(path), buf)
}

pub(crate) unsafe fn lstat_impl(path: *const c_char, buf: *mut libc_stat) -> c_int {
    let Some(real) = real_fn!(REAL_LSTAT, StatFn) else {
        return fail_unbound("lstat");
    };
    let fixed = correct_case(path);
    real(fixed.as_ptr_or(path), buf)
}

pub(crate) unsafe fn lstat64_impl(path: *const c_char, buf: *mut libc_stat64) -> c_int {
    let Some(real) = real_fn!(REAL_LSTAT64, Stat64Fn) else {
        return fail_unbound("lstat64");
    };
    let fixed = correct_case(path);
    real(fixed.as_ptr_or(path), buf)
}

pub(crate) unsafe fn fstatat_impl(
    dirfd: c_int,
    path: *const c_char,
    buf: *mut libc_stat,
    flags: c_int,
) -> c_int {
    let Some(real) = real_fn!(REAL_FSTATAT, FstatatFn) else {
        return fail_unbound("fstatat");
    };
    let fixed = correct_case_at(dirfd, path);
    real(dirfd, fixed.as_ptr_or(path), buf, flags)
}

pub(crate) unsafe fn fstatat64_impl(
    dirfd: c_int,
    path: *const c_char,
    buf: *mut libc_stat64,
    flags: c_int,
) -> c_int {
    let Some(real) = real_fn!(REAL_FSTATAT64, Fstatat64Fn) else {
        return fail_unbound("fstatat64");
    };
    let fixed = correct_case_at(dirfd, path);
    real(dirfd, fixed.as_ptr_or(path), buf, flags)
}

// Legacy versioned ABI: the version argument is forwarded verbatim.

pub(crate) unsafe fn xstat_impl(ver: c_int, path: *const c_char, buf: *mut libc_stat) -> c_int {
    let Some(real) = real_fn!(REAL_XSTAT, XstatFn) else {
        return fail_unbound("__xstat");
    };
    let fixed = correct_case(path);
    real(ver, fixed.as_ptr_or(path), buf)
}

pub(crate) unsafe fn xstat64_impl(
    ver: c_int,
    path: *const c_char,
    buf: *mut libc_stat64,
) -> c_int {
    let Some(real) = real_fn!(REAL_XSTAT64, Xstat64Fn) else {
        return fail_unbound("__xstat64");
    };
    let fixed = correct_case(path);
    real(ver, fixed.as_ptr_or(path), buf)
}

pub(crate) unsafe fn lxstat_impl(ver: c_int, path: *const c_char, buf: *mut libc_stat) -> c_int {
    let Some(real) = real_fn!(REAL_LXSTAT, XstatFn) else {
        return fail_unbound("__lxstat");
    };
    let fixed = correct_case(path);
    real(ver, fixed.as_ptr_or(path), buf)
}

pub(crate) unsafe fn lxstat64_impl(
    ver: c_int,
    path: *const c_char,
    buf: *mut libc_stat64,
) -> c_int {
    let Some(real) = real_fn!(REAL_LXSTAT64, Xstat64Fn) else {
        return fail_unbound("__lxstat64");
    };
    let fixed = correct_case(path);
    real(ver, fixed.as_ptr_or(path), buf)
}

pub(crate) unsafe fn fxstatat_impl(
    ver: c_int,
    dirfd: c_int,
    path: *const c_char,
    buf: *mut libc_stat,
    flags: c_int,
) -> c_int {
    let Some(real) = real_fn!(REAL_FXSTATAT, FxstatatFn) else {
        return fail_unbound("__fxstatat");
    };
    let fixed = correct_case_at(dirfd, path);
    real(ver, dirfd, fixed.as_ptr_or(path), buf, flags)
}

pub(crate) unsafe fn fxstatat64_impl(
    ver: c_int,
    dirfd: c_int,
    path: *const c_char,
    buf: *mut libc_stat64,
    flags: c_int,
) -> c_int {
    let Some(real) = real_fn!(REAL_FXSTATAT64, Fxstatat64Fn) else {
        return fail_unbound("__fxstatat64");
    };
    let fixed = correct_case_at(dirfd, path);
    real(ver, dirfd, fixed.as_ptr_or(path), buf, flags)
}
