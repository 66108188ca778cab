//! Exported entry points.
//!
//! Each symbol matches the glibc name, signature, and calling convention
//! exactly; clients observe no behavioral difference except corrected path
//! case. Raw directory-enumeration primitives (`readdir`, `closedir`) are
//! deliberately absent.

use libc::{c_char, c_int, mode_t, size_t, ssize_t, stat as libc_stat, stat64 as libc_stat64};

// --- open family ---

#[cfg(target_os = "linux")]
#[no_mangle]
pub unsafe extern "C" fn open(path: *const c_char, flags: c_int, mode: mode_t) -> c_int {
    crate::syscalls::open::open_impl(path, flags, mode)
}

#[cfg(target_os = "linux")]
#[no_mangle]
pub unsafe extern "C" fn open64(path: *const c_char, flags: c_int, mode: mode_t) -> c_int {
    crate::syscalls::open::open64_impl(path, flags, mode)
}

#[cfg(target_os = "linux")]
#[no_mangle]
pub unsafe extern "C" fn openat(
    dirfd: c_int,
    path: *const c_char,
    flags: c_int,
    mode: mode_t,
) -> c_int {
    crate::syscalls::open::openat_impl(dirfd, path, flags, mode)
}

#[cfg(target_os = "linux")]
#[no_mangle]
pub unsafe extern "C" fn openat64(
    dirfd: c_int,
    path: *const c_char,
    flags: c_int,
    mode: mode_t,
) -> c_int {
    crate::syscalls::open::openat64_impl(dirfd, path, flags, mode)
}

// --- stat family ---

#[cfg(target_os = "linux")]
#[no_mangle]
pub unsafe extern "C" fn stat(path: *const c_char, buf: *mut libc_stat) -> c_int {
    crate::syscalls::stat::stat_impl(path, buf)
}

#[cfg(target_os = "linux")]
#[no_mangle]
pub unsafe extern "C" fn stat64(path: *const c_char, buf: *mut libc_stat64) -> c_int {
    crate::syscalls::stat::stat64_impl(path, buf)
}

#[cfg(target_os = "linux")]
#[no_mangle]
pub unsafe extern "C" fn lstat(path: *const c_char, buf: *mut libc_stat) -> c_int {
    crate::syscalls::stat::lstat_impl(path, buf)
}

#[cfg(target_os = "linux")]
#[no_mangle]
pub unsafe extern "C" fn lstat64(path: *const c_char, buf: *mut libc_stat64) -> c_int {
    crate::syscalls::stat::lstat64_impl(path, buf)
}

#[cfg(target_os = "linux")]
#[no_mangle]
pub unsafe extern "C" fn fstatat(
    dirfd: c_int,
    path: *const c_char,
    buf: *mut libc_stat,
    flags: c_int,
) -> c_int {
    crate::syscalls::stat::fstatat_impl(dirfd, path, buf, flags)
}

#[cfg(target_os = "linux")]
#[no_mangle]
pub unsafe extern "C" fn fstatat64(
    dirfd: c_int,
    path: *const c_char,
    buf: *mut libc_stat64,
    flags: c_int,
) -> c_int {
    crate::syscalls::stat::fstatat64_impl(dirfd, path, buf, flags)
}

// Legacy versioned stat ABI, still called internally by older runtimes.

#[cfg(target_os = "linux")]
#[no_mangle]
pub unsafe extern "C" fn __xstat(ver: c_int, path: *const c_char, buf: *mut libc_stat) -> c_int {
    crate::syscalls::stat::xstat_impl(ver, path, buf)
}

#[cfg(target_os = "linux")]
#[no_mangle]
pub unsafe extern "C" fn __xstat64(
    ver: c_int,
    path: *const c_char,
    buf: *mut libc_stat64,
) -> c_int {
    crate::syscalls::stat::xstat64_impl(ver, path, buf)
}

#[cfg(target_os = "linux")]
#[no_mangle]
pub unsafe extern "C" fn __lxstat(ver: c_int, path: *const c_char, buf: *mut libc_stat) -> c_int {
    crate::syscalls::stat::lxstat_impl(ver, path, buf)
}

#[cfg(target_os = "linux")]
#[no_mangle]
pub unsafe extern "C" fn __lxstat64(
    ver: c_int,
    path: *const c_char,
    buf: *mut libc_stat64,
) -> c_int {
    crate::syscalls::stat::lxstat64_impl(ver, path, buf)
}

#[cfg(target_os = "linux")]
#[no_mangle]
pub unsafe extern "C" fn __fxstatat(
    ver: c_int,
    dirfd: c_int,
    path: *const c_char,
    buf: *mut libc_stat,
    flags: c_int,
) -> c_int {
    crate::syscalls::stat::fxstatat_impl(ver, dirfd, path, buf, flags)
}

#[cfg(target_os = "linux")]
#[no_mangle]
pub unsafe extern "C" fn __fxstatat64(
    ver: c_int,
    dirfd: c_int,
    path: *const c_char,
    buf: *mut libc_stat64,
    flags: c_int,
) -> c_int {
    crate::syscalls::stat::fxstatat64_impl(ver, dirfd, path, buf, flags)
}

// --- access family ---

#[cfg(target_os = "linux")]
#[no_mangle]
pub unsafe extern "C" fn access(path: *const c_char, mode: c_int) -> c_int {
    crate::syscalls::access::access_impl(path, mode)
}

#[cfg(target_os = "linux")]
#[no_mangle]
pub unsafe extern "C" fn faccessat(
    dirfd: c_int,
    path: *const c_char,
    mode: c_int,
    flags: c_int,
) -> c_int {
    crate::syscalls::access::faccessat_impl(dirfd, path, mode, flags)
}

// --- directory & symlink ---

#[cfg(target_os = "linux")]
#[no_mangle]
pub unsafe extern "C" fn opendir(path: *const c_char) -> *mut libc::DIR {
    crate::syscalls::dir::opendir_impl(path)
}

#[cfg(target_os = "linux")]
#[no_mangle]
pub unsafe extern "C" fn readlink(path: *const c_char, buf: *mut c_char, bufsiz: size_t) -> ssize_t {
    crate::syscalls::path::readlink_impl(path, buf, bufsiz)
}
