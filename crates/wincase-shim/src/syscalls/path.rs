//! Symlink-target read. The link path is corrected; the target contents
//! returned to the caller are never rewritten.

use libc::{c_char, size_t, ssize_t};

use crate::path::correct_case;
use crate::reals::{real_fn, REAL_READLINK};
use crate::state::set_errno;

type ReadlinkFn = unsafe extern "C" fn(*const c_char, *mut c_char, size_t) -> ssize_t;

pub(crate) unsafe fn readlink_impl(
    path: *const c_char,
    buf: *mut c_char,
    bufsiz: size_t,
) -> ssize_t {
    let Some(real) = real_fn!(REAL_READLINK, ReadlinkFn) else {
        case_error!("readlink unavailable: real symbol not bound");
        set_errno(libc::ENOSYS);
        return -1;
    };
    let fixed = correct_case(path);
    real(fixed.as_ptr_or(path), buf, bufsiz)
}
