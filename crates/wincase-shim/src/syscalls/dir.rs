//! Directory open.
//!
//! Only `opendir` is overridden; `readdir`/`closedir` operate on the DIR
//! handle and need no path rewriting, and the resolver's own enumeration
//! goes through the raw table to avoid recursive interception.

use libc::c_char;

use crate::path::correct_case;
use crate::reals::{real_fn, REAL_OPENDIR};
use crate::state::set_errno;

type OpendirFn = unsafe extern "C" fn(*const c_char) -> *mut libc::DIR;

pub(crate) unsafe fn opendir_impl(path: *const c_char) -> *mut libc::DIR {
    let Some(real) = real_fn!(REAL_OPENDIR, OpendirFn) else {
        case_error!("opendir unavailable: real symbol not bound");
        set_errno(libc::ENOSYS);
        return std::ptr::null_mut();
    };
    let fixed = correct_case(path);
    real(fixed.as_ptr_or(path))
}
