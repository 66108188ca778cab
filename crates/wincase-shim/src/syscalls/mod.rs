//! Per-family shim implementations. Each rewrites only the path argument,
//! then forwards to the real binding; no shim ever calls another shim.

pub mod access;
pub mod dir;
pub mod open;
pub mod path;
pub mod stat;

use libc::c_int;

use crate::state::set_errno;

/// A real binding could not be resolved: fatal environment fault, surfaced
/// to the client as a failed libc call rather than a jump through null.
pub(crate) fn fail_unbound(name: &str) -> c_int {
    case_error!("{} unavailable: real symbol not bound", name);
    set_errno(libc::ENOSYS);
    -1
}
