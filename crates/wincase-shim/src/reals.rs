//! Real symbol storage.
//!
//! Each overridden entry point is bound once, lazily, to the next
//! definition in the process's symbol search order via
//! `dlsym(RTLD_NEXT)`. The resolver's directory-enumeration primitives
//! live in the same table but are never exported as shims, which is what
//! keeps resolution from re-entering the interception layer.

use libc::{c_char, c_void};
use std::sync::atomic::{AtomicPtr, Ordering};

/// Lazily-bound pointer to a real libc function.
pub struct RealSymbol {
    ptr: AtomicPtr<c_void>,
    name: &'static str,
}

impl RealSymbol {
    pub const fn new(name: &'static str) -> Self {
        Self {
            ptr: AtomicPtr::new(std::ptr::null_mut()),
            name,
        }
    }

    /// Bind on first use; races converge on the same pointer. A failed
    /// lookup is a fatal environment-configuration fault: it is logged at
    /// ERROR and null is returned for the caller to fail the libc call.
    pub unsafe fn get(&self) -> *mut c_void {
        let p = self.ptr.load(Ordering::Acquire);
        if !p.is_null() {
            return p;
        }
        let f = libc::dlsym(libc::RTLD_NEXT, self.name.as_ptr() as *const c_char);
        if f.is_null() {
            case_error!("could not bind real symbol {}", self.name.trim_end_matches('\0'));
            return f;
        }
        self.ptr.store(f, Ordering::Release);
        f
    }
}

/// Cast a bound symbol to its function type; `None` when binding failed.
macro_rules! real_fn {
    ($sym:expr, $t:ty) => {{
        let p = unsafe { $sym.get() };
        if p.is_null() {
            None
        } else {
            Some(unsafe { std::mem::transmute::<*mut libc::c_void, $t>(p) })
        }
    }};
}
pub(crate) use real_fn;

// Publicly overridden entry points
pub static REAL_OPEN: RealSymbol = RealSymbol::new("open\0");
pub static REAL_OPEN64: RealSymbol = RealSymbol::new("open64\0");
pub static REAL_OPENAT: RealSymbol = RealSymbol::new("openat\0");
pub static REAL_OPENAT64: RealSymbol = RealSymbol::new("openat64\0");
pub static REAL_STAT: RealSymbol = RealSymbol::new("stat\0");
pub static REAL_STAT64: RealSymbol = RealSymbol::new("stat64\0");
pub static REAL_LSTAT: RealSymbol = RealSymbol::new("lstat\0");
pub static REAL_LSTAT64: RealSymbol = RealSymbol::new("lstat64\0");
pub static REAL_FSTATAT: RealSymbol = RealSymbol::new("fstatat\0");
pub static REAL_FSTATAT64: RealSymbol = RealSymbol::new("fstatat64\0");
pub static REAL_XSTAT: RealSymbol = RealSymbol::new("__xstat\0");
pub static REAL_XSTAT64: RealSymbol = RealSymbol::new("__xstat64\0");
pub static REAL_LXSTAT: RealSymbol = RealSymbol::new("__lxstat\0");
pub static REAL_LXSTAT64: RealSymbol = RealSymbol::new("__lxstat64\0");
pub static REAL_FXSTATAT: RealSymbol = RealSymbol::new("__fxstatat\0");
pub static REAL_FXSTATAT64: RealSymbol = RealSymbol::new("__fxstatat64\0");
pub static REAL_ACCESS: RealSymbol = RealSymbol::new("access\0");
pub static REAL_FACCESSAT: RealSymbol = RealSymbol::new("faccessat\0");
pub static REAL_OPENDIR: RealSymbol = RealSymbol::new("opendir\0");
pub static REAL_READLINK: RealSymbol = RealSymbol::new("readlink\0");

// Raw enumeration primitives used internally by the resolver; not shimmed.
pub static REAL_READDIR: RealSymbol = RealSymbol::new("readdir\0");
pub static REAL_CLOSEDIR: RealSymbol = RealSymbol::new("closedir\0");
