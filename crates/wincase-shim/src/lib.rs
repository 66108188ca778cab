//! # wincase-shim
//!
//! LD_PRELOAD shim that makes a case-sensitive filesystem behave as
//! case-insensitive to unmodified client programs. Each overridden libc
//! entry point rewrites only its path argument, via [`wincase_resolve`],
//! then forwards to the real implementation obtained with
//! `dlsym(RTLD_NEXT)`; return values and errno pass through untouched.
//!
//! There is no initialization API: behavior activates on the first call to
//! an overridden entry point.

// Unsafe FFI entry points without safety docs - these are inherently unsafe C ABI
#![allow(clippy::missing_safety_doc)]

// Macros must be defined before modules that use them
#[macro_use]
pub mod macros;

pub mod interpose;
pub(crate) mod path;
pub mod rawfs;
pub mod reals;
pub mod state;
pub mod syscalls;

/// Static constructor: marks the loader-bootstrap phase as over. Until it
/// runs, every shim forwards directly to its real binding without touching
/// shim state.
#[cfg(target_os = "linux")]
#[link_section = ".init_array"]
#[used]
pub static SET_READY: unsafe extern "C" fn() = {
    unsafe extern "C" fn ready() {
        crate::state::EARLY.store(false, std::sync::atomic::Ordering::SeqCst);
    }
    ready
};
