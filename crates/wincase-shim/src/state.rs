//! Process-wide shim state: lazy singleton, recursion guard, logger
//! configuration. Constructed on the first intercepted call, mutated by
//! every shim invocation, never torn down (reclaimed at process exit).

use libc::{c_int, c_void};
use std::ffi::CStr;
use std::ptr;
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicPtr, AtomicU8, AtomicUsize, Ordering};

use wincase_resolve::CaseResolver;

use crate::rawfs::RawFs;
use crate::reals::{real_fn, REAL_OPEN};

// ============================================================================
// Global state & guards
// ============================================================================

pub(crate) static SHIM_STATE: AtomicPtr<ShimState> = AtomicPtr::new(ptr::null_mut());
/// One thread wins the right to construct the state; losers and re-entrant
/// calls during construction pass through to the raw primitive.
pub(crate) static INITIALIZING: AtomicBool = AtomicBool::new(false);
/// True until the `.init_array` constructor runs. All shims forward
/// directly during loader bootstrap.
pub static EARLY: AtomicBool = AtomicBool::new(true);

pub(crate) static LOG_ENABLED: AtomicBool = AtomicBool::new(false);
pub(crate) static LOG_LEVEL: AtomicU8 = AtomicU8::new(LogLevel::Info as u8);
/// Diagnostics destination; stderr unless WINCASE_LOG_FILE was opened.
pub(crate) static LOG_FD: AtomicI32 = AtomicI32::new(2);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl LogLevel {
    /// Clamp an environment-supplied verbosity selector to the level range.
    fn clamped(raw: i64) -> Self {
        match raw {
            i64::MIN..=0 => LogLevel::Error,
            1 => LogLevel::Warn,
            2 => LogLevel::Info,
            3 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }

    pub(crate) fn tag(self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }
}

#[inline]
pub(crate) fn log_enabled(level: LogLevel) -> bool {
    LOG_ENABLED.load(Ordering::Relaxed) && level as u8 <= LOG_LEVEL.load(Ordering::Relaxed)
}

/// Single unbuffered write; client processes may die abnormally, so every
/// line must hit the fd immediately.
pub(crate) fn emit(msg: &str) {
    let fd = LOG_FD.load(Ordering::Relaxed);
    unsafe {
        libc::write(fd, msg.as_ptr() as *const c_void, msg.len());
    }
}

/// Coarse realtime clock for log timestamps.
pub(crate) fn coarse_time() -> (i64, i64) {
    let mut ts = libc::timespec {
        tv_sec: 0,
        tv_nsec: 0,
    };
    unsafe {
        libc::clock_gettime(libc::CLOCK_REALTIME, &mut ts);
    }
    (ts.tv_sec as i64, ts.tv_nsec as i64 / 1_000_000)
}

#[cfg(target_os = "linux")]
pub(crate) fn set_errno(e: c_int) {
    unsafe {
        *libc::__errno_location() = e;
    }
}

// ============================================================================
// Recursion guard
// ============================================================================

// Lock-free pthread-key bootstrap; a mutex here could deadlock during
// library init.
static RECURSION_KEY_INIT: AtomicBool = AtomicBool::new(false);
static RECURSION_KEY_VALUE: AtomicUsize = AtomicUsize::new(0);
static BOOTSTRAPPING: AtomicBool = AtomicBool::new(false);

fn recursion_key() -> libc::pthread_key_t {
    if RECURSION_KEY_INIT.load(Ordering::Acquire) {
        return RECURSION_KEY_VALUE.load(Ordering::Relaxed) as libc::pthread_key_t;
    }

    if BOOTSTRAPPING.swap(true, Ordering::SeqCst) {
        return 0;
    }

    let mut key: libc::pthread_key_t = 0;
    let ret = unsafe { libc::pthread_key_create(&mut key, None) };
    if ret != 0 {
        BOOTSTRAPPING.store(false, Ordering::SeqCst);
        return 0;
    }

    if RECURSION_KEY_VALUE
        .compare_exchange(0, key as usize, Ordering::SeqCst, Ordering::SeqCst)
        .is_ok()
    {
        RECURSION_KEY_INIT.store(true, Ordering::Release);
        BOOTSTRAPPING.store(false, Ordering::SeqCst);
        key
    } else {
        unsafe { libc::pthread_key_delete(key) };
        BOOTSTRAPPING.store(false, Ordering::SeqCst);
        RECURSION_KEY_VALUE.load(Ordering::Relaxed) as libc::pthread_key_t
    }
}

/// Per-thread re-entrancy guard. `enter` fails when this thread is already
/// inside the resolution engine; the caller then forwards the unmodified
/// path to the raw primitive.
pub(crate) struct ShimGuard(bool);

impl ShimGuard {
    pub(crate) fn enter() -> Option<Self> {
        if BOOTSTRAPPING.load(Ordering::Relaxed) {
            return None;
        }
        let key = recursion_key();
        if key == 0 {
            // No TLS key available; proceed unguarded. Safe because every
            // internal probe goes through the raw symbol table anyway.
            return Some(ShimGuard(false));
        }
        let val = unsafe { libc::pthread_getspecific(key) };
        if !val.is_null() {
            return None;
        }
        unsafe { libc::pthread_setspecific(key, ptr::dangling::<c_void>()) };
        Some(ShimGuard(true))
    }
}

impl Drop for ShimGuard {
    fn drop(&mut self) {
        if self.0 {
            let key = recursion_key();
            if key != 0 {
                unsafe { libc::pthread_setspecific(key, ptr::null()) };
            }
        }
    }
}

// ============================================================================
// Shim state singleton
// ============================================================================

pub(crate) struct ShimState {
    pub resolver: CaseResolver<RawFs>,
}

impl ShimState {
    /// Read the environment surface once and build the resolution context.
    /// Uses `libc::getenv` directly: `std::env` takes a lock that may not
    /// be safe this early in an injected process.
    fn init() -> *mut Self {
        if env_truthy(c"WINCASE_DEBUG") {
            LOG_ENABLED.store(true, Ordering::Relaxed);
        }
        if let Some(raw) = env_str(c"WINCASE_LOG_LEVEL") {
            if let Ok(n) = raw.parse::<i64>() {
                LOG_LEVEL.store(LogLevel::clamped(n) as u8, Ordering::Relaxed);
            }
        }
        if let Some(path) = env_str(c"WINCASE_LOG_FILE") {
            open_log_file(&path);
        }

        let state = Box::new(ShimState {
            resolver: CaseResolver::new(RawFs),
        });
        Box::into_raw(state)
    }

    pub(crate) fn get() -> Option<&'static Self> {
        let ptr = SHIM_STATE.load(Ordering::Acquire);
        if !ptr.is_null() {
            return unsafe { Some(&*ptr) };
        }

        if INITIALIZING.swap(true, Ordering::SeqCst) {
            return None;
        }

        let ptr = Self::init();
        SHIM_STATE.store(ptr, Ordering::Release);
        INITIALIZING.store(false, Ordering::SeqCst);
        case_info!("activated (pid {})", unsafe { libc::getpid() });

        unsafe { Some(&*ptr) }
    }
}

fn env_str(key: &CStr) -> Option<String> {
    let val = unsafe { libc::getenv(key.as_ptr()) };
    if val.is_null() {
        return None;
    }
    let s = unsafe { CStr::from_ptr(val) }.to_str().ok()?;
    if s.is_empty() {
        None
    } else {
        Some(s.to_owned())
    }
}

fn env_truthy(key: &CStr) -> bool {
    matches!(env_str(key).as_deref(), Some("1") | Some("true") | Some("TRUE"))
}

/// Open the diagnostics file append-only through the raw open binding;
/// falls back to stderr on any failure.
fn open_log_file(path: &str) {
    let Ok(cpath) = std::ffi::CString::new(path) else {
        return;
    };
    let Some(open) = real_fn!(
        REAL_OPEN,
        unsafe extern "C" fn(*const libc::c_char, c_int, libc::mode_t) -> c_int
    ) else {
        return;
    };
    let fd = unsafe {
        open(
            cpath.as_ptr(),
            libc::O_WRONLY | libc::O_CREAT | libc::O_APPEND,
            0o644,
        )
    };
    if fd >= 0 {
        LOG_FD.store(fd, Ordering::Relaxed);
    }
}
