//! # wincase-resolve
//!
//! Path resolution engine for the wincase preload shim: maps a path whose
//! components differ only in letter case from what is on disk to the true
//! on-disk spelling.
//!
//! The engine is written against the small [`FsProbe`] trait so the
//! algorithm itself stays free of FFI. The preload shim supplies a probe
//! backed by raw, non-intercepted libc primitives; tests and standalone
//! callers can use [`StdProbe`].

pub mod exclude;
pub mod resolver;

pub use exclude::is_excluded;
pub use resolver::{CaseResolver, FsProbe, ScanError, StdProbe};
