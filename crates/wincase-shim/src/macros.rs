//! Leveled diagnostic macros.
//!
//! Messages are formatted into a fixed stack buffer and emitted with one
//! unbuffered write, so logging never allocates and survives abnormal
//! client death. Cost when disabled is a single relaxed atomic load.

#[macro_export]
macro_rules! case_log_at_level {
    ($level:expr, $($arg:tt)*) => {{
        let level = $level;
        if $crate::state::log_enabled(level) {
            use std::fmt::Write;
            let mut buf = [0u8; 512];
            let mut w = $crate::macros::StackWriter::new(&mut buf);
            let pid = unsafe { libc::getpid() };
            let (secs, millis) = $crate::state::coarse_time();
            let _ = write!(w, "[wincase][{}][{}.{:03}][{}] ", pid, secs, millis, level.tag());
            let _ = write!(w, $($arg)*);
            let _ = writeln!(w);
            $crate::state::emit(w.as_str());
        }
    }};
}

#[macro_export]
macro_rules! case_error { ($($arg:tt)*) => { $crate::case_log_at_level!($crate::state::LogLevel::Error, $($arg)*) }; }
#[macro_export]
macro_rules! case_warn { ($($arg:tt)*) => { $crate::case_log_at_level!($crate::state::LogLevel::Warn, $($arg)*) }; }
#[macro_export]
macro_rules! case_info { ($($arg:tt)*) => { $crate::case_log_at_level!($crate::state::LogLevel::Info, $($arg)*) }; }
#[macro_export]
macro_rules! case_debug { ($($arg:tt)*) => { $crate::case_log_at_level!($crate::state::LogLevel::Debug, $($arg)*) }; }
#[macro_export]
macro_rules! case_trace { ($($arg:tt)*) => { $crate::case_log_at_level!($crate::state::LogLevel::Trace, $($arg)*) }; }

/// Formats into a caller-provided buffer, truncating on overflow.
pub struct StackWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> StackWriter<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.buf[..self.pos]).unwrap_or("")
    }
}

impl std::fmt::Write for StackWriter<'_> {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        let bytes = s.as_bytes();
        let remaining = self.buf.len() - self.pos;
        let to_copy = std::cmp::min(bytes.len(), remaining);
        self.buf[self.pos..self.pos + to_copy].copy_from_slice(&bytes[..to_copy]);
        self.pos += to_copy;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Write;

    #[test]
    fn stack_writer_truncates_without_error() {
        let mut buf = [0u8; 8];
        let mut w = StackWriter::new(&mut buf);
        write!(w, "0123456789").unwrap();
        assert_eq!(w.as_str(), "01234567");
    }

    #[test]
    fn stack_writer_rejects_partial_utf8() {
        let mut buf = [0u8; 5];
        let mut w = StackWriter::new(&mut buf);
        // Truncation can split a multi-byte sequence; as_str must not panic.
        write!(w, "ééé").unwrap();
        let _ = w.as_str();
    }
}
