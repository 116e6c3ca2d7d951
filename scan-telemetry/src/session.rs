//! The progress-reporting boundary a `Scanner` calls into once per chunk.
//!
//! Reporting is advisory: a `Session` gives no retry or ordering guarantees,
//! and a scan never fails because of it.

use tracing::info;

/// Receives best-effort progress notifications from a scan in progress.
pub trait Session {
    /// Called once before each chunk is read, with the chunk's starting
    /// absolute offset and the name of the scanner reporting it.
    fn report_progress(&self, current_abs: u64, scanner_name: &str);
}

/// A `Session` that discards every report. The engine's default.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSession;

impl Session for NullSession {
    fn report_progress(&self, _current_abs: u64, _scanner_name: &str) {}
}

/// A `Session` that emits a `tracing::info!` event per report.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSession;

impl Session for TracingSession {
    fn report_progress(&self, current_abs: u64, scanner_name: &str) {
        info!(scanner = scanner_name, offset = current_abs, "scan progress");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn null_session_is_a_no_op() {
        NullSession.report_progress(42, "probe");
    }

    #[traced_test]
    #[test]
    fn tracing_session_emits_an_event() {
        TracingSession.report_progress(42, "probe");
        assert!(logs_contain("scan progress"));
    }
}
