use thiserror::Error;

/// Unified error type for construction and scan-time failures.
///
/// `ScanError::OutOfRange` is reserved for genuine programming errors (an
/// offset outside the buffer a `Check` was handed); callers should treat its
/// presence as a bug, not a recoverable condition.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("construction failed: {0}")]
    Construction(String),

    #[error("read failed at physical offset {offset}: {source}")]
    Read {
        offset: u64,
        #[source]
        source: std::io::Error,
    },

    #[error("offset out of range for buffer: {0}")]
    OutOfRange(String),
}
