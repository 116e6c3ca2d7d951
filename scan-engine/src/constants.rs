//! Default tuning constants shared by `Scanner` and its callers.

/// Default chunk size a `Scanner` reads at a time, 1 MiB.
pub const SCAN_BLOCKSIZE: u64 = 1024 * 1024;

/// Default carry-over window between consecutive chunks within one range.
///
/// Must be at least as large as the longest needle registered across every
/// `Check` in a scan, or a needle straddling a chunk boundary can be missed.
pub const DEFAULT_OVERLAP: u64 = 1024;
