//! Wraps a [`ScannerGroup`] so it can walk a sparse `AddressSpace`.
//!
//! `ScannerGroup` itself assumes a single dense window; this enumerates the
//! space's real ranges and delegates to the group once per range, so
//! scanners never see a buffer stitched across a gap.

use scan_core::{AddressSpace, Match, ScanError};
use scan_telemetry::{NullSession, Session};

use crate::scanner_group::ScannerGroup;

pub struct DiscontigScannerGroup {
    group: ScannerGroup,
}

impl DiscontigScannerGroup {
    pub fn new(group: ScannerGroup) -> Self {
        Self { group }
    }

    /// Scans `[start, start+maxlen)`, enumerating `space`'s ranges and
    /// delegating to the inner group one range at a time. Yields
    /// `(scanner_name, Match)` pairs in range order, then offset order
    /// within each range.
    pub fn scan<'a>(
        &'a mut self,
        space: &'a dyn AddressSpace,
        session: &'a dyn Session,
        start: u64,
        maxlen: u64,
    ) -> Result<Vec<(String, Match)>, ScanError> {
        let scan_end = start.saturating_add(maxlen);
        let ranges: Vec<_> = space.address_ranges(start, scan_end).collect();

        let mut hits = Vec::new();
        for range in ranges {
            for result in self.group.scan_window(space, session, range) {
                hits.push(result?);
            }
        }
        Ok(hits)
    }

    pub fn scan_silent(
        &mut self,
        space: &dyn AddressSpace,
        start: u64,
        maxlen: u64,
    ) -> Result<Vec<(String, Match)>, ScanError> {
        self.scan(space, &NullSession, start, maxlen)
    }
}
