//! A `Scanner` specialized to wrap a single `MultiStringCheck`, exposing the
//! matched needle alongside each offset.

use scan_checks::MultiStringCheck;
use scan_core::{AddressSpace, ScanError};
use scan_telemetry::{NullSession, Session};

use crate::scanner::Scanner;

/// Scans for any of a set of byte needles, yielding `(offset, needle)` pairs.
pub struct MultiStringScanner {
    inner: Scanner,
}

impl MultiStringScanner {
    pub fn new<I, N>(name: impl Into<String>, needles: I) -> Result<Self, ScanError>
    where
        I: IntoIterator<Item = N>,
        N: Into<Vec<u8>>,
    {
        let check = MultiStringCheck::new(needles)?;
        Ok(Self {
            inner: Scanner::new(name, vec![Box::new(check)]),
        })
    }

    pub fn with_block_size(mut self, block_size: u64) -> Self {
        self.inner = self.inner.with_block_size(block_size);
        self
    }

    pub fn with_overlap(mut self, overlap: u64) -> Self {
        self.inner = self.inner.with_overlap(overlap);
        self
    }

    /// Scans `[start, start+maxlen)`, yielding `(offset, needle)` pairs in
    /// ascending offset order.
    pub fn scan<'a>(
        &'a mut self,
        space: &'a dyn AddressSpace,
        session: &'a dyn Session,
        start: u64,
        maxlen: u64,
    ) -> impl Iterator<Item = Result<(u64, Vec<u8>), ScanError>> + 'a {
        self.inner.scan(space, session, start, maxlen).map(|r| {
            r.map(|m| (m.offset, m.needle.expect("MultiStringCheck always names its needle")))
        })
    }

    pub fn scan_silent<'a>(
        &'a mut self,
        space: &'a dyn AddressSpace,
        start: u64,
        maxlen: u64,
    ) -> impl Iterator<Item = Result<(u64, Vec<u8>), ScanError>> + 'a {
        self.scan(space, &NullSession, start, maxlen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scan_core::MemoryAddressSpace;

    #[test]
    fn reports_needle_with_each_offset() {
        let mut data = vec![0u8; 300];
        data[100..103].copy_from_slice(b"bar");
        data[200..203].copy_from_slice(b"foo");
        let space = MemoryAddressSpace::dense(data);

        let mut scanner = MultiStringScanner::new("multi", vec![b"foo".to_vec(), b"bar".to_vec()]).unwrap();
        let hits: Vec<_> = scanner
            .scan_silent(&space, 0, 300)
            .map(|r| r.unwrap())
            .collect();

        assert_eq!(hits, vec![(100, b"bar".to_vec()), (200, b"foo".to_vec())]);
    }
}
