//! The scanner kernel: windows an `AddressSpace` into overlapping
//! `BufferView` chunks, evaluates an ordered list of `Check`s at every
//! candidate offset, and yields strictly-ascending, deduplicated hits.

use std::collections::VecDeque;

use scan_checks::{Check, CheckResult};
use scan_core::{AddressSpace, BufferView, Match, ScanError};
use scan_telemetry::{NullSession, Session};

use crate::chunker::ChunkWindower;
use crate::constants::{DEFAULT_OVERLAP, SCAN_BLOCKSIZE};

/// Owns an ordered list of constraints and the tuning knobs (`block_size`,
/// `overlap`) that control how the address space is windowed.
///
/// All constraints must hold at the same offset for a hit to be reported;
/// evaluation stops at the first `NoMatch`. Stateful checks (multi-string,
/// signature) are single-pass: a `Scanner` built around one must not be
/// scanned twice.
pub struct Scanner {
    name: String,
    constraints: Vec<Box<dyn Check>>,
    block_size: u64,
    overlap: u64,
    last_reported_hit: Option<u64>,
}

impl Scanner {
    pub fn new(name: impl Into<String>, constraints: Vec<Box<dyn Check>>) -> Self {
        Self {
            name: name.into(),
            constraints,
            block_size: SCAN_BLOCKSIZE,
            overlap: DEFAULT_OVERLAP,
            last_reported_hit: None,
        }
    }

    pub fn with_block_size(mut self, block_size: u64) -> Self {
        self.block_size = block_size;
        self
    }

    pub fn with_overlap(mut self, overlap: u64) -> Self {
        self.overlap = overlap;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Evaluates every constraint across `buf`, returning deduplicated hits
    /// in ascending order and advancing this scanner's dedup cursor. Shared
    /// by [`ScanIter`] and by [`crate::scanner_group::ScannerGroup`], which
    /// feeds multiple scanners the same physically-read buffer.
    pub(crate) fn scan_buffer(&mut self, buf: &BufferView<'_>) -> Vec<Match> {
        let mut hits = Vec::new();
        let mut s = buf.base_offset();
        while s < buf.end() {
            let mut matched_needle: Option<Vec<u8>> = None;
            let mut all_match = true;
            for check in self.constraints.iter_mut() {
                match check.check(buf, s) {
                    CheckResult::NoMatch => {
                        all_match = false;
                        break;
                    }
                    CheckResult::Match { needle } => {
                        if matched_needle.is_none() {
                            matched_needle = needle;
                        }
                    }
                }
            }

            if all_match && self.last_reported_hit.map_or(true, |lr| s > lr) {
                hits.push(Match {
                    offset: s,
                    needle: matched_needle,
                    needle_index: None,
                });
                self.last_reported_hit = Some(s);
            }

            let skip = self
                .constraints
                .iter_mut()
                .map(|c| c.skip(buf, s))
                .max()
                .unwrap_or(1);
            let advance = skip.max(1).min(buf.end() - s);
            s += advance;
        }
        hits
    }

    /// Scans `[start, start + maxlen)` of `space`, reporting progress to
    /// `session` before each chunk. The returned iterator is lazy: no read
    /// happens until it is polled.
    pub fn scan<'a>(
        &'a mut self,
        space: &'a dyn AddressSpace,
        session: &'a dyn Session,
        start: u64,
        maxlen: u64,
    ) -> ScanIter<'a> {
        let windower = ChunkWindower::new(space, start, maxlen, self.block_size, self.overlap);
        ScanIter {
            scanner: self,
            session,
            windower,
            pending: VecDeque::new(),
            terminated: false,
        }
    }

    /// Convenience overload that reports progress to a `NullSession`.
    pub fn scan_silent<'a>(
        &'a mut self,
        space: &'a dyn AddressSpace,
        start: u64,
        maxlen: u64,
    ) -> ScanIter<'a> {
        self.scan(space, &NullSession, start, maxlen)
    }
}

/// The lazy, pull-based iterator returned by [`Scanner::scan`].
pub struct ScanIter<'a> {
    scanner: &'a mut Scanner,
    session: &'a dyn Session,
    windower: ChunkWindower<'a>,
    pending: VecDeque<Match>,
    terminated: bool,
}

impl<'a> ScanIter<'a> {
    fn advance_chunk(&mut self) -> Result<bool, ScanError> {
        let Some(offset) = self.windower.advance() else {
            return Ok(false);
        };
        self.session.report_progress(offset, self.scanner.name());
        let (data, base_offset) = self.windower.read_chunk()?;
        let buf = BufferView::new(&data, base_offset);
        self.pending.extend(self.scanner.scan_buffer(&buf));
        Ok(true)
    }
}

impl<'a> Iterator for ScanIter<'a> {
    type Item = Result<Match, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(m) = self.pending.pop_front() {
                return Some(Ok(m));
            }
            if self.terminated {
                return None;
            }
            match self.advance_chunk() {
                Ok(true) => continue,
                Ok(false) => {
                    self.terminated = true;
                    return None;
                }
                Err(e) => {
                    self.terminated = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scan_checks::StringCheck;
    use scan_core::{AddressRange, MemoryAddressSpace};

    fn offsets(space: &dyn AddressSpace, scanner: &mut Scanner, start: u64, maxlen: u64) -> Vec<u64> {
        scanner
            .scan_silent(space, start, maxlen)
            .map(|r| r.unwrap().offset)
            .collect()
    }

    #[test]
    fn hit_across_overlap_boundary() {
        let block = 1024u64 * 1024;
        let mut data = vec![0u8; (2 * block) as usize];
        let needle_pos = (block - 2) as usize;
        data[needle_pos..needle_pos + 4].copy_from_slice(b"ABCD");
        let space = MemoryAddressSpace::dense(data);

        let mut scanner = Scanner::new("s", vec![Box::new(StringCheck::new(b"ABCD".to_vec()))])
            .with_block_size(block)
            .with_overlap(1024);

        let hits = offsets(&space, &mut scanner, 0, 2 * block);
        assert_eq!(hits, vec![needle_pos as u64]);
    }

    #[test]
    fn monotone_and_deduped_across_many_chunks() {
        let block = 64u64;
        let mut data = vec![0u8; 2000];
        for pos in (0..data.len() - 4).step_by(137) {
            data[pos..pos + 4].copy_from_slice(b"WXYZ");
        }
        let space = MemoryAddressSpace::dense(data);
        let mut scanner = Scanner::new("s", vec![Box::new(StringCheck::new(b"WXYZ".to_vec()))])
            .with_block_size(block)
            .with_overlap(8);

        let hits = offsets(&space, &mut scanner, 0, 2000);
        let mut sorted = hits.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(hits, sorted, "offsets must already be ascending and unique");
        assert!(!hits.is_empty());
    }

    #[test]
    fn discontiguous_ranges_do_not_stitch_needles() {
        let ranges = vec![
            AddressRange::new(0, 0, 4096),
            AddressRange::new(8192, 8192, 4096),
        ];
        let mut data = vec![0u8; 16384];
        // Straddles the end of the first range: never visited as one buffer.
        data[4094..4098].copy_from_slice(b"ABCD");
        // Cleanly inside the second range.
        data[8192..8196].copy_from_slice(b"ABCD");
        let space = MemoryAddressSpace::with_ranges(data, ranges);

        let mut scanner = Scanner::new("s", vec![Box::new(StringCheck::new(b"ABCD".to_vec()))])
            .with_block_size(4096)
            .with_overlap(1024);

        let hits = offsets(&space, &mut scanner, 0, 20000);
        assert_eq!(hits, vec![8192]);
    }

    #[test]
    fn read_error_terminates_but_keeps_prior_matches() {
        struct FlakySpace {
            data: Vec<u8>,
        }
        impl AddressSpace for FlakySpace {
            fn address_ranges(&self, start: u64, end: u64) -> Box<dyn Iterator<Item = AddressRange> + '_> {
                let len = self.data.len() as u64;
                let e = end.min(len);
                Box::new(std::iter::once(AddressRange::new(start, start, e - start)))
            }
            fn read_phys(&self, phys_off: u64, length: usize) -> Result<Vec<u8>, ScanError> {
                if phys_off > 10 {
                    return Err(ScanError::Read {
                        offset: phys_off,
                        source: std::io::Error::new(std::io::ErrorKind::Other, "boom"),
                    });
                }
                Ok(self.data[phys_off as usize..phys_off as usize + length].to_vec())
            }
        }

        let mut data = vec![0u8; 40];
        data[2..6].copy_from_slice(b"ABCD");
        let space = FlakySpace { data };
        let mut scanner = Scanner::new("s", vec![Box::new(StringCheck::new(b"ABCD".to_vec()))])
            .with_block_size(8)
            .with_overlap(2);

        let mut iter = scanner.scan_silent(&space, 0, 40);
        let first = iter.next().unwrap();
        assert_eq!(first.unwrap().offset, 2);
        let rest: Vec<_> = iter.by_ref().collect();
        assert!(rest.iter().any(|r| r.is_err()));
        assert!(iter.next().is_none());
    }
}
