//! Shared chunk-windowing over an `AddressSpace`: reads ranges in
//! `block_size`-sized pieces, carrying `overlap` trailing bytes from one
//! chunk into the next *within the same range*, and dropping the carry at
//! range boundaries. Used by both `Scanner` (one set of checks) and
//! `ScannerGroup` (many scanners sharing one physical read per chunk).

use scan_core::{AddressRange, AddressSpace, ScanError};

struct RangeCursor {
    range: AddressRange,
    next_virt: u64,
    prev_overlap: Vec<u8>,
}

pub(crate) struct ChunkWindower<'a> {
    space: &'a dyn AddressSpace,
    block_size: u64,
    overlap: u64,
    ranges: std::vec::IntoIter<AddressRange>,
    range_cursor: Option<RangeCursor>,
}

impl<'a> ChunkWindower<'a> {
    pub(crate) fn new(space: &'a dyn AddressSpace, start: u64, maxlen: u64, block_size: u64, overlap: u64) -> Self {
        let scan_end = start.saturating_add(maxlen);
        let ranges: Vec<AddressRange> = space.address_ranges(start, scan_end).collect();
        Self {
            space,
            block_size,
            overlap,
            ranges: ranges.into_iter(),
            range_cursor: None,
        }
    }

    /// Windows a single caller-supplied range directly, without consulting
    /// `AddressSpace::address_ranges`. Used where the caller already knows
    /// the virt/phys mapping for a dense window (`ScannerGroup`'s top-level
    /// entry point, and `DiscontigScannerGroup`'s per-range delegation).
    pub(crate) fn single_range(space: &'a dyn AddressSpace, range: AddressRange, block_size: u64, overlap: u64) -> Self {
        Self {
            space,
            block_size,
            overlap,
            ranges: vec![range].into_iter(),
            range_cursor: None,
        }
    }

    /// Ensures a range is staged and returns the absolute offset the next
    /// chunk will start at, without reading anything yet. `None` once every
    /// range is exhausted.
    pub(crate) fn advance(&mut self) -> Option<u64> {
        loop {
            if let Some(rc) = &self.range_cursor {
                if rc.next_virt < rc.range.virt_end() {
                    return Some(rc.next_virt);
                }
                self.range_cursor = None;
            }
            match self.ranges.next() {
                None => return None,
                Some(range) => {
                    self.range_cursor = Some(RangeCursor {
                        next_virt: range.virt_start,
                        range,
                        prev_overlap: Vec::new(),
                    });
                }
            }
        }
    }

    /// Reads the chunk staged by the most recent `advance()` call, carrying
    /// overlap into the cursor for the next one. Must only be called
    /// immediately after `advance()` returned `Some`.
    pub(crate) fn read_chunk(&mut self) -> Result<(Vec<u8>, u64), ScanError> {
        let rc = self
            .range_cursor
            .as_mut()
            .expect("read_chunk called without a prior successful advance()");

        let remaining = rc.range.virt_end() - rc.next_virt;
        let chunk_len = remaining.min(self.block_size);
        let phys_off = rc.range.phys_start + (rc.next_virt - rc.range.virt_start);

        let fresh = self.space.read_phys(phys_off, chunk_len as usize)?;

        let base_offset = rc.next_virt - rc.prev_overlap.len() as u64;
        let mut data = std::mem::take(&mut rc.prev_overlap);
        data.extend_from_slice(&fresh);

        let next_virt_after = rc.next_virt + chunk_len;
        if next_virt_after < rc.range.virt_end() {
            let keep = (self.overlap as usize).min(data.len());
            rc.prev_overlap = data[data.len() - keep..].to_vec();
        }
        rc.next_virt = next_virt_after;

        Ok((data, base_offset))
    }
}
