//! Round-robins many named `Scanner`s over one shared `AddressSpace`,
//! reading each chunk once and handing it to every scanner in turn.

use std::collections::VecDeque;

use scan_core::{AddressRange, AddressSpace, Match, ScanError};
use scan_telemetry::{NullSession, Session};

use crate::chunker::ChunkWindower;
use crate::constants::{DEFAULT_OVERLAP, SCAN_BLOCKSIZE};
use crate::scanner::Scanner;

/// A named collection of `Scanner`s scanning the same address space window
/// by window. Scanners are visited in insertion order within each window,
/// so emission order across scanners is deterministic though only defined
/// window-by-window (see crate docs).
pub struct ScannerGroup {
    scanners: Vec<(String, Scanner)>,
    block_size: u64,
    overlap: u64,
}

impl ScannerGroup {
    pub fn new() -> Self {
        Self {
            scanners: Vec::new(),
            block_size: SCAN_BLOCKSIZE,
            overlap: DEFAULT_OVERLAP,
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

    /// Adds a named scanner. Scanners are invited in the order they were added.
    pub fn add(mut self, name: impl Into<String>, scanner: Scanner) -> Self {
        self.scanners.push((name.into(), scanner));
        self
    }

    /// Scans `[start, start+maxlen)` as a single dense window: unlike
    /// `Scanner`, this does not consult `AddressSpace::address_ranges`,
    /// it assumes `start` addresses both the virtual and the physical
    /// space directly. Use `DiscontigScannerGroup` when the underlying
    /// space may be sparse.
    pub fn scan<'a>(
        &'a mut self,
        space: &'a dyn AddressSpace,
        session: &'a dyn Session,
        start: u64,
        maxlen: u64,
    ) -> GroupScanIter<'a> {
        self.scan_window(space, session, AddressRange::new(start, start, maxlen))
    }

    /// Scans a single, already-resolved `(virt, phys, length)` window.
    /// `DiscontigScannerGroup` uses this to delegate one range at a time.
    pub(crate) fn scan_window<'a>(
        &'a mut self,
        space: &'a dyn AddressSpace,
        session: &'a dyn Session,
        range: AddressRange,
    ) -> GroupScanIter<'a> {
        let windower = ChunkWindower::single_range(space, range, self.block_size, self.overlap);
        GroupScanIter {
            scanners: &mut self.scanners,
            session,
            windower,
            pending: VecDeque::new(),
            terminated: false,
        }
    }

    pub fn scan_silent<'a>(
        &'a mut self,
        space: &'a dyn AddressSpace,
        start: u64,
        maxlen: u64,
    ) -> GroupScanIter<'a> {
        self.scan(space, &NullSession, start, maxlen)
    }
}

impl Default for ScannerGroup {
    fn default() -> Self {
        Self::new()
    }
}

pub struct GroupScanIter<'a> {
    scanners: &'a mut Vec<(String, Scanner)>,
    session: &'a dyn Session,
    windower: ChunkWindower<'a>,
    pending: VecDeque<(String, Match)>,
    terminated: bool,
}

impl<'a> GroupScanIter<'a> {
    fn advance_chunk(&mut self) -> Result<bool, ScanError> {
        let Some(offset) = self.windower.advance() else {
            return Ok(false);
        };
        for (name, _) in self.scanners.iter() {
            self.session.report_progress(offset, name);
        }
        let (data, base_offset) = self.windower.read_chunk()?;
        let buf = scan_core::BufferView::new(&data, base_offset);
        for (name, scanner) in self.scanners.iter_mut() {
            for m in scanner.scan_buffer(&buf) {
                self.pending.push_back((name.clone(), m));
            }
        }
        Ok(true)
    }
}

impl<'a> Iterator for GroupScanIter<'a> {
    type Item = Result<(String, Match), ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(pair) = self.pending.pop_front() {
                return Some(Ok(pair));
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
