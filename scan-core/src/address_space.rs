//! The `AddressSpace` boundary: a read-only, possibly sparse view over memory.
//!
//! Concrete implementations (per-OS virtual-memory walkers, core-dump
//! readers, and the like) live outside this workspace; only the interface is
//! defined here, plus a small in-memory implementation used by tests.

use crate::error::ScanError;

/// A contiguous, non-overlapping run of addresses: `(virt_start, phys_start, length)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressRange {
    pub virt_start: u64,
    pub phys_start: u64,
    pub length: u64,
}

impl AddressRange {
    pub fn new(virt_start: u64, phys_start: u64, length: u64) -> Self {
        Self {
            virt_start,
            phys_start,
            length,
        }
    }

    #[inline]
    pub fn virt_end(&self) -> u64 {
        self.virt_start + self.length
    }
}

/// A read-only enumerable view over memory.
///
/// Implementations must yield ranges in ascending `virt_start` order,
/// non-overlapping, clipped to the requested `[start, end)` window.
pub trait AddressSpace {
    /// Enumerates address ranges intersecting `[start, end)`.
    fn address_ranges(&self, start: u64, end: u64) -> Box<dyn Iterator<Item = AddressRange> + '_>;

    /// Reads exactly `length` bytes from physical offset `phys_off`.
    fn read_phys(&self, phys_off: u64, length: usize) -> Result<Vec<u8>, ScanError>;
}

/// An in-memory `AddressSpace` backed by a flat byte buffer and an explicit
/// set of ranges, used by tests and examples.
pub struct MemoryAddressSpace {
    data: Vec<u8>,
    ranges: Vec<AddressRange>,
}

impl MemoryAddressSpace {
    /// Builds a single dense range `[0, data.len())` mapping virt == phys.
    pub fn dense(data: Vec<u8>) -> Self {
        let len = data.len() as u64;
        Self {
            data,
            ranges: vec![AddressRange::new(0, 0, len)],
        }
    }

    /// Builds an address space from explicit ranges over a shared backing buffer.
    ///
    /// `phys_start` in each range indexes directly into `data`.
    pub fn with_ranges(data: Vec<u8>, ranges: Vec<AddressRange>) -> Self {
        Self { data, ranges }
    }
}

impl AddressSpace for MemoryAddressSpace {
    fn address_ranges(&self, start: u64, end: u64) -> Box<dyn Iterator<Item = AddressRange> + '_> {
        Box::new(self.ranges.iter().filter_map(move |r| {
            let clip_start = r.virt_start.max(start);
            let clip_end = r.virt_end().min(end);
            if clip_start >= clip_end {
                return None;
            }
            let delta = clip_start - r.virt_start;
            Some(AddressRange::new(
                clip_start,
                r.phys_start + delta,
                clip_end - clip_start,
            ))
        }))
    }

    fn read_phys(&self, phys_off: u64, length: usize) -> Result<Vec<u8>, ScanError> {
        let start = phys_off as usize;
        let end = start
            .checked_add(length)
            .ok_or_else(|| ScanError::OutOfRange(format!("phys_off {phys_off} + {length} overflows")))?;
        self.data.get(start..end).map(<[u8]>::to_vec).ok_or_else(|| {
            ScanError::Read {
                offset: phys_off,
                source: std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    format!("requested [{start}, {end}) outside backing buffer of len {}", self.data.len()),
                ),
            }
        })
    }
}
