//! Scans for byte encodings of a fixed list of pointer-sized integer values,
//! built on top of [`MultiStringScanner`].

use scan_core::{AddressSpace, Profile, ScanError};
use scan_telemetry::{NullSession, Session};

use crate::multi_string_scanner::MultiStringScanner;

/// Scans for the byte representations of a set of candidate pointer values.
pub struct PointerScanner {
    inner: MultiStringScanner,
}

impl PointerScanner {
    /// Builds a scanner over `addresses`, each encoded per `profile`.
    ///
    /// Fails if `profile`'s address size is neither 4 nor 8 bytes, or if any
    /// address overflows that width.
    pub fn new(
        name: impl Into<String>,
        addresses: &[u64],
        profile: &dyn Profile,
    ) -> Result<Self, ScanError> {
        let width = profile.address_size();
        if width != 4 && width != 8 {
            return Err(ScanError::Construction(format!(
                "unsupported pointer width {width} (expected 4 or 8)"
            )));
        }

        let mut needles = Vec::with_capacity(addresses.len());
        for &addr in addresses {
            let mut buf = Vec::with_capacity(width);
            profile
                .write_pointer(addr, &mut buf)
                .map_err(ScanError::Construction)?;
            needles.push(buf);
        }

        Ok(Self {
            inner: MultiStringScanner::new(name, needles)?,
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

    /// Scans `[start, start+maxlen)`, yielding `(offset, encoded_pointer)` pairs.
    pub fn scan<'a>(
        &'a mut self,
        space: &'a dyn AddressSpace,
        session: &'a dyn Session,
        start: u64,
        maxlen: u64,
    ) -> impl Iterator<Item = Result<(u64, Vec<u8>), ScanError>> + 'a {
        self.inner.scan(space, session, start, maxlen)
    }

    pub fn scan_silent<'a>(
        &'a mut self,
        space: &'a dyn AddressSpace,
        start: u64,
        maxlen: u64,
    ) -> impl Iterator<Item = Result<(u64, Vec<u8>), ScanError>> + 'a {
        self.inner.scan_silent(space, start, maxlen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scan_core::{LittleEndian64, MemoryAddressSpace};

    #[test]
    fn finds_encoded_pointers_at_known_offsets() {
        let profile = LittleEndian64;
        let pointers = [0x1000u64, 0xdead_beef_u64, 0x7fff_0000_1000u64];

        let mut data = vec![0u8; 4096];
        let placements = [16usize, 512, 3000];
        for (&addr, &pos) in pointers.iter().zip(placements.iter()) {
            let mut encoded = Vec::new();
            profile.write_pointer(addr, &mut encoded).unwrap();
            data[pos..pos + encoded.len()].copy_from_slice(&encoded);
        }
        let space = MemoryAddressSpace::dense(data);

        let mut scanner = PointerScanner::new("ptr", &pointers, &profile).unwrap();
        let offsets: Vec<u64> = scanner
            .scan_silent(&space, 0, 4096)
            .map(|r| r.unwrap().0)
            .collect();

        assert_eq!(offsets, vec![16, 512, 3000]);
    }

    #[test]
    fn rejects_unsupported_pointer_width() {
        struct BadProfile;
        impl Profile for BadProfile {
            fn address_size(&self) -> usize {
                6
            }
            fn write_pointer(&self, _value: u64, _out: &mut Vec<u8>) -> Result<(), String> {
                unreachable!()
            }
        }
        assert!(PointerScanner::new("ptr", &[1, 2], &BadProfile).is_err());
    }
}
