//! The `Profile` boundary consumed by the pointer scanner: target pointer
//! width and byte order. Concrete profiles (x86, x86_64, arm, ...) are owned
//! by the caller; only the trait and two common instances live here.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

/// Describes how to encode an integer as a pointer for a target architecture.
pub trait Profile {
    /// Pointer width in bytes (4 or 8 for every architecture this crate supports).
    fn address_size(&self) -> usize;

    /// Appends `value` to `out`, encoded at `address_size()` bytes in this
    /// architecture's byte order.
    ///
    /// Returns an error message if `value` does not fit in `address_size()`
    /// bytes.
    fn write_pointer(&self, value: u64, out: &mut Vec<u8>) -> Result<(), String>;
}

fn check_fits(value: u64, width: usize) -> Result<(), String> {
    if width < 8 && value >= (1u64 << (width * 8)) {
        return Err(format!("value {value:#x} does not fit in {width} bytes"));
    }
    Ok(())
}

/// 64-bit little-endian pointers (x86_64, aarch64, ...).
pub struct LittleEndian64;

impl Profile for LittleEndian64 {
    fn address_size(&self) -> usize {
        8
    }

    fn write_pointer(&self, value: u64, out: &mut Vec<u8>) -> Result<(), String> {
        let mut buf = [0u8; 8];
        LittleEndian::write_u64(&mut buf, value);
        out.extend_from_slice(&buf);
        Ok(())
    }
}

/// 32-bit little-endian pointers (x86, arm).
pub struct LittleEndian32;

impl Profile for LittleEndian32 {
    fn address_size(&self) -> usize {
        4
    }

    fn write_pointer(&self, value: u64, out: &mut Vec<u8>) -> Result<(), String> {
        check_fits(value, 4)?;
        let mut buf = [0u8; 4];
        LittleEndian::write_u32(&mut buf, value as u32);
        out.extend_from_slice(&buf);
        Ok(())
    }
}

/// 64-bit big-endian pointers.
pub struct BigEndian64;

impl Profile for BigEndian64 {
    fn address_size(&self) -> usize {
        8
    }

    fn write_pointer(&self, value: u64, out: &mut Vec<u8>) -> Result<(), String> {
        let mut buf = [0u8; 8];
        BigEndian::write_u64(&mut buf, value);
        out.extend_from_slice(&buf);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn le64_round_trips() {
        let mut buf = Vec::new();
        LittleEndian64.write_pointer(0x1122_3344_5566_7788, &mut buf).unwrap();
        assert_eq!(buf, vec![0x88, 0x77, 0x66, 0x55, 0x44, 0x33, 0x22, 0x11]);
    }

    #[test]
    fn le32_rejects_overflow() {
        let mut buf = Vec::new();
        assert!(LittleEndian32.write_pointer(0x1_0000_0000, &mut buf).is_err());
    }

    #[test]
    fn be64_round_trips() {
        let mut buf = Vec::new();
        BigEndian64.write_pointer(0x1122_3344_5566_7788, &mut buf).unwrap();
        assert_eq!(buf, vec![0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88]);
    }
}
