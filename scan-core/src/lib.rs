//! # scan-core
//!
//! Foundation layer for the memory scanning engine: the `BufferView` that
//! windows a chunk of scanned bytes, the `AddressSpace` boundary memory is
//! read through, the `Profile` boundary pointer encoding is read through, and
//! the shared `Match`/`ScanError` vocabulary every other crate in this
//! workspace builds on.
//!
//! ### Key submodules:
//! - `buffer`: `BufferView`, the absolute-offset-tagged byte window.
//! - `address_space`: `AddressSpace`, `AddressRange`, and an in-memory test double.
//! - `profile`: `Profile`, pointer width/byte-order encoding for the pointer scanner.
//! - `match_`: the `Match` record yielded by every scanner.
//! - `error`: `ScanError`, the unified construction/read error type.

pub mod address_space;
pub mod buffer;
pub mod error;
pub mod match_;
pub mod profile;

pub use address_space::{AddressRange, AddressSpace, MemoryAddressSpace};
pub use buffer::BufferView;
pub use error::ScanError;
pub use match_::Match;
pub use profile::{BigEndian64, LittleEndian32, LittleEndian64, Profile};

pub mod prelude {
    pub use crate::address_space::*;
    pub use crate::buffer::*;
    pub use crate::error::*;
    pub use crate::match_::*;
    pub use crate::profile::*;
}
