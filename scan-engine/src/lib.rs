//! Scanning primitives built on `scan-core` and `scan-checks`: single- and
//! multi-scanner drivers that window an `AddressSpace` into chunks and feed
//! each candidate offset through a set of `Check`s.

mod chunker;

pub mod constants;
pub mod discontig_scanner_group;
pub mod multi_string_scanner;
pub mod pointer_scanner;
pub mod scanner;
pub mod scanner_group;

pub use constants::{DEFAULT_OVERLAP, SCAN_BLOCKSIZE};
pub use discontig_scanner_group::DiscontigScannerGroup;
pub use multi_string_scanner::MultiStringScanner;
pub use pointer_scanner::PointerScanner;
pub use scanner::{ScanIter, Scanner};
pub use scanner_group::{GroupScanIter, ScannerGroup};
