//! # scan-checks
//!
//! The constraint library the scanner evaluates: fixed byte strings,
//! regular expressions, Aho-Corasick multi-string sets, and ordered
//! multi-part signatures, all behind the single `Check` trait.

pub mod check;
pub mod multi_string_check;
pub mod regex_check;
pub mod registry;
pub mod signature_check;
pub mod string_check;

pub use check::{Check, CheckResult};
pub use multi_string_check::MultiStringCheck;
pub use regex_check::RegexCheck;
pub use registry::{build_check, CheckSpec};
pub use signature_check::SignatureCheck;
pub use string_check::StringCheck;
