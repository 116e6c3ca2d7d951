//! A closed, explicit factory for building `Check`s by specification.
//!
//! Replaces the name-keyed, process-wide mutable class registry the source
//! used for deferred construction: `CheckSpec` is a closed enum and
//! `build_check` is a plain `match`, built fresh on every call.

use scan_core::ScanError;

use crate::check::Check;
use crate::multi_string_check::MultiStringCheck;
use crate::regex_check::RegexCheck;
use crate::signature_check::SignatureCheck;
use crate::string_check::StringCheck;

/// Declarative description of a `Check`, suitable for deferred construction
/// (e.g. from a loaded configuration file).
pub enum CheckSpec {
    String(Vec<u8>),
    Regex(String),
    MultiString(Vec<Vec<u8>>),
    Signature(Vec<Vec<u8>>),
}

/// Builds a boxed `Check` from its specification.
pub fn build_check(spec: CheckSpec) -> Result<Box<dyn Check>, ScanError> {
    match spec {
        CheckSpec::String(needle) => Ok(Box::new(StringCheck::new(needle))),
        CheckSpec::Regex(pattern) => Ok(Box::new(RegexCheck::new(&pattern)?)),
        CheckSpec::MultiString(needles) => Ok(Box::new(MultiStringCheck::new(needles)?)),
        CheckSpec::Signature(parts) => Ok(Box::new(SignatureCheck::new(parts)?)),
    }
}
