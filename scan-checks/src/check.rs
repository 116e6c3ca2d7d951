//! The `Check` contract: a single constraint a `Scanner` evaluates at a
//! candidate offset, plus the optional skip protocol that lets fast checks
//! advance the cursor past provably-empty regions.

use scan_core::BufferView;

/// Outcome of evaluating a `Check` at a single offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckResult {
    NoMatch,
    Match { needle: Option<Vec<u8>> },
}

impl CheckResult {
    pub fn is_match(&self) -> bool {
        matches!(self, CheckResult::Match { .. })
    }
}

/// An atomic scanning constraint.
///
/// Implementors must be callable at every offset the scanner selects within
/// the current buffer; `skip` is purely an optimization hint and must never
/// cause a genuine match to be missed (see each implementation's doc comment
/// for its specific soundness argument).
pub trait Check {
    /// Tests whether this check matches at absolute offset `abs_off`.
    fn check(&mut self, buf: &BufferView<'_>, abs_off: u64) -> CheckResult;

    /// A lower bound on how far the scanner may advance the cursor from
    /// `abs_off` while still guaranteeing no hit of *this* check is missed.
    ///
    /// The default of `1` is always sound (it promises nothing) but gives up
    /// the sub-linear scanning that a tighter bound enables.
    fn skip(&mut self, _buf: &BufferView<'_>, _abs_off: u64) -> u64 {
        1
    }
}
