//! Ordered multi-part signature constraint.
//!
//! Parts must be found in order at non-decreasing offsets. Once every part
//! has matched the check is exhausted for the rest of the scan; it is
//! single-shot by construction, with no reset method, so reuse across scans
//! requires building a fresh instance.

use scan_core::{BufferView, ScanError};

use crate::check::{Check, CheckResult};

pub struct SignatureCheck {
    needles: Vec<Vec<u8>>,
    current: usize,
}

impl SignatureCheck {
    pub fn new<I, N>(needles: I) -> Result<Self, ScanError>
    where
        I: IntoIterator<Item = N>,
        N: Into<Vec<u8>>,
    {
        let needles: Vec<Vec<u8>> = needles.into_iter().map(Into::into).collect();
        if needles.is_empty() {
            return Err(ScanError::Construction(
                "SignatureCheck requires a non-empty part list".into(),
            ));
        }
        Ok(Self { needles, current: 0 })
    }

    fn exhausted(&self) -> bool {
        self.current >= self.needles.len()
    }
}

impl Check for SignatureCheck {
    fn check(&mut self, buf: &BufferView<'_>, abs_off: u64) -> CheckResult {
        if self.exhausted() {
            return CheckResult::NoMatch;
        }
        let at = buf.buffer_offset(abs_off);
        let needle = &self.needles[self.current];
        if buf.starts_with(needle, at) {
            let needle = needle.clone();
            self.current += 1;
            CheckResult::Match { needle: Some(needle) }
        } else {
            CheckResult::NoMatch
        }
    }

    /// Searches forward for the current part, starting past the tail of the
    /// previous part so a self-overlapping signature ("AA", "AA") cannot
    /// report the same bytes as both part `i-1` and part `i`.
    fn skip(&mut self, buf: &BufferView<'_>, abs_off: u64) -> u64 {
        if self.exhausted() {
            return buf.end() - abs_off;
        }
        let at = buf.buffer_offset(abs_off);
        let correction = if self.current > 0 {
            self.needles[self.current - 1].len()
        } else {
            0
        };
        let from = at + correction;
        match buf.find(&self.needles[self.current], from) {
            Some(next) => (next - at) as u64,
            None => buf.end() - abs_off,
        }
    }
}
