//! A single fixed-byte-string constraint.

use scan_core::BufferView;

use crate::check::{Check, CheckResult};

/// Matches a single literal needle at the exact candidate offset.
pub struct StringCheck {
    needle: Vec<u8>,
}

impl StringCheck {
    pub fn new(needle: impl Into<Vec<u8>>) -> Self {
        Self {
            needle: needle.into(),
        }
    }
}

impl Check for StringCheck {
    fn check(&mut self, buf: &BufferView<'_>, abs_off: u64) -> CheckResult {
        let at = buf.buffer_offset(abs_off);
        if buf.starts_with(&self.needle, at) {
            CheckResult::Match {
                needle: Some(self.needle.clone()),
            }
        } else {
            CheckResult::NoMatch
        }
    }

    /// Searches `buf.data[at+1..]` for the next occurrence of the needle.
    ///
    /// The `+1` is load-bearing: searching from `at` itself would find the
    /// needle we just failed (or just matched) to start with and return a
    /// skip of zero, livelocking the scanner's cursor.
    fn skip(&mut self, buf: &BufferView<'_>, abs_off: u64) -> u64 {
        let at = buf.buffer_offset(abs_off);
        match buf.find(&self.needle, at + 1) {
            Some(next) => (next - at) as u64,
            None => buf.end() - abs_off,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_at_exact_offset() {
        let buf = BufferView::new(b"xxABCDxx", 0);
        let mut c = StringCheck::new(b"ABCD".to_vec());
        assert_eq!(c.check(&buf, 2), CheckResult::Match { needle: Some(b"ABCD".to_vec()) });
        assert_eq!(c.check(&buf, 1), CheckResult::NoMatch);
    }

    #[test]
    fn skip_advances_to_next_occurrence() {
        let buf = BufferView::new(b"AAxxAA", 0);
        let mut c = StringCheck::new(b"AA".to_vec());
        assert_eq!(c.skip(&buf, 0), 4);
    }

    #[test]
    fn skip_reaches_end_when_absent() {
        let buf = BufferView::new(b"AAxxxx", 0);
        let mut c = StringCheck::new(b"AA".to_vec());
        assert_eq!(c.skip(&buf, 0), buf.end());
    }

    #[test]
    fn skip_never_zero() {
        let buf = BufferView::new(b"AAAA", 0);
        let mut c = StringCheck::new(b"AA".to_vec());
        // The needle repeats immediately, but the +1 guard still forces
        // progress past the current candidate.
        assert!(c.skip(&buf, 0) >= 1);
    }

    proptest::proptest! {
        #[test]
        fn skip_is_always_sound(data in proptest::collection::vec(0u8..4, 1..200), needle_byte in 0u8..4) {
            let needle = vec![needle_byte; 2];
            let buf = BufferView::new(&data, 0);
            let mut c = StringCheck::new(needle.clone());
            let mut s = 0u64;
            while s < buf.end() {
                let skipped_by = c.skip(&buf, s);
                proptest::prop_assert!(skipped_by >= 1);
                for mid in s + 1..s + skipped_by {
                    let at = buf.buffer_offset(mid);
                    proptest::prop_assert!(!buf.starts_with(&needle, at));
                }
                s += skipped_by;
            }
        }
    }
}
