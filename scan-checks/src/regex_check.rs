//! A regular-expression constraint anchored at the candidate offset.

use regex::bytes::Regex;
use scan_core::{BufferView, ScanError};

use crate::check::{Check, CheckResult};

/// Tests a regex *anchored at the current offset*: this is not a search,
/// `check` only asks whether the pattern matches starting exactly there.
pub struct RegexCheck {
    re: Regex,
}

impl RegexCheck {
    /// Builds a check from a pattern. The pattern is always evaluated as if
    /// anchored at position zero of the slice it is given, so callers do not
    /// need to prefix it with `^`.
    pub fn new(pattern: &str) -> Result<Self, ScanError> {
        let re = Regex::new(pattern).map_err(|e| ScanError::Construction(e.to_string()))?;
        Ok(Self { re })
    }
}

impl Check for RegexCheck {
    fn check(&mut self, buf: &BufferView<'_>, abs_off: u64) -> CheckResult {
        let at = buf.buffer_offset(abs_off);
        match self.re.find(&buf.data()[at..]) {
            Some(m) if m.start() == 0 => CheckResult::Match {
                needle: Some(m.as_bytes().to_vec()),
            },
            _ => CheckResult::NoMatch,
        }
    }

    // No skip optimization: an anchored regex gives no cheap lower bound on
    // the distance to its next possible match, so this check relies on the
    // default skip of 1.
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_anchored_pattern() {
        let mut c = RegexCheck::new(r"[0-9]+").unwrap();
        let buf = BufferView::new(b"xx123yy", 0);
        assert_eq!(c.check(&buf, 2), CheckResult::Match { needle: Some(b"123".to_vec()) });
    }

    #[test]
    fn rejects_match_starting_later() {
        // The pattern does occur in the slice, but not at offset 0 of it.
        let mut c = RegexCheck::new(r"yy").unwrap();
        let buf = BufferView::new(b"xxyy", 0);
        assert_eq!(c.check(&buf, 0), CheckResult::NoMatch);
    }

    #[test]
    fn invalid_pattern_is_construction_error() {
        assert!(RegexCheck::new("(unterminated").is_err());
    }
}
