//! Aho-Corasick multi-string constraint.
//!
//! Precomputes every hit in a buffer the first time it is seen, caches the
//! hits sorted **descending** by relative offset, and pops from the tail as
//! the scanner's cursor advances monotonically through the buffer. This
//! gives amortized O(1) `check`/`skip` per offset instead of re-running the
//! automaton at every candidate.

use aho_corasick::AhoCorasick;
use scan_core::{BufferView, ScanError};

use crate::check::{Check, CheckResult};

struct Hit {
    rel_off: usize,
    needle: Vec<u8>,
}

pub struct MultiStringCheck {
    needles: Vec<Vec<u8>>,
    matcher: AhoCorasick,
    last_base_offset: Option<u64>,
    /// Sorted descending by `rel_off`; the next expected hit is always at the tail.
    sorted_hits_desc: Vec<Hit>,
}

impl MultiStringCheck {
    pub fn new<I, N>(needles: I) -> Result<Self, ScanError>
    where
        I: IntoIterator<Item = N>,
        N: Into<Vec<u8>>,
    {
        let needles: Vec<Vec<u8>> = needles.into_iter().map(Into::into).collect();
        if needles.is_empty() {
            return Err(ScanError::Construction(
                "MultiStringCheck requires a non-empty needle list".into(),
            ));
        }
        let matcher = AhoCorasick::new(&needles)
            .map_err(|e| ScanError::Construction(e.to_string()))?;
        Ok(Self {
            needles,
            matcher,
            last_base_offset: None,
            sorted_hits_desc: Vec::new(),
        })
    }

    fn ensure_buffer_scanned(&mut self, buf: &BufferView<'_>) {
        if self.last_base_offset == Some(buf.base_offset()) {
            return;
        }
        let mut hits: Vec<Hit> = self
            .matcher
            .find_iter(buf.data())
            .map(|m| Hit {
                rel_off: m.start(),
                needle: self.needles[m.pattern().as_usize()].clone(),
            })
            .collect();
        hits.sort_unstable_by(|a, b| b.rel_off.cmp(&a.rel_off));
        self.sorted_hits_desc = hits;
        self.last_base_offset = Some(buf.base_offset());
    }

    /// Drops hits strictly before `at`, leaving the tail as the next candidate.
    fn drop_stale(&mut self, at: usize) {
        while matches!(self.sorted_hits_desc.last(), Some(h) if h.rel_off < at) {
            self.sorted_hits_desc.pop();
        }
    }
}

impl Check for MultiStringCheck {
    fn check(&mut self, buf: &BufferView<'_>, abs_off: u64) -> CheckResult {
        self.ensure_buffer_scanned(buf);
        let at = buf.buffer_offset(abs_off);
        self.drop_stale(at);
        match self.sorted_hits_desc.last() {
            Some(h) if h.rel_off == at => {
                let needle = self.sorted_hits_desc.pop().unwrap().needle;
                CheckResult::Match { needle: Some(needle) }
            }
            _ => CheckResult::NoMatch,
        }
    }

    fn skip(&mut self, buf: &BufferView<'_>, abs_off: u64) -> u64 {
        self.ensure_buffer_scanned(buf);
        let at = buf.buffer_offset(abs_off);
        self.drop_stale(at);
        match self.sorted_hits_desc.last() {
            Some(h) => (h.rel_off - at) as u64,
            None => buf.end() - abs_off,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_needle_list() {
        let needles: Vec<Vec<u8>> = Vec::new();
        assert!(MultiStringCheck::new(needles).is_err());
    }

    #[test]
    fn hit_stack_stays_descending() {
        let mut c = MultiStringCheck::new(vec![b"foo".to_vec(), b"bar".to_vec()]).unwrap();
        let data = b"...bar...foo...";
        let buf = BufferView::new(data, 0);
        c.ensure_buffer_scanned(&buf);
        let offs: Vec<usize> = c.sorted_hits_desc.iter().map(|h| h.rel_off).collect();
        let mut sorted = offs.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(offs, sorted);
    }

    #[test]
    fn emits_hits_in_offset_order() {
        let mut c = MultiStringCheck::new(vec![b"foo".to_vec(), b"bar".to_vec()]).unwrap();
        let data = b"...bar...foo...";
        let buf = BufferView::new(data, 0);
        let mut found = Vec::new();
        let mut s = 0u64;
        while s < buf.end() {
            if let CheckResult::Match { needle } = c.check(&buf, s) {
                found.push((s, needle.unwrap()));
            }
            s += 1;
        }
        assert_eq!(found, vec![(3, b"bar".to_vec()), (9, b"foo".to_vec())]);
    }

    #[test]
    fn no_match_when_nothing_at_offset() {
        let mut c = MultiStringCheck::new(vec![b"zzz".to_vec()]).unwrap();
        let buf = BufferView::new(b"abc", 0);
        assert_eq!(c.check(&buf, 0), CheckResult::NoMatch);
    }

    proptest::proptest! {
        #[test]
        fn hits_found_offset_by_offset_are_strictly_ascending(
            data in proptest::collection::vec(0u8..4, 1..300),
        ) {
            let mut c = MultiStringCheck::new(vec![vec![0u8, 1], vec![2u8, 3]]).unwrap();
            let buf = BufferView::new(&data, 0);
            let mut found = Vec::new();
            let mut s = 0u64;
            while s < buf.end() {
                if let CheckResult::Match { .. } = c.check(&buf, s) {
                    found.push(s);
                }
                s += 1;
            }
            for w in found.windows(2) {
                proptest::prop_assert!(w[0] < w[1]);
            }
        }
    }
}
