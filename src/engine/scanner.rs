//! Bracket scanner for nested-call queries.
//!
//! Walks the input once, left to right, and yields the byte range of every
//! top-level call. A call starts at an occurrence of the *call marker* (for
//! example `ts(`, which includes its own opening bracket) and ends at the
//! bracket that closes it.
//!
//! ```text
//! input:  ts("a", rate(ts("b"))) + ts("c")
//! ranges: [0, 22)                    [25, 32)
//! ```
//!
//! ## Rules
//!
//! - The marker starts a new range only when no range is open. Inside a range,
//!   the marker (and a bare opening bracket) just adds one level.
//! - A closing bracket inside a range removes one level; reaching zero closes
//!   the range (the closing bracket is included).
//! - Brackets outside any range are ignored.
//! - An unterminated range at end of input is dropped, not reported as an
//!   error.

use crate::Range;

/// Depth-tracking scanner configured with one call marker.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BracketScanner<'m> {
    marker: &'m str,
    open: u8,
    close: u8,
}

impl<'m> BracketScanner<'m> {
    /// Create a scanner for `marker`. The marker must end in an ASCII opening
    /// bracket (`(`, `[` or `{`); otherwise there is nothing to balance and
    /// `None` is returned.
    pub(crate) fn new(marker: &'m str) -> Option<Self> {
        let open = *marker.as_bytes().last()?;
        let close = closing_for(open)?;
        Some(BracketScanner { marker, open, close })
    }

    /// Return the ordered, non-overlapping ranges of all top-level calls.
    pub(crate) fn scan(&self, input: &str) -> Vec<Range> {
        let bytes = input.as_bytes();
        let marker = self.marker.as_bytes();

        let mut ranges = Vec::new();
        let mut depth = 0usize;
        let mut start: Option<usize> = None;
        let mut i = 0;

        while i < bytes.len() {
            if bytes[i..].starts_with(marker) {
                if start.is_none() {
                    start = Some(i);
                }
                depth += 1;
                // The marker already carries its opening bracket.
                i += marker.len();
                continue;
            }

            if let Some(s) = start {
                let b = bytes[i];
                if b == self.open {
                    depth += 1;
                } else if b == self.close {
                    depth -= 1;
                    if depth == 0 {
                        ranges.push(Range { start: s, end: i + 1 });
                        start = None;
                    }
                }
            }

            i += 1;
        }

        if crate::debug_enabled() {
            eprintln!("[scanner] marker={:?} ranges={}", self.marker, ranges.len());
            if let Some(s) = start {
                eprintln!("[scanner] dropped unterminated call at {s} (depth {depth})");
            }
        }

        ranges
    }
}

fn closing_for(open: u8) -> Option<u8> {
    match open {
        b'(' => Some(b')'),
        b'[' => Some(b']'),
        b'{' => Some(b'}'),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(marker: &str, input: &str) -> Vec<(usize, usize)> {
        BracketScanner::new(marker).unwrap().scan(input).into_iter().map(|r| (r.start, r.end)).collect()
    }

    #[test]
    fn scans_top_level_calls() {
        let input = r#"ts("a") + ts("b")"#;
        assert_eq!(spans("ts(", input), vec![(0, 7), (10, 17)]);
    }

    #[test]
    fn nested_markers_and_brackets_stay_inside_one_range() {
        let input = r#"ts("a", rate(ts("b"))) + ts("c")"#;
        let got = spans("ts(", input);
        assert_eq!(got, vec![(0, 22), (25, 32)]);
        assert_eq!(&input[got[0].0..got[0].1], r#"ts("a", rate(ts("b")))"#);
    }

    #[test]
    fn brackets_outside_calls_are_ignored() {
        let input = r#"(( ts("a") )) ) ("#;
        assert_eq!(spans("ts(", input), vec![(3, 10)]);
    }

    #[test]
    fn unterminated_call_yields_nothing() {
        assert!(spans("ts(", r#"ts("x""#).is_empty());
        assert_eq!(spans("ts(", r#"ts("a") + ts("b""#), vec![(0, 7)]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(spans("ts(", "").is_empty());
    }

    #[test]
    fn back_to_back_calls() {
        assert_eq!(spans("ts(", "ts(a)ts(b)"), vec![(0, 5), (5, 10)]);
    }

    #[test]
    fn custom_square_marker() {
        assert_eq!(spans("q[", "x + q[a[1]] - q[b]"), vec![(4, 11), (14, 18)]);
    }

    #[test]
    fn marker_without_opening_bracket_is_rejected() {
        assert!(BracketScanner::new("ts").is_none());
        assert!(BracketScanner::new("").is_none());
    }

    #[test]
    fn non_ascii_text_is_sliced_on_char_boundaries() {
        let input = "é ts(\"ü\") ö";
        let ranges = BracketScanner::new("ts(").unwrap().scan(input);
        assert_eq!(ranges.len(), 1);
        assert_eq!(&input[ranges[0].start..ranges[0].end], "ts(\"ü\")");
    }
}
