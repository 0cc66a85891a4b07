//! Trigger scanning (input pre-classification).
//!
//! A single pass over the raw input produces coarse boolean features that let
//! the extractors, the expander and the normalizer bail out early.
//!
//! ## Design notes
//!
//! - This is a *heuristic* scan. False positives are acceptable because the
//!   downstream code still has to match the full grammar. False negatives are
//!   not: a clear bit must mean the construct is definitely absent.
//! - The call-marker bit depends on the marker in use, so it is computed from
//!   the marker passed in rather than a fixed string.

bitflags::bitflags! {
    /// Coarse features of a query string.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct InputFeatures: u8 {
        const HAS_CALL_MARKER = 1 << 0;
        const HAS_BRACES      = 1 << 1;
        const HAS_QUOTES      = 1 << 2;
        const HAS_PLACEHOLDER = 1 << 3;
        const HAS_WHITESPACE  = 1 << 4;
    }
}

impl InputFeatures {
    /// Scan `input` for coarse features. `call_marker` is the nested-call
    /// marker to look for, if any.
    pub fn scan(input: &str, call_marker: Option<&str>) -> Self {
        let mut features = InputFeatures::empty();

        // `char::is_whitespace` agrees with the `\s` class the minifier uses.
        for c in input.chars() {
            match c {
                '{' => features |= InputFeatures::HAS_BRACES,
                '"' => features |= InputFeatures::HAS_QUOTES,
                c if c.is_whitespace() => features |= InputFeatures::HAS_WHITESPACE,
                _ => {}
            }
        }

        if call_marker.is_some_and(|m| !m.is_empty() && input.contains(m)) {
            features |= InputFeatures::HAS_CALL_MARKER;
        }

        if input.contains("${Q") {
            features |= InputFeatures::HAS_PLACEHOLDER;
        }

        if crate::debug_enabled() {
            eprintln!("[trigger_scan] len={} features={:?}", input.len(), features);
        }

        features
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_marker_and_quotes() {
        let f = InputFeatures::scan(r#"ts("cpu") + 1"#, Some("ts("));
        assert!(f.contains(InputFeatures::HAS_CALL_MARKER | InputFeatures::HAS_QUOTES | InputFeatures::HAS_WHITESPACE));
        assert!(!f.contains(InputFeatures::HAS_BRACES));
        assert!(!f.contains(InputFeatures::HAS_PLACEHOLDER));
    }

    #[test]
    fn marker_bit_follows_the_marker_in_use() {
        let input = r#"rate(up{job="x"})"#;
        assert!(!InputFeatures::scan(input, Some("ts(")).contains(InputFeatures::HAS_CALL_MARKER));
        assert!(InputFeatures::scan(input, Some("rate(")).contains(InputFeatures::HAS_CALL_MARKER));
        assert!(!InputFeatures::scan(input, None).contains(InputFeatures::HAS_CALL_MARKER));
        assert!(InputFeatures::scan(input, None).contains(InputFeatures::HAS_BRACES));
    }

    #[test]
    fn detects_placeholders() {
        assert!(InputFeatures::scan("${Q1} / ${Q2}", None).contains(InputFeatures::HAS_PLACEHOLDER));
        assert!(!InputFeatures::scan("$Q1", None).contains(InputFeatures::HAS_PLACEHOLDER));
    }

    #[test]
    fn detects_non_ascii_and_vertical_whitespace() {
        assert!(InputFeatures::scan("a\u{2003}b", None).contains(InputFeatures::HAS_WHITESPACE));
        assert!(InputFeatures::scan("a\x0Bb", None).contains(InputFeatures::HAS_WHITESPACE));
        assert!(!InputFeatures::scan("a_b", None).contains(InputFeatures::HAS_WHITESPACE));
    }

    #[test]
    fn empty_input_has_no_features() {
        assert_eq!(InputFeatures::scan("", Some("ts(")), InputFeatures::empty());
    }
}
