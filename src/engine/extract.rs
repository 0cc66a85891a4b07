//! Dialect extractors.
//!
//! Both extractors return sub-expressions in order of appearance; that order
//! fixes placeholder numbering downstream.

use super::scanner::BracketScanner;
use crate::{Range, SubExpression};

/// Extract top-level calls introduced by `marker` (e.g. `ts(`).
///
/// Malformed markers and unbalanced input degrade to fewer (or zero) results.
pub(crate) fn extract_nested_calls(input: &str, marker: &str) -> Vec<SubExpression> {
    let Some(scanner) = BracketScanner::new(marker) else {
        if crate::debug_enabled() {
            eprintln!("[extract] marker {marker:?} does not end in an opening bracket");
        }
        return Vec::new();
    };

    scanner.scan(input).into_iter().enumerate().map(|(index, range)| sub_expression(input, index, range)).collect()
}

/// Extract every `identifier{...}` label matcher.
///
/// The identifier is letters, digits, `_` and `:`, not starting with a digit.
/// A match glued to a preceding identifier character (`9lives{..}`) is the
/// tail of an invalid identifier and is dropped. Brace bodies never nest, so
/// one regex pass is enough.
pub(crate) fn extract_label_matchers(input: &str) -> Vec<SubExpression> {
    let re = regex!(r"[A-Za-z_:][A-Za-z0-9_:]*\{[^{}]*\}");

    re.find_iter(input)
        .filter(|m| !input[..m.start()].chars().next_back().is_some_and(is_identifier_char))
        .enumerate()
        .map(|(index, m)| sub_expression(input, index, Range { start: m.start(), end: m.end() }))
        .collect()
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == ':'
}

fn sub_expression(input: &str, index: usize, range: Range) -> SubExpression {
    SubExpression { index, text: input[range.start..range.end].to_string(), range }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(subs: &[SubExpression]) -> Vec<&str> {
        subs.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn nested_calls_in_order() {
        let subs = extract_nested_calls(r#"ts("cpu.load-1", host="a") + ts("mem-free")"#, "ts(");
        assert_eq!(texts(&subs), vec![r#"ts("cpu.load-1", host="a")"#, r#"ts("mem-free")"#]);
        assert_eq!(subs[0].index, 0);
        assert_eq!(subs[1].index, 1);
        assert_eq!(subs[1].range, Range { start: 29, end: 43 });
    }

    #[test]
    fn nested_calls_with_bad_marker_are_empty() {
        assert!(extract_nested_calls(r#"ts("a")"#, "ts").is_empty());
    }

    #[test]
    fn label_matchers_skip_wrappers() {
        let subs = extract_label_matchers(r#"up{job="api"} and rate(http_requests_total{code="500"}[5m])"#);
        assert_eq!(texts(&subs), vec![r#"up{job="api"}"#, r#"http_requests_total{code="500"}"#]);
    }

    #[test]
    fn label_matchers_allow_colons_and_empty_bodies() {
        let subs = extract_label_matchers("job:errors:rate5m{} / node_up{}");
        assert_eq!(texts(&subs), vec!["job:errors:rate5m{}", "node_up{}"]);
    }

    #[test]
    fn label_matcher_identifier_does_not_start_with_digit() {
        assert!(extract_label_matchers("9lives{a=\"b\"}").is_empty());

        let subs = extract_label_matchers("x + 9lives{a} + up{b}");
        assert_eq!(texts(&subs), vec!["up{b}"]);
        assert_eq!(subs[0].index, 0);
    }

    #[test]
    fn back_to_back_label_matchers() {
        let subs = extract_label_matchers("a{}b{x}");
        assert_eq!(texts(&subs), vec!["a{}", "b{x}"]);
        assert!(subs.iter().all(|s| !s.range.is_empty() && s.range.len() == s.text.len()));
    }

    #[test]
    fn label_matchers_reject_nested_braces() {
        assert_eq!(texts(&extract_label_matchers("outer{inner{x}")), vec!["inner{x}"]);
        assert!(extract_label_matchers("{job=\"x\"}").is_empty());
    }
}
