//! Bracket-depth pretty-printer and whitespace minifier.
//!
//! ```text
//! ts("a", rate(x))
//!
//! ts(
//!   "a", rate(
//!     x
//!   )
//! )
//! ```
//!
//! `minify` is only an inverse up to whitespace: `minify(pretty_print(x))`
//! differs from `minify(x)` by the spaces introduced around brackets, and
//! runs of spaces in `x` are collapsed either way.

/// Re-indent `text` on every open/close bracket in `brackets`.
///
/// Quoted strings get no special treatment. A closing bracket at depth zero
/// is emitted with no indent rather than underflowing.
pub(crate) fn pretty_print(text: &str, indent: &str, brackets: &[(char, char)]) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    let mut depth = 0usize;

    for c in text.chars() {
        if brackets.iter().any(|&(open, _)| open == c) {
            depth += 1;
            out.push(c);
            out.push('\n');
            out.push_str(&indent.repeat(depth));
        } else if brackets.iter().any(|&(_, close)| close == c) {
            depth = depth.saturating_sub(1);
            out.push('\n');
            out.push_str(&indent.repeat(depth));
            out.push(c);
        } else {
            out.push(c);
        }
    }

    out
}

/// Collapse every maximal run of whitespace (line breaks included) to one space.
pub(crate) fn minify(text: &str) -> String {
    regex!(r"\s+").replace_all(text, " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARENS: &[(char, char)] = &[('(', ')')];

    #[test]
    fn indents_nested_calls() {
        let got = pretty_print("ts(a, rate(x))", "  ", PARENS);
        assert_eq!(got, "ts(\n  a, rate(\n    x\n  )\n)");
    }

    #[test]
    fn auxiliary_brackets() {
        let got = pretty_print("up{a}", "\t", &[('(', ')'), ('{', '}')]);
        assert_eq!(got, "up{\n\ta\n}");
        assert_eq!(pretty_print("up{a}", "\t", PARENS), "up{a}");
    }

    #[test]
    fn extra_closing_brackets_clamp_at_zero() {
        assert_eq!(pretty_print("a))", "  ", PARENS), "a\n)\n)");
        assert_eq!(pretty_print(")(", "  ", PARENS), "\n)(\n  ");
    }

    #[test]
    fn text_without_brackets_is_copied() {
        assert_eq!(pretty_print("a + b", "  ", PARENS), "a + b");
        assert_eq!(pretty_print("", "  ", PARENS), "");
    }

    #[test]
    fn minify_collapses_runs() {
        assert_eq!(minify("ts(\n  a,\t\t b\n)"), "ts( a, b )");
        assert_eq!(minify("  x  "), " x ");
        assert_eq!(minify("none"), "none");
    }
}
