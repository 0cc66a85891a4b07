//! Caller-owned editing session.
//!
//! Holds the state an operator works with between submissions: the raw query,
//! the extracted sub-expression texts (which may be hand-edited), the template
//! and whether the template is displayed with placeholders or values.
//!
//! Every submission replaces all of it; nothing is updated incrementally.
//! Edits to a sub-expression never touch the template; they only show up
//! through [`Session::display`] when values are shown.

use crate::Dialect;
use crate::api::{Options, expand_template, segment_with};

#[derive(Debug, Clone, Default)]
pub struct Session {
    dialect: Dialect,
    options: Options,
    input: String,
    subexpressions: Vec<String>,
    template: String,
    show_values: bool,
}

impl Session {
    pub fn new(dialect: Dialect) -> Self {
        Session { dialect, ..Session::default() }
    }

    pub fn with_options(dialect: Dialect, options: Options) -> Self {
        Session { dialect, options, ..Session::default() }
    }

    /// Extract from `input` and rebuild the template, discarding previous
    /// sub-expressions and edits. Returns the number of sub-expressions.
    pub fn submit(&mut self, input: &str) -> usize {
        let res = segment_with(input, self.dialect, &self.options);
        self.input = input.to_string();
        self.subexpressions = res.subexpressions.into_iter().map(|s| s.text).collect();
        self.template = res.template;
        self.subexpressions.len()
    }

    /// Replace the text of sub-expression `index` (0-based).
    pub fn edit(&mut self, index: usize, text: impl Into<String>) -> bool {
        match self.subexpressions.get_mut(index) {
            Some(slot) => {
                *slot = text.into();
                true
            }
            None => false,
        }
    }

    /// Normalize the metric identifier of sub-expression `index` in place.
    pub fn normalize_at(&mut self, index: usize) -> bool {
        let marker = self.options.marker(self.dialect).unwrap_or("ts(");
        match self.subexpressions.get_mut(index) {
            Some(slot) => {
                *slot = crate::engine::normalize_identifier(slot, marker);
                true
            }
            None => false,
        }
    }

    /// Flip between showing placeholders and showing values. Returns the new state.
    pub fn toggle_values(&mut self) -> bool {
        self.show_values = !self.show_values;
        self.show_values
    }

    /// The template as currently displayed.
    pub fn display(&self) -> String {
        if self.show_values { expand_template(&self.template, &self.subexpressions) } else { self.template.clone() }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn subexpressions(&self) -> &[String] {
        &self.subexpressions
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn shows_values(&self) -> bool {
        self.show_values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUERY: &str = r#"ts("cpu.load-1", host="a") + ts("mem-free")"#;

    #[test]
    fn submit_populates_state() {
        let mut s = Session::new(Dialect::NestedCall);
        assert_eq!(s.submit(QUERY), 2);
        assert_eq!(s.input(), QUERY);
        assert_eq!(s.template(), "${Q1} + ${Q2}");
        assert_eq!(s.display(), "${Q1} + ${Q2}");
    }

    #[test]
    fn edits_show_up_only_when_values_are_shown() {
        let mut s = Session::new(Dialect::NestedCall);
        s.submit(QUERY);
        assert!(s.edit(1, r#"ts("mem.used")"#));
        assert!(s.normalize_at(0));
        assert!(s.normalize_at(1));

        assert_eq!(s.template(), "${Q1} + ${Q2}");
        assert!(s.toggle_values());
        assert_eq!(s.display(), r#"ts("cpu_load_1", host="a") + ts("mem_used")"#);
        assert!(!s.toggle_values());
        assert_eq!(s.display(), "${Q1} + ${Q2}");
    }

    #[test]
    fn out_of_range_index_changes_nothing() {
        let mut s = Session::new(Dialect::NestedCall);
        s.submit(QUERY);
        let before = s.subexpressions().to_vec();
        assert!(!s.edit(2, "x"));
        assert!(!s.normalize_at(5));
        assert_eq!(s.subexpressions(), before.as_slice());
    }

    #[test]
    fn label_matcher_session_ignores_call_marker_override() {
        let opts = Options { call_marker: Some("rate(".to_string()), normalize: true };
        let mut s = Session::with_options(Dialect::LabelMatcher, opts);
        assert_eq!(s.submit(r#"up{job="a"}"#), 1);

        assert!(s.edit(0, r#"rate("c.d") ts("e.f")"#));
        assert!(s.normalize_at(0));
        assert_eq!(s.subexpressions()[0], r#"rate("c.d") ts("e_f")"#);
    }

    #[test]
    fn resubmit_replaces_everything() {
        let mut s = Session::new(Dialect::LabelMatcher);
        s.submit(r#"up{job="a"} + down{job="b"}"#);
        s.edit(0, "changed{}");
        assert_eq!(s.submit(r#"rate(x{y="z"}[1m])"#), 1);
        assert_eq!(s.subexpressions(), [r#"x{y="z"}"#.to_string()].as_slice());
        assert_eq!(s.template(), "rate(${Q1}[1m])");
    }
}
