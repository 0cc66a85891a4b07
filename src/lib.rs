#[macro_use]
mod macros;
mod api;
mod engine;
mod session;


pub use api::{
    FormatOptions, Options, Segmentation, SegmentationDetails, SegmentationVerbose, build_template, expand_template,
    extract, minify, normalize_identifier, placeholder, placeholders, pretty_print, pretty_print_with, segment,
    segment_verbose_with, segment_with,
};
pub use engine::InputFeatures;
pub use session::Session;

use std::fmt;
use std::str::FromStr;

// --- Shared types -----------------------------------------------------------

/// Grammar used to recognize sub-expressions in a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dialect {
    /// A named call token followed by a balanced-bracket body, e.g. `ts("cpu", host="a")`.
    /// Brackets may nest arbitrarily.
    #[default]
    NestedCall,
    /// `identifier{...}` with a brace body that never nests, e.g. `up{job="api"}`.
    LabelMatcher,
}

impl Dialect {
    pub const ALL: [Dialect; 2] = [Dialect::NestedCall, Dialect::LabelMatcher];

    /// Canonical name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Dialect::NestedCall => "nested-call",
            Dialect::LabelMatcher => "label-matcher",
        }
    }

    /// Default call marker. The marker includes its own opening bracket.
    ///
    /// `None` for dialects that do not scan for calls.
    pub fn call_marker(self) -> Option<&'static str> {
        match self {
            Dialect::NestedCall => Some("ts("),
            Dialect::LabelMatcher => None,
        }
    }

    /// Bracket pairs the formatter indents on for this dialect.
    pub fn grouping_brackets(self) -> &'static [(char, char)] {
        match self {
            Dialect::NestedCall => &[('(', ')')],
            Dialect::LabelMatcher => &[('(', ')'), ('{', '}')],
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nested-call" | "nested" | "ts" => Ok(Dialect::NestedCall),
            "label-matcher" | "label" | "labels" => Ok(Dialect::LabelMatcher),
            other => Err(format!("unknown dialect '{other}' (expected nested-call or label-matcher)")),
        }
    }
}

/// Byte span in the original query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    /// Start byte index (inclusive).
    pub start: usize,
    /// End byte index (exclusive).
    pub end: usize,
}

impl Range {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// One top-level unit extracted from a query.
///
/// `index` is the 0-based position among the extraction order and never changes
/// after extraction; placeholder `${Q(index + 1)}` refers to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubExpression {
    pub index: usize,
    pub text: String,
    /// Where the text was found in the original query.
    pub range: Range,
}

/// Returns true when opt-in stderr diagnostics are enabled.
pub(crate) fn debug_enabled() -> bool {
    std::env::var_os("WF_BUDDY_DEBUG").is_some()
}
