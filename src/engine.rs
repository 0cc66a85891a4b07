//! Query segmentation engine.
//!
//! Everything in here is a pure function over strings: no I/O, no shared
//! state, nothing retained between calls. The public surface in `api.rs` is a
//! thin layer over these pieces.
//!
//! ## How the parts work together
//!
//! ```text
//! input ── InputFeatures::scan ──┐                     (trigger.rs)
//!                                │  skip dialects that cannot match
//!                                v
//!            ┌── nested-call ── BracketScanner::scan   (scanner.rs)
//! extract ───┤                                         (extract.rs)
//!            └── label-matcher ─ regex find_iter
//!                                │
//!                                v
//!                      Vec<SubExpression> (ordered)
//!                                │
//!                                v
//!                    template::build ──▶ "${Q1} + ${Q2}"   (template.rs)
//!                    template::expand ◀─ current values
//! ```
//!
//! Independently of extraction, callers may run `normalize.rs` on a single
//! sub-expression or `format.rs` on any bracketed text.
//!
//! ## Responsibilities by module
//!
//! - `trigger.rs`: one cheap pass computing `InputFeatures`.
//! - `scanner.rs`: depth-tracking scan yielding top-level call ranges.
//! - `extract.rs`: per-dialect extraction, ordered by position.
//! - `template.rs`: placeholder substitution and its inverse.
//! - `normalize.rs`: rewrites `.` and `-` inside the first quoted metric name.
//! - `format.rs`: pretty-printer and whitespace minifier.
//! - `metrics.rs`: timing data for verbose runs.
//!
//! ## Debugging
//!
//! Set `WF_BUDDY_DEBUG=1` to print scan and template traces to stderr.

#[path = "engine/extract.rs"]
mod extract;
#[path = "engine/format.rs"]
mod format;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/normalize.rs"]
mod normalize;
#[path = "engine/scanner.rs"]
mod scanner;
#[path = "engine/template.rs"]
mod template;
#[path = "engine/trigger.rs"]
mod trigger;

pub(crate) use extract::{extract_label_matchers, extract_nested_calls};
pub(crate) use format::{minify, pretty_print};
pub(crate) use metrics::RunMetrics;
pub(crate) use normalize::normalize_identifier;
pub(crate) use template::{TemplateBuild, build, expand, placeholder, placeholder_indexes};
pub use trigger::InputFeatures;
