use crate::engine::{self, InputFeatures, RunMetrics, TemplateBuild};
use crate::{Dialect, SubExpression};
use std::time::{Duration, Instant};

/// Options that affect extraction.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Overrides the dialect's call marker. Only the nested-call dialect scans
    /// for calls; the marker must end in its opening bracket, e.g. `"hist("`.
    pub call_marker: Option<String>,
    /// Normalize the metric identifier of every extracted sub-expression after
    /// the template has been built.
    pub normalize: bool,
}

impl Options {
    pub(crate) fn marker(&self, dialect: Dialect) -> Option<&str> {
        match dialect {
            Dialect::NestedCall => self.call_marker.as_deref().or(dialect.call_marker()),
            Dialect::LabelMatcher => None,
        }
    }
}

/// Options for [`pretty_print_with`].
#[derive(Debug, Clone)]
pub struct FormatOptions {
    /// Indent emitted once per nesting level.
    pub indent: String,
    /// `(open, close)` pairs that start and end a nesting level.
    pub brackets: Vec<(char, char)>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions::for_dialect(Dialect::NestedCall)
    }
}

impl FormatOptions {
    /// Two-space indent over the dialect's grouping brackets.
    pub fn for_dialect(dialect: Dialect) -> Self {
        FormatOptions { indent: "  ".to_string(), brackets: dialect.grouping_brackets().to_vec() }
    }
}

/// Result from [`segment`] and [`segment_with`].
#[derive(Debug, Clone)]
pub struct Segmentation {
    /// The segmented input text.
    pub text: String,
    pub dialect: Dialect,
    /// Extracted sub-expressions, in order of appearance.
    pub subexpressions: Vec<SubExpression>,
    /// `text` with each sub-expression replaced by its `${Qn}` placeholder.
    pub template: String,
    /// Total elapsed time.
    pub elapsed: Duration,
}

impl Segmentation {
    /// Current sub-expression texts, in placeholder order.
    pub fn texts(&self) -> Vec<String> {
        self.subexpressions.iter().map(|s| s.text.clone()).collect()
    }

    /// Template with every placeholder replaced by its sub-expression text.
    pub fn expand(&self) -> String {
        expand_template(&self.template, &self.texts())
    }
}

/// Additional details returned by [`segment_verbose_with`].
#[derive(Debug, Clone)]
pub struct SegmentationDetails {
    /// Features found by the pre-scan.
    pub features: InputFeatures,
    /// Call marker used, if the dialect scans for calls.
    pub call_marker: Option<String>,
    /// 0-based indexes of sub-expressions that got no placeholder.
    pub skipped: Vec<usize>,
    pub total: Duration,
    pub trigger: Duration,
    pub extract: Duration,
    pub template: Duration,
}

/// Result from [`segment_verbose_with`].
#[derive(Debug, Clone)]
pub struct SegmentationVerbose {
    pub text: String,
    pub dialect: Dialect,
    pub subexpressions: Vec<SubExpression>,
    pub template: String,
    pub elapsed: Duration,
    pub details: SegmentationDetails,
}

struct Run {
    subexpressions: Vec<SubExpression>,
    build: TemplateBuild,
    features: InputFeatures,
    metrics: RunMetrics,
}

fn run(text: &str, dialect: Dialect, options: &Options) -> Run {
    let started = Instant::now();
    let mut metrics = RunMetrics::default();
    let marker = options.marker(dialect);

    let t = Instant::now();
    let features = InputFeatures::scan(text, marker);
    metrics.trigger = t.elapsed();

    let t = Instant::now();
    let mut subexpressions = match (dialect, marker) {
        (Dialect::NestedCall, Some(marker)) if features.contains(InputFeatures::HAS_CALL_MARKER) => {
            engine::extract_nested_calls(text, marker)
        }
        (Dialect::LabelMatcher, _) if features.contains(InputFeatures::HAS_BRACES) => {
            engine::extract_label_matchers(text)
        }
        _ => Vec::new(),
    };
    metrics.extract = t.elapsed();

    let t = Instant::now();
    let texts: Vec<&str> = subexpressions.iter().map(|s| s.text.as_str()).collect();
    let build = engine::build(text, &texts);
    metrics.template = t.elapsed();

    if options.normalize {
        let marker = marker.unwrap_or("ts(");
        for sub in &mut subexpressions {
            sub.text = engine::normalize_identifier(&sub.text, marker);
        }
    }

    metrics.total = started.elapsed();

    if crate::debug_enabled() {
        eprintln!(
            "[segment] dialect={} subexpressions={} skipped={:?} total={:?}",
            dialect,
            subexpressions.len(),
            build.skipped,
            metrics.total
        );
    }

    Run { subexpressions, build, features, metrics }
}

/// Segment `text` with default [`Options`].
///
/// # Example
/// ```
/// use wf_buddy::{Dialect, segment};
///
/// let out = segment(r#"ts("cpu.load") / ts("cpu.count")"#, Dialect::NestedCall);
/// assert_eq!(out.subexpressions.len(), 2);
/// assert_eq!(out.template, "${Q1} / ${Q2}");
/// ```
pub fn segment(text: &str, dialect: Dialect) -> Segmentation {
    segment_with(text, dialect, &Options::default())
}

/// Segment `text`: extract sub-expressions for `dialect` and build the template.
pub fn segment_with(text: &str, dialect: Dialect, options: &Options) -> Segmentation {
    let run = run(text, dialect, options);

    Segmentation {
        text: text.to_string(),
        dialect,
        subexpressions: run.subexpressions,
        template: run.build.template,
        elapsed: run.metrics.total,
    }
}

/// Like [`segment_with`], but also returns pre-scan features, per-phase
/// timings and the sub-expressions the template builder had to skip.
pub fn segment_verbose_with(text: &str, dialect: Dialect, options: &Options) -> SegmentationVerbose {
    let run = run(text, dialect, options);

    let details = SegmentationDetails {
        features: run.features,
        call_marker: options.marker(dialect).map(str::to_string),
        skipped: run.build.skipped,
        total: run.metrics.total,
        trigger: run.metrics.trigger,
        extract: run.metrics.extract,
        template: run.metrics.template,
    };

    SegmentationVerbose {
        text: text.to_string(),
        dialect,
        subexpressions: run.subexpressions,
        template: run.build.template,
        elapsed: run.metrics.total,
        details,
    }
}

/// Extract the top-level sub-expressions of `text`, in order of appearance.
///
/// Never fails: unbalanced input or no match gives fewer (or zero) results.
///
/// # Example
/// ```
/// use wf_buddy::{Dialect, extract};
///
/// let subs = extract(r#"up{job="api"} and rate(errors{code="500"}[5m])"#, Dialect::LabelMatcher);
/// assert_eq!(subs, vec![r#"up{job="api"}"#, r#"errors{code="500"}"#]);
/// ```
pub fn extract(text: &str, dialect: Dialect) -> Vec<String> {
    run(text, dialect, &Options::default()).subexpressions.into_iter().map(|s| s.text).collect()
}

/// Replace the first remaining occurrence of each sub-expression with its
/// placeholder, left to right. Sub-expressions not found are skipped.
pub fn build_template<S: AsRef<str>>(text: &str, subexpressions: &[S]) -> String {
    engine::build(text, subexpressions).template
}

/// Replace every `${Qn}` in `template` with the current text of sub-expression
/// `n - 1`. Unknown placeholders are left in place.
///
/// # Example
/// ```
/// use wf_buddy::expand_template;
///
/// assert_eq!(expand_template("${Q1} - ${Q1}", &["ts(a)"]), "ts(a) - ts(a)");
/// ```
pub fn expand_template<S: AsRef<str>>(template: &str, subexpressions: &[S]) -> String {
    if !InputFeatures::scan(template, None).contains(InputFeatures::HAS_PLACEHOLDER) {
        return template.to_string();
    }
    engine::expand(template, subexpressions)
}

/// Rewrite `.` and `-` to `_` inside the first quoted name following `ts(`.
///
/// # Example
/// ```
/// use wf_buddy::normalize_identifier;
///
/// assert_eq!(normalize_identifier(r#"ts("cpu.load-1", host="a")"#), r#"ts("cpu_load_1", host="a")"#);
/// ```
pub fn normalize_identifier(subexpression: &str) -> String {
    if !InputFeatures::scan(subexpression, None).contains(InputFeatures::HAS_QUOTES) {
        return subexpression.to_string();
    }
    engine::normalize_identifier(subexpression, "ts(")
}

/// Pretty-print with a two-space indent, nesting on `(`/`)`.
pub fn pretty_print(text: &str) -> String {
    pretty_print_with(text, &FormatOptions::default())
}

pub fn pretty_print_with(text: &str, options: &FormatOptions) -> String {
    engine::pretty_print(text, &options.indent, &options.brackets)
}

/// Collapse each run of whitespace to a single space.
pub fn minify(text: &str) -> String {
    if !InputFeatures::scan(text, None).contains(InputFeatures::HAS_WHITESPACE) {
        return text.to_string();
    }
    engine::minify(text)
}

/// Render the placeholder for the 1-based position `n`, e.g. `${Q3}`.
pub fn placeholder(n: usize) -> String {
    engine::placeholder(n)
}

/// 1-based placeholder indexes referenced by `template`, in order of appearance.
pub fn placeholders(template: &str) -> Vec<usize> {
    engine::placeholder_indexes(template)
}
