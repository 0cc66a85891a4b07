//! Template building and expansion.
//!
//! A template is the original query with every extracted sub-expression
//! replaced by a positional placeholder `${Qn}` (1-based).
//!
//! ```text
//! original:  ts("a") + ts("b") / ts("a")
//! subs:      [ts("a"), ts("b"), ts("a")]
//! template:  ${Q1} + ${Q2} / ${Q3}
//! ```
//!
//! ## Building
//!
//! Replacement is sequential and first-occurrence: each sub-expression is
//! searched for in the part of the original that has not been consumed yet,
//! and the search for the next one resumes after the replaced text. Duplicates
//! therefore map to one placeholder per occurrence, and numbering follows
//! extraction order.
//!
//! A sub-expression that no longer occurs in the unconsumed remainder is
//! skipped: no placeholder is emitted for it and its index is reported in
//! [`TemplateBuild::skipped`].
//!
//! ## Expanding
//!
//! `expand` substitutes each `${Qn}` with the *current* text of entry `n - 1`.
//! It never mutates its inputs, so calling it twice gives the same string.
//! Placeholders with no matching entry (`${Q0}`, or past the end) are left as
//! they are.

/// Output of [`build`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TemplateBuild {
    pub template: String,
    /// 0-based indexes of sub-expressions that were not found.
    pub skipped: Vec<usize>,
}

/// Render the placeholder for the 1-based position `n`.
pub(crate) fn placeholder(n: usize) -> String {
    format!("${{Q{n}}}")
}

pub(crate) fn build<S: AsRef<str>>(original: &str, subexpressions: &[S]) -> TemplateBuild {
    let mut template = String::with_capacity(original.len());
    let mut skipped = Vec::new();
    let mut cursor = 0;

    for (index, sub) in subexpressions.iter().enumerate() {
        let sub: &str = sub.as_ref();
        let found = if sub.is_empty() { None } else { original[cursor..].find(sub) };

        match found {
            Some(offset) => {
                let start = cursor + offset;
                template.push_str(&original[cursor..start]);
                template.push_str(&placeholder(index + 1));
                cursor = start + sub.len();
            }
            None => {
                if crate::debug_enabled() {
                    eprintln!("[template] Q{} not found after byte {cursor}; skipped", index + 1);
                }
                skipped.push(index);
            }
        }
    }

    template.push_str(&original[cursor..]);
    TemplateBuild { template, skipped }
}

pub(crate) fn expand<S: AsRef<str>>(template: &str, subexpressions: &[S]) -> String {
    let re = regex!(r"\$\{Q(\d+)\}");

    re.replace_all(template, |caps: &regex::Captures<'_>| {
        let value = caps[1]
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| subexpressions.get(i))
            .map(|s| AsRef::<str>::as_ref(s));

        match value {
            Some(v) => v.to_string(),
            None => caps[0].to_string(),
        }
    })
    .into_owned()
}

/// 1-based placeholder indexes referenced by `template`, in order of appearance.
pub(crate) fn placeholder_indexes(template: &str) -> Vec<usize> {
    let re = regex!(r"\$\{Q(\d+)\}");
    re.captures_iter(template).filter_map(|caps| caps[1].parse::<usize>().ok()).collect()
}
