//! Metric identifier normalization.
//!
//! Rewrites `.` and `-` to `_` inside the first quoted metric name that
//! directly follows the call marker:
//!
//! ```text
//! ts("cpu.load-1", host="a.b")  ->  ts("cpu_load_1", host="a.b")
//! ```
//!
//! Only that one span changes; every other argument is left alone. Input with
//! no `marker"..."` span comes back unchanged.

use regex::Regex;

pub(crate) fn normalize_identifier(subexpression: &str, marker: &str) -> String {
    let compiled;
    let re: &Regex = if marker == "ts(" {
        regex!(r#"ts\("([^"]+)""#)
    } else {
        match Regex::new(&format!(r#"{}"([^"]+)""#, regex::escape(marker))) {
            Ok(re) => {
                compiled = re;
                &compiled
            }
            Err(_) => return subexpression.to_string(),
        }
    };

    let Some(name) = re.captures(subexpression).and_then(|caps| caps.get(1)) else {
        return subexpression.to_string();
    };

    let mut out = String::with_capacity(subexpression.len());
    out.push_str(&subexpression[..name.start()]);
    out.extend(name.as_str().chars().map(|c| if c == '.' || c == '-' { '_' } else { c }));
    out.push_str(&subexpression[name.end()..]);
    out
}
