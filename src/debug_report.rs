use crate::Layout;
use wf_buddy::{FormatOptions, InputFeatures, SegmentationVerbose, expand_template, minify, placeholder, pretty_print_with};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

/// What to show besides the sub-expressions.
pub struct View {
    pub expand: bool,
    pub layout: Layout,
    pub format: FormatOptions,
}

pub fn print_run(res: &SegmentationVerbose, view: &View, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Segmenting ({})", res.dialect), ansi::CYAN)));
    println!("{}", palette.dim(res.text.trim_end()));

    println!("\n{}", palette.paint("━━━ Sub-expressions ━━━", ansi::GRAY));
    if res.subexpressions.is_empty() {
        println!("{}", palette.dim("  Nothing extracted"));
        println!("\n{}", palette.paint("Possible reasons:", ansi::YELLOW));
        print_empty_reasons(res, &palette);
        println!("\n{}", palette.dim("  Tip: Set WF_BUDDY_DEBUG=1 to see scan details"));
    } else {
        print_subexpressions(res, &palette);
    }

    println!("\n{}", palette.paint("━━━ Template ━━━", ansi::GRAY));
    println!("{}", layout(&res.template, view));

    if view.expand {
        let texts: Vec<&str> = res.subexpressions.iter().map(|s| s.text.as_str()).collect();
        println!("\n{}", palette.paint("━━━ Values ━━━", ansi::GRAY));
        println!("{}", layout(&expand_template(&res.template, &texts), view));
    }

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Scan: {}  │  Extract: {}  │  Template: {}",
        palette.paint(format!("{:?}", res.details.total), ansi::GREEN),
        palette.dim(format!("{:?}", res.details.trigger)),
        palette.paint(format!("{:?}", res.details.extract), ansi::CYAN),
        palette.dim(format!("{:?}", res.details.template)),
    );
    println!();
}

fn layout(text: &str, view: &View) -> String {
    match view.layout {
        Layout::AsIs => text.to_string(),
        Layout::Pretty => pretty_print_with(text, &view.format),
        Layout::Minified => minify(text),
    }
}

fn print_subexpressions(res: &SegmentationVerbose, palette: &ansi::Palette) {
    for sub in &res.subexpressions {
        let skipped = res.details.skipped.contains(&sub.index);
        println!(
            "  {} {} {} {}",
            palette.paint(placeholder(sub.index + 1), ansi::BLUE),
            palette.bold(palette.paint(&sub.text, ansi::GREEN)),
            palette.dim("│"),
            palette.paint(
                format!("span {}..{} ({} bytes)", sub.range.start, sub.range.end, sub.range.len()),
                ansi::YELLOW
            ),
        );
        if skipped {
            println!("      {}", palette.paint("not found while building the template", ansi::YELLOW));
        }
    }
}

fn print_empty_reasons(res: &SegmentationVerbose, palette: &ansi::Palette) {
    let features = res.details.features;
    match &res.details.call_marker {
        Some(marker) if !features.contains(InputFeatures::HAS_CALL_MARKER) => {
            println!("  • No {} call in the input", palette.paint(marker, ansi::CYAN));
        }
        Some(_) => println!("  • Every call is unterminated (missing closing bracket)"),
        None if !features.contains(InputFeatures::HAS_BRACES) => println!("  • No label matcher braces in the input"),
        None => println!("  • Braces are nested or not preceded by a metric name"),
    }
}
