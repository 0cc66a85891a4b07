mod debug_report;

use std::io::{self, IsTerminal, Read};
use wf_buddy::{Dialect, FormatOptions, Options, segment_verbose_with};

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let opts = Options { call_marker: config.marker.clone(), normalize: config.normalize };
    let res = segment_verbose_with(&config.input, config.dialect, &opts);
    let view = debug_report::View {
        expand: config.expand,
        layout: config.layout,
        format: FormatOptions::for_dialect(config.dialect),
    };
    debug_report::print_run(&res, &view, config.color);
}

/// How the template is laid out in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    AsIs,
    Pretty,
    Minified,
}

struct CliConfig {
    input: String,
    dialect: Dialect,
    marker: Option<String>,
    normalize: bool,
    expand: bool,
    layout: Layout,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut dialect = Dialect::default();
    let mut marker: Option<String> = None;
    let mut normalize = false;
    let mut expand = false;
    let mut layout = Layout::AsIs;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1).peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("wf-buddy {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--normalize" => normalize = true,
            "--expand" => expand = true,
            "--pretty" => layout = Layout::Pretty,
            "--minify" => layout = Layout::Minified,
            "--dialect" | "-d" => {
                let value = args.next().ok_or_else(|| "error: --dialect expects a value".to_string())?;
                dialect = parse_dialect(&value)?;
            }
            "--marker" => {
                let value = args.next().ok_or_else(|| "error: --marker expects a value".to_string())?;
                marker = Some(parse_marker(&value)?);
            }
            "--input" | "-i" => {
                let value = args.next().ok_or_else(|| "error: --input expects a value".to_string())?;
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value);
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    if input.is_some() {
                        return Err("error: input provided multiple times".to_string());
                    }
                    input = Some(rest);
                }
                break;
            }
            _ if arg.starts_with("--dialect=") => {
                dialect = parse_dialect(arg.trim_start_matches("--dialect="))?;
            }
            _ if arg.starts_with("--marker=") => {
                marker = Some(parse_marker(arg.trim_start_matches("--marker="))?);
            }
            _ if arg.starts_with("--input=") => {
                let value = arg.trim_start_matches("--input=");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value.to_string());
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(rest);
                break;
            }
        }
    }

    let input = match input {
        Some(value) => value,
        None => read_stdin_input()?,
    };

    if input.trim().is_empty() {
        return Err(format!("error: no input provided\n\n{}", help_text()));
    }

    Ok(CliConfig { input, dialect, marker, normalize, expand, layout, color })
}

fn parse_dialect(value: &str) -> Result<Dialect, String> {
    value.parse::<Dialect>().map_err(|err| format!("error: {err}"))
}

fn parse_marker(value: &str) -> Result<String, String> {
    match value.chars().last() {
        Some('(' | '[' | '{') => Ok(value.to_string()),
        _ => Err(format!("error: invalid --marker '{value}' (must end in '(', '[' or '{{')")),
    }
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "wf-buddy {version}

Split a monitoring query into sub-expressions and build a ${{Qn}} template.

Usage:
  wf-buddy [OPTIONS] [--] <query...>
  wf-buddy [OPTIONS] --input <query>

Options:
  -i, --input <query>        Query to segment. If omitted, reads remaining args
                             or stdin when no args are provided.
  -d, --dialect <name>       One of: {dialects}.
                             Default: {default_dialect}
  --marker <text>            Call marker for nested-call, e.g. 'hist('.
                             Default: {default_marker}
  --normalize                Rewrite '.' and '-' to '_' in each metric name.
  --expand                   Also show the template with values substituted.
  --pretty                   Pretty-print the template.
  --minify                   Collapse whitespace in the template.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Environment:
  WF_BUDDY_DEBUG=1           Print scan and template traces to stderr.

Exit codes:
  0  Success.
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION"),
        dialects = Dialect::ALL.map(Dialect::name).join(", "),
        default_dialect = Dialect::default(),
        default_marker = Dialect::NestedCall.call_marker().unwrap_or_default()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_must_end_in_bracket() {
        assert_eq!(parse_marker("hist(").as_deref(), Ok("hist("));
        assert!(parse_marker("hist").is_err());
        assert!(parse_marker("").is_err());
    }

    #[test]
    fn dialect_names() {
        assert_eq!(parse_dialect("label-matcher"), Ok(Dialect::LabelMatcher));
        assert!(parse_dialect("sql").unwrap_err().starts_with("error: unknown dialect"));
    }

    #[test]
    fn help_mentions_default_marker() {
        assert!(help_text().contains("Default: ts("));
        assert!(help_text().contains("${Qn}"));
        assert!(help_text().contains("One of: nested-call, label-matcher."));
    }
}
