//! Thicket CLI
//!
//! Parses a markup file (or an inline string) and prints the resulting tree
//! followed by every diagnostic the parser recorded.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use owo_colors::OwoColorize;
use thicket_common::warning::{clear_warnings, set_colored};
use thicket_dom::Document;
use thicket_html::{HTMLParser, ParseIssue, line_and_column, print_tree, to_json};

/// Thicket: an error-tolerant markup parser
#[derive(Parser, Debug)]
#[command(name = "thicket")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Parse a file and print the tree
    thicket ./index.html

    # Parse inline markup
    thicket --html '<div><p>Unclosed'

    # Machine-readable output
    thicket --format json ./index.html
"#)]
struct Cli {
    /// Path to the markup file to parse
    #[arg(value_name = "FILE", required_unless_present = "html", conflicts_with = "html")]
    path: Option<PathBuf>,

    /// Parse this string instead of reading a file
    #[arg(long, value_name = "HTML")]
    html: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Tree)]
    format: OutputFormat,

    /// Disable colored output, including warnings echoed to stderr
    #[arg(long)]
    no_color: bool,

    /// Also echo each diagnostic to stderr as a warning
    #[arg(long)]
    warnings: bool,

    /// Do not echo the input before the tree
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Indented tree followed by a numbered diagnostics list
    Tree,
    /// Pretty-printed JSON report
    Json,
}

/// Applies colors only when they are enabled.
#[derive(Debug, Clone, Copy)]
struct Palette {
    enabled: bool,
}

impl Palette {
    fn heading(self, text: &str) -> String {
        if self.enabled {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn warning(self, text: &str) -> String {
        if self.enabled {
            text.yellow().to_string()
        } else {
            text.to_string()
        }
    }

    fn fatal(self, text: &str) -> String {
        if self.enabled {
            text.red().to_string()
        } else {
            text.to_string()
        }
    }

    fn success(self, text: &str) -> String {
        if self.enabled {
            text.green().to_string()
        } else {
            text.to_string()
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let source = load_source(&cli)?;

    set_colored(!cli.no_color);
    clear_warnings();

    let mut parser = HTMLParser::new(&source);
    if cli.warnings {
        parser = parser.with_warnings();
    }
    let (document, issues) = parser.run();

    match cli.format {
        OutputFormat::Json => {
            let json = to_json(&source, document.as_ref(), &issues)
                .context("failed to encode the parse result as JSON")?;
            println!("{json}");
        }
        OutputFormat::Tree => {
            let palette = Palette {
                enabled: !cli.no_color,
            };
            print_report(&source, document.as_ref(), &issues, palette, cli.quiet);
        }
    }

    Ok(if document.is_some() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Read the input named on the command line
fn load_source(cli: &Cli) -> Result<String> {
    if let Some(ref html) = cli.html {
        Ok(html.clone())
    } else if let Some(ref path) = cli.path {
        fs::read_to_string(path).with_context(|| format!("failed to read '{}'", path.display()))
    } else {
        anyhow::bail!("a file path or --html is required")
    }
}

fn print_report(
    source: &str,
    document: Option<&Document>,
    issues: &[ParseIssue],
    palette: Palette,
    quiet: bool,
) {
    if !quiet {
        println!("{}", palette.heading("--- Input ---"));
        println!("{source}");
        println!();
    }

    println!("{}", palette.heading("--- Tree ---"));
    match document {
        Some(doc) => print_tree(doc.tree(), doc.root(), 0),
        None => println!(
            "{}",
            palette.fatal("Parsing hit a fatal error; no tree could be built.")
        ),
    }

    println!();
    if issues.is_empty() {
        println!("{}", palette.success("--- Parsing completed without errors ---"));
        return;
    }

    println!("{}", palette.heading("--- Diagnostics ---"));
    for (i, issue) in issues.iter().enumerate() {
        let location = issue.position().map_or_else(String::new, |offset| {
            let (line, column) = line_and_column(source, offset);
            format!(" {line}:{column}")
        });
        let label = format!("{}. [{}{location}]", i + 1, issue.code());
        let label = if issue.is_fatal() {
            palette.fatal(&label)
        } else {
            palette.warning(&label)
        };
        println!("{label} {issue}");
    }
}
