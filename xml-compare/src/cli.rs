use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "xml-compare")]
#[command(about = "Compare XML documents ignoring sibling order and namespace prefixes")]
pub struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Compare two XML files and show differences.
    Diff(DiffArgs),
    /// Show the folded node tree of a single XML file.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
pub struct DiffArgs {
    pub file1: PathBuf,
    pub file2: PathBuf,
    /// Compare namespace prefixes too.
    #[arg(long)]
    pub keep_namespaces: bool,
    /// Drop differences whose path contains this substring.
    #[arg(long)]
    pub omit: Vec<String>,
    /// Newline-delimited file of substrings to omit.
    #[arg(long)]
    pub omit_file: Vec<PathBuf>,
    /// Value extractor as PATH=REGEX; group 1 replaces the value.
    #[arg(long = "extract", value_parser = parse_extractor)]
    pub extractors: Vec<(String, String)>,
    /// TOML file with comparison settings.
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Report differences with repeated structure collapsed.
    #[arg(long)]
    pub unique: bool,
    /// Print counts only.
    #[arg(long)]
    pub summary: bool,
    /// Exit with an error when any difference remains.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Parser, Debug)]
pub struct InspectArgs {
    pub file: PathBuf,
    #[arg(long, default_value_t = 3)]
    pub depth: usize,
    /// Keep namespace prefixes in paths.
    #[arg(long)]
    pub keep_namespaces: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

fn parse_extractor(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((path, pattern)) if !path.trim().is_empty() && !pattern.is_empty() => {
            Ok((path.trim().to_string(), pattern.to_string()))
        }
        _ => Err(format!("expected PATH=REGEX, got '{raw}'")),
    }
}
