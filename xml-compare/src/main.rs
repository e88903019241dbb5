use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use xml_compare::config::{comparator_builder, load_config, FileConfig, Overrides};
use xml_compare::inspect::render_tree;
use xml_compare::report::{render_summary, render_text};
use xml_compare_core::{format_json, Document, Selection};

mod cli;

use cli::{Cli, Command, DiffArgs, InspectArgs, OutputFormat};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Diff(args) => run_diff(args),
        Command::Inspect(args) => run_inspect(args),
    }
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn run_diff(args: DiffArgs) -> Result<()> {
    let file_config = match &args.config {
        Some(path) => {
            info!(config = %path.display(), "loading config");
            load_config(path)?
        }
        None => FileConfig::default(),
    };

    let overrides = Overrides {
        keep_namespaces: args.keep_namespaces,
        omit: args.omit,
        omit_files: args.omit_file,
        extractors: args.extractors,
    };
    let comparator = comparator_builder(file_config, overrides)
        .build()
        .context("invalid comparison settings")?;
    debug!(options = ?comparator.options(), "comparator ready");

    let first = read_xml(&args.file1)?;
    let second = read_xml(&args.file2)?;
    let diff = comparator.compare(&first, &second).with_context(|| {
        format!(
            "failed to compare {} with {}",
            args.file1.display(),
            args.file2.display()
        )
    })?;

    let selection = if args.unique {
        Selection::Unique
    } else {
        Selection::All
    };

    if args.summary {
        println!("{}", render_summary(&diff));
    } else {
        match args.format {
            OutputFormat::Text => println!("{}", render_text(&diff, selection)),
            OutputFormat::Json => println!("{}", format_json(&diff, selection)),
        }
    }

    if args.strict && !diff.is_identical() {
        bail!(
            "strict mode failed: {} difference(s) found",
            diff.differences_count()
        );
    }
    Ok(())
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    let xml = read_xml(&args.file)?;
    let document = Document::from_xml(&xml, !args.keep_namespaces)
        .with_context(|| format!("failed to parse {}", args.file.display()))?;
    debug!(nodes = document.node_count(), "document folded");

    print!("{}", render_tree(document.root(), args.depth));
    Ok(())
}

fn read_xml(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
