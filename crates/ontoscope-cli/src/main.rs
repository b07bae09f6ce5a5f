//! Ontoscope CLI
//!
//! Command-line interface for OWL definition-coverage reporting:
//! - Load an OWL/XML functional-style document (file or stdin)
//! - Run the coverage analysis
//! - Render the result as a terminal report or JSON
//!
//! All analysis logic lives in `ontoscope-owl`; this crate is the display
//! collaborator and only consumes the immutable `AnalysisResult`.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

mod report;

#[derive(Parser)]
#[command(name = "ontoscope")]
#[command(
    author,
    version,
    about = "Ontoscope: definition-coverage reports for OWL ontologies"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze an OWL/XML document and report per-class definition coverage.
    ///
    /// A class counts as defined when it is the subject of a subclass or
    /// equivalence axiom, or a member of a disjointness axiom. The report
    /// lists defined and undefined classes plus the overall coverage ratio.
    Analyze {
        /// Input OWL/XML file. Reads stdin when omitted or `-`.
        input: Option<PathBuf>,

        /// Output format: text|json
        #[arg(long, default_value = "text")]
        format: String,

        /// Output report path (defaults to stdout).
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze { input, format, out } => analyze(input, &format, out),
    }
}

fn analyze(input: Option<PathBuf>, format: &str, out: Option<PathBuf>) -> Result<()> {
    let text = read_input(input.as_deref())?;

    let result = ontoscope_owl::analyze_document(&text)
        .map_err(|err| anyhow!("cannot analyze document: {err}"))?;

    let rendered = match format {
        "text" => report::render_text(&result),
        "json" => serde_json::to_string_pretty(&result).context("serializing report")?,
        other => return Err(anyhow!("unknown format: {other} (expected text|json)")),
    };

    match out {
        Some(path) => fs::write(&path, rendered)
            .with_context(|| format!("writing report to {}", path.display()))?,
        None => println!("{rendered}"),
    }
    Ok(())
}

fn read_input(input: Option<&std::path::Path>) -> Result<String> {
    match input {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
            .with_context(|| format!("reading ontology from {}", path.display())),
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("reading ontology from stdin")?;
            Ok(text)
        }
    }
}
