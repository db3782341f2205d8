//! `nidm-merge` — Merges the NIDM Turtle documents found under a study output
//! directory and removes duplicate qualified associations.
//!
//! **Inputs:** every `nidm.ttl` and `nidm/sub-*.ttl` below `<directory>`.
//!
//! **Outputs:**
//! - `<directory>/nidm_merge.ttl`: merged Turtle graph
//! - `<directory>/nidm_merge.nt` with `--format ntriples`
//! - `--output <path>` overrides either default
//!
//! **Usage:**
//! ```
//! nidm-merge <directory> [--output <path>] [--format turtle|ntriples]
//! ```
//!
//! Finding no documents is not an error: a warning is printed and nothing is
//! written. Documents that fail to parse are reported and skipped.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, ValueEnum};
use nidm_graph::serializer::{ntriples, turtle};
use nidm_graph::TripleStore;
use nidm_merge::{find_nidm_files, remove_duplicate_associations, GraphLoader};

/// Serialization of the merged graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Turtle 1.1, grouped by subject.
    Turtle,
    /// N-Triples, one triple per line.
    Ntriples,
}

impl Format {
    fn default_file_name(self) -> &'static str {
        match self {
            Format::Turtle => "nidm_merge.ttl",
            Format::Ntriples => "nidm_merge.nt",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Format::Turtle => "TTL",
            Format::Ntriples => "N-Triples",
        }
    }
}

/// Merge NIDM TTL files from a study output directory.
#[derive(Parser)]
#[command(
    name = "nidm-merge",
    about = "Merge NIDM TTL files from a study output directory"
)]
struct Args {
    /// Path to the output directory containing nidm.ttl files.
    directory: PathBuf,

    /// Output file for the merged graph (default: <directory>/nidm_merge.ttl,
    /// or <directory>/nidm_merge.nt with --format ntriples).
    #[arg(long)]
    output: Option<PathBuf>,

    /// Output serialization.
    #[arg(long, value_enum, default_value_t = Format::Turtle)]
    format: Format,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if !args.directory.exists() {
        Args::command()
            .error(
                ErrorKind::ValueValidation,
                format!("{} does not exist", args.directory.display()),
            )
            .exit();
    }
    let directory = fs::canonicalize(&args.directory)
        .with_context(|| format!("Failed to resolve {}", args.directory.display()))?;

    let files = find_nidm_files(&directory);
    if files.is_empty() {
        eprintln!(
            "WARNING: No NIDM TTL files found in {}",
            directory.display()
        );
        return Ok(());
    }

    println!("Found {} NIDM TTL file(s):", files.len());
    for file in &files {
        println!("  - {}", file.display());
    }

    let mut loader = GraphLoader::new();
    let report = loader.load_all_with(&files, |path| println!("Parsing {}...", path.display()));
    for failure in report.failures() {
        if let Some(e) = failure.error() {
            eprintln!("WARNING: Failed to parse {}: {}", failure.path.display(), e);
        }
    }
    println!(
        "Loaded {} of {} file(s), {} triple(s) parsed",
        report.loaded_count(),
        report.outcomes.len(),
        report.parsed_triples()
    );
    let mut store = loader.into_store();

    println!("Total triples before deduplication: {}", store.len());
    let resolution = remove_duplicate_associations(&mut store);
    println!(
        "Removed {} duplicate association(s), {} triple(s)",
        resolution.nodes_deleted, resolution.triples_removed
    );
    println!("Total triples after deduplication: {}", store.len());

    let output = args
        .output
        .unwrap_or_else(|| directory.join(args.format.default_file_name()));
    println!(
        "Writing merged {} to {}...",
        args.format.label(),
        output.display()
    );
    let serialized = match args.format {
        Format::Turtle => turtle::to_turtle(&store),
        Format::Ntriples => ntriples::to_ntriples(&store),
    };
    fs::write(&output, serialized)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("Done.");
    Ok(())
}
