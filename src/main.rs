#![forbid(unsafe_code)]
//! # litrev CLI
//!
//! Command-line front end of the `litrev` crate. Reads a literature export in CSV form,
//! ranks its keyword terms per year and across years, and writes the derived tables.
//!
//! ## Example
//! ```bash
//! litrev export.csv --year-start 2020 --drop covid --drop sars --format json --output-dir out
//! ```
//!
//! Writes `counts`, `top_counts` and `most_cited` tables into the output directory.
//! Set `RUST_LOG=info` (or `debug`) for progress messages.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use serde::Serialize;

use litrev::report::{ExportFormat, write_table};
use litrev::{CsvLoader, DropMode, LitRev, LitRevConfig};

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// CSV export to analyze
    input: PathBuf,

    /// First publication year to count (inclusive)
    #[arg(long)]
    year_start: i32,

    /// Last publication year to count (inclusive, default: current year)
    #[arg(long)]
    year_end: Option<i32>,

    /// Drop terms containing this pattern (repeatable)
    #[arg(long = "drop", value_name = "PATTERN")]
    drop_values: Vec<String>,

    /// Match drop patterns as literal text instead of regular expressions
    #[arg(long, default_value_t = false)]
    literal: bool,

    /// Number of terms kept per year and globally
    #[arg(long, default_value_t = litrev::litrev::DEFAULT_TOP_COUNT)]
    top_count: usize,

    /// Number of most cited terms to export
    #[arg(long, default_value_t = litrev::litrev::DEFAULT_TOP_CITATIONS)]
    top_citations: usize,

    /// Output format for exported tables
    #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
    format: ExportFormat,

    /// Directory receiving the exported tables
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
}

impl Cli {
    fn config(&self) -> LitRevConfig {
        let mut config = LitRevConfig::new(self.year_start)
            .with_drop_values(self.drop_values.iter().cloned())
            .with_top_count(self.top_count)
            .with_top_citations(self.top_citations);
        if let Some(year_end) = self.year_end {
            config = config.with_year_end(year_end);
        }
        if self.literal {
            config = config.with_drop_mode(DropMode::Literal);
        }
        config
    }
}

fn export<T: Serialize>(
    dir: &Path,
    name: &str,
    rows: &[T],
    format: ExportFormat,
) -> Result<PathBuf> {
    let path = dir.join(format!("{}.{}", name, format.extension()));
    let file = File::create(&path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    write_table(BufWriter::new(file), rows, format)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(path)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let records = CsvLoader::new()
        .from_path(&cli.input)
        .with_context(|| format!("Failed to load {}", cli.input.display()))?;
    let review = LitRev::new(records, cli.config())?;

    fs::create_dir_all(&cli.output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            cli.output_dir.display()
        )
    })?;

    export(&cli.output_dir, "counts", review.counts(), cli.format)?;
    export(&cli.output_dir, "top_counts", review.common_terms(), cli.format)?;
    export(&cli.output_dir, "most_cited", &review.most_cited().rows, cli.format)?;

    for warning in review.warnings() {
        eprintln!("Warning: {}", warning);
    }

    println!(
        "{} records, {} term rows, {} per-year counts, {} global terms",
        review.records().len(),
        review.lit().len(),
        review.counts().len(),
        review.top_counts().len()
    );
    for summary in review.common_terms() {
        println!(
            "{:<40} {:>6} papers {:>8} citations",
            summary.term, summary.count, summary.citations
        );
    }

    Ok(())
}
