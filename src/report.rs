//! Chart data and table export.
//!
//! Drawing is left to the caller. This module prepares what the two standard charts
//! consume and writes any derived table as CSV or JSON:
//!
//! - the common-terms chart plots the global summary, term against count, with citations
//!   as the marker size;
//! - the citation chart plots the per-year rows of the most cited terms as a density over
//!   publication years.
//!
//! # Example
//!
//! ```
//! use litrev::report::{ExportFormat, write_table};
//! use litrev::{GlobalTermSummary, Term};
//!
//! let table = vec![GlobalTermSummary {
//!     term: Term::from("robotics"),
//!     count: 3,
//!     citations: 12,
//! }];
//!
//! let mut out = Vec::new();
//! write_table(&mut out, &table, ExportFormat::Json).unwrap();
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     r#"[{"Term":"robotics","Count":3,"Citations":12}]"#
//! );
//! ```

use std::io::Write;

use serde::Serialize;

use crate::{GlobalTermSummary, Result, YearTermCount};

/// Output format for exported tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ExportFormat {
    #[cfg(feature = "csv")]
    Csv,
    Json,
}

impl Default for ExportFormat {
    #[cfg(feature = "csv")]
    fn default() -> Self {
        ExportFormat::Csv
    }

    #[cfg(not(feature = "csv"))]
    fn default() -> Self {
        ExportFormat::Json
    }
}

impl ExportFormat {
    /// File extension for the format.
    pub fn extension(self) -> &'static str {
        match self {
            #[cfg(feature = "csv")]
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Titles and axis labels of a chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartLabels {
    pub title: String,
    pub xlabel: String,
    pub ylabel: String,
}

impl ChartLabels {
    /// Labels of the common-terms chart.
    pub fn common_terms() -> Self {
        Self {
            title: "Most Common Keywords in Submitted Papers".to_string(),
            xlabel: "Number of papers".to_string(),
            ylabel: "Keywords".to_string(),
        }
    }

    /// Labels of the citation density chart.
    pub fn most_cited() -> Self {
        Self {
            title: "Distribution of Citations for most cited terms".to_string(),
            xlabel: "Year".to_string(),
            ylabel: "Citation Density".to_string(),
        }
    }
}

/// Input of the citation density chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MostCited {
    /// Selected terms, most cited first
    pub terms: Vec<GlobalTermSummary>,
    /// Per-year rows of the selected terms, in per-year table order
    pub rows: Vec<YearTermCount>,
}

/// Selects the `top_citations` global terms with the most citations and their per-year rows.
///
/// Terms with equal citations keep their global rank order.
pub fn most_cited(
    top_counts: &[GlobalTermSummary],
    counts: &[YearTermCount],
    top_citations: usize,
) -> MostCited {
    let mut terms = top_counts.to_vec();
    terms.sort_by(|a, b| b.citations.cmp(&a.citations));
    terms.truncate(top_citations);

    let rows = counts
        .iter()
        .filter(|row| terms.iter().any(|summary| summary.term == row.term))
        .cloned()
        .collect();

    MostCited { terms, rows }
}

/// Writes table rows to `writer`.
///
/// CSV output has a header row named after the table fields. JSON output is a single array.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_table<W, T>(mut writer: W, rows: &[T], format: ExportFormat) -> Result<()>
where
    W: Write,
    T: Serialize,
{
    match format {
        #[cfg(feature = "csv")]
        ExportFormat::Csv => {
            let mut csv_writer = crate::csv_crate::Writer::from_writer(writer);
            for row in rows {
                csv_writer.serialize(row)?;
            }
            csv_writer.flush()?;
        }
        ExportFormat::Json => {
            serde_json::to_writer(&mut writer, rows)?;
            writer.flush()?;
        }
    }
    Ok(())
}
