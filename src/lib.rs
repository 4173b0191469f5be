//! Keyword trend analysis for literature exports.
//!
//! `litrev` takes a bibliographic export table (for example an IEEE Xplore CSV export),
//! normalizes the two keyword columns of every record into one set of lowercase terms,
//! and ranks those terms per publication year and across years.
//!
//! # Key Features
//!
//! - **Term normalization**: `Author Keywords` and `IEEE Terms` are split on `;`,
//!   lowercased and deduplicated per record, then exploded into one row per term.
//! - **Exclusion filter**: drop terms matching any of a list of patterns.
//! - **Per-year ranking**: the `top_count` most frequent terms of every year within an
//!   inclusive year range, with summed citation counts.
//! - **Global ranking**: terms ranked by how many years they reach the per-year top list,
//!   favouring persistent topics over one-year spikes.
//! - **Chart data**: the common-terms and most-cited tables consumed by renderers, with
//!   CSV and JSON export.
//!
//! # Basic Usage
//!
//! ```rust
//! use litrev::{LitRev, LitRevConfig, Record};
//!
//! let records = vec![
//!     Record {
//!         author_keywords: Some("AI;ml".to_string()),
//!         ieee_terms: Some("ML".to_string()),
//!         citation_count: Some(3),
//!         year: Some(2020),
//!         ..Default::default()
//!     },
//!     Record {
//!         ieee_terms: Some("AI".to_string()),
//!         citation_count: Some(1),
//!         year: Some(2020),
//!         ..Default::default()
//!     },
//! ];
//!
//! let config = LitRevConfig::new(2020).with_year_end(2020);
//! let review = LitRev::new(records, config).unwrap();
//!
//! assert_eq!(review.lit().len(), 3);
//! assert_eq!(review.counts()[0].term, "ai");
//! assert_eq!(review.counts()[0].count, 2);
//! assert_eq!(review.counts()[0].citations, 4);
//! ```
//!
//! # Loading a CSV export
//!
//! ```rust
//! use litrev::{LitRev, LitRevConfig};
//!
//! let input = "\
//! Document Title,Authors,Abstract,Author Keywords,IEEE Terms,Article Citation Count,Publication Year,DOI
//! Paper A,Smith J,Text,deep learning;vision,Computer vision,12,2021,10.1/a
//! Paper B,Doe J,Text,,Deep Learning,,2022,10.1/b";
//!
//! let review = LitRev::from_csv(input, LitRevConfig::new(2021).with_year_end(2022)).unwrap();
//! assert_eq!(review.top_counts()[0].term, "deep learning");
//! assert_eq!(review.top_counts()[0].count, 2);
//! ```
//!
//! # Error Handling
//!
//! Fallible operations return the crate [`Result`] wrapping [`LitRevError`]. A missing input
//! column is a [`LitRevError::Schema`] and aborts construction. Filters or year ranges that
//! leave nothing behind are not errors: the tables are empty and an
//! [`EmptyResultWarning`] is recorded on the pipeline and logged.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(feature = "csv")]
extern crate csv as csv_crate;

pub mod aggregate;
#[cfg(feature = "csv")]
pub mod csv;
pub mod litrev;
mod regex;
pub mod report;
pub mod terms;
mod utils;

// Reexports
#[cfg(feature = "csv")]
pub use crate::csv::CsvLoader;
pub use litrev::{LitRev, LitRevConfig};
pub use terms::{DropMode, TermFilter};

/// A specialized Result type for literature review operations.
pub type Result<T> = std::result::Result<T, LitRevError>;

/// Represents errors that can occur while loading or analysing a literature table.
#[derive(Error, Debug)]
pub enum LitRevError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    InvalidFormat(String),

    #[error("Missing required column: {0}")]
    Schema(String),

    #[error("Invalid field value: {field} - {message}")]
    InvalidFieldValue { field: String, message: String },

    #[error("Invalid exclusion pattern: {0}")]
    InvalidPattern(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(feature = "csv")]
impl From<csv_crate::Error> for LitRevError {
    fn from(err: csv_crate::Error) -> Self {
        LitRevError::InvalidFormat(err.to_string())
    }
}

/// Non-fatal conditions where a stage produced no rows.
///
/// The affected table is left empty so that consumers can decide how to handle it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmptyResultWarning {
    #[error("no term rows left after explosion and exclusion filtering")]
    NoTerms,

    #[error("no term counts for publication years {start} to {end}")]
    NoYears { start: i32, end: i32 },

    #[error("no terms in the global summary")]
    NoGlobalTerms,
}

/// A normalized, lowercase keyword.
pub type Term = CompactString;

/// Placeholder term for records without any keyword.
pub const NO_TERM: &str = "None";

/// Column names of the literature export, in export order.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "Document Title",
    "Authors",
    "Abstract",
    "Author Keywords",
    "IEEE Terms",
    "Article Citation Count",
    "Publication Year",
    "DOI",
];

/// A single record of the literature export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "Document Title")]
    pub title: String,
    #[serde(rename = "Authors")]
    pub authors: String,
    #[serde(rename = "Abstract")]
    pub abstract_text: String,
    /// Semicolon separated author keywords
    #[serde(rename = "Author Keywords")]
    pub author_keywords: Option<String>,
    /// Semicolon separated controlled terms
    #[serde(rename = "IEEE Terms")]
    pub ieee_terms: Option<String>,
    #[serde(rename = "Article Citation Count")]
    pub citation_count: Option<u64>,
    /// Publication year. `None` when the cell was empty or not a whole number.
    #[serde(rename = "Publication Year")]
    pub year: Option<i32>,
    #[serde(rename = "DOI")]
    pub doi: String,
}

/// One (record, term) pair produced by term explosion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplodedRow {
    #[serde(rename = "Document Title")]
    pub title: String,
    #[serde(rename = "Authors")]
    pub authors: String,
    #[serde(rename = "Abstract")]
    pub abstract_text: String,
    #[serde(rename = "Article Citation Count")]
    pub citation_count: Option<u64>,
    #[serde(rename = "Publication Year")]
    pub year: Option<i32>,
    #[serde(rename = "DOI")]
    pub doi: String,
    #[serde(rename = "Term")]
    pub term: Term,
}

impl ExplodedRow {
    /// Copies every non-keyword field of `record` next to `term`.
    pub fn from_record(record: &Record, term: Term) -> Self {
        Self {
            title: record.title.clone(),
            authors: record.authors.clone(),
            abstract_text: record.abstract_text.clone(),
            citation_count: record.citation_count,
            year: record.year,
            doi: record.doi.clone(),
            term,
        }
    }
}

/// Occurrences and citations of a term within one publication year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearTermCount {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Term")]
    pub term: Term,
    #[serde(rename = "Count")]
    pub count: u64,
    #[serde(rename = "Citations")]
    pub citations: u64,
}

/// Counts and citations of a term summed over its per-year rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalTermSummary {
    #[serde(rename = "Term")]
    pub term: Term,
    #[serde(rename = "Count")]
    pub count: u64,
    #[serde(rename = "Citations")]
    pub citations: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = LitRevError::Schema("IEEE Terms".to_string());
        assert_eq!(error.to_string(), "Missing required column: IEEE Terms");
    }

    #[test]
    fn test_warning_display() {
        let warning = EmptyResultWarning::NoYears {
            start: 2020,
            end: 2021,
        };
        assert_eq!(
            warning.to_string(),
            "no term counts for publication years 2020 to 2021"
        );
    }

    #[test]
    fn test_exploded_row_copies_record_fields() {
        let record = Record {
            title: "Title".to_string(),
            authors: "Smith J".to_string(),
            author_keywords: Some("a;b".to_string()),
            citation_count: Some(7),
            year: Some(2019),
            doi: "10.1/x".to_string(),
            ..Default::default()
        };
        let row = ExplodedRow::from_record(&record, Term::from("a"));
        assert_eq!(row.title, "Title");
        assert_eq!(row.authors, "Smith J");
        assert_eq!(row.citation_count, Some(7));
        assert_eq!(row.year, Some(2019));
        assert_eq!(row.doi, "10.1/x");
        assert_eq!(row.term, "a");
    }
}
