//! Term normalization.
//!
//! Every record carries two semicolon separated keyword columns. This module merges them
//! into one lowercase, deduplicated term list per record and explodes the records into one
//! [`ExplodedRow`] per term.
//!
//! # Example
//!
//! ```
//! use litrev::Record;
//! use litrev::terms::{DropMode, TermFilter, explode};
//!
//! let records = vec![Record {
//!     author_keywords: Some("Neural Networks;COVID-19".to_string()),
//!     ieee_terms: Some("neural networks;Pandemics".to_string()),
//!     year: Some(2021),
//!     ..Default::default()
//! }];
//!
//! let filter = TermFilter::new(&["covid".to_string()], DropMode::Regex).unwrap();
//! let rows = explode(&records, &filter);
//!
//! let terms: Vec<&str> = rows.iter().map(|row| row.term.as_str()).collect();
//! assert_eq!(terms, vec!["neural networks", "pandemics"]);
//! ```

use itertools::Itertools;
use log::debug;

use crate::regex::{Regex, escape};
use crate::{ExplodedRow, LitRevError, NO_TERM, Record, Result, Term};

/// How exclusion values are combined into a pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DropMode {
    /// Values are regular expressions joined with `|`.
    #[default]
    Regex,
    /// Values are escaped and matched as literal substrings.
    Literal,
}

/// Drops terms matching any of a list of exclusion values.
///
/// Matching is case sensitive and runs against the lowercased term, so exclusion
/// values are expected in lowercase. An empty list disables filtering.
///
/// # Examples
///
/// ```
/// use litrev::terms::{DropMode, TermFilter};
///
/// let filter = TermFilter::new(&["c++".to_string()], DropMode::Literal).unwrap();
/// assert!(filter.is_dropped("c++ programming"));
/// assert!(!filter.is_dropped("c programming"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TermFilter {
    pattern: Option<Regex>,
}

impl TermFilter {
    /// Compiles the exclusion values into a single alternation.
    ///
    /// # Errors
    ///
    /// Returns [`LitRevError::InvalidPattern`] if a value is not a valid regular
    /// expression in [`DropMode::Regex`].
    pub fn new(drop_values: &[String], mode: DropMode) -> Result<Self> {
        if drop_values.is_empty() {
            return Ok(Self::default());
        }

        let joined = match mode {
            DropMode::Regex => drop_values.join("|"),
            DropMode::Literal => drop_values.iter().map(|value| escape(value)).join("|"),
        };

        let pattern =
            Regex::new(&joined).map_err(|e| LitRevError::InvalidPattern(e.to_string()))?;
        Ok(Self {
            pattern: Some(pattern),
        })
    }

    /// A filter that keeps every term.
    #[must_use]
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Whether any exclusion value is configured.
    pub fn is_active(&self) -> bool {
        self.pattern.is_some()
    }

    /// Whether `term` contains a match of any exclusion value.
    pub fn is_dropped(&self, term: &str) -> bool {
        self.pattern
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(term))
    }
}

/// Splits a keyword cell on `;`.
///
/// An absent or empty cell yields nothing. Otherwise every token is kept as written,
/// so `"a;"` yields `"a"` and an empty term.
pub fn split_terms(field: Option<&str>) -> impl Iterator<Item = &str> {
    field
        .filter(|value| !value.is_empty())
        .into_iter()
        .flat_map(|value| value.split(';'))
}

/// Lowercased, deduplicated terms of a record.
///
/// Author keywords come first, followed by controlled terms; duplicates keep their
/// first position.
pub fn record_terms(record: &Record) -> Vec<Term> {
    split_terms(record.author_keywords.as_deref())
        .chain(split_terms(record.ieee_terms.as_deref()))
        .map(|token| Term::from(token.to_lowercase()))
        .unique()
        .collect()
}

/// Explodes records into one row per (record, term) pair.
///
/// A record without any term yields a single row with the [`NO_TERM`] placeholder.
/// Rows whose term is dropped by `filter` are removed afterwards, placeholder included.
pub fn explode(records: &[Record], filter: &TermFilter) -> Vec<ExplodedRow> {
    let mut rows = Vec::with_capacity(records.len());
    let mut dropped = 0usize;

    for record in records {
        let mut terms = record_terms(record);
        if terms.is_empty() {
            terms.push(Term::from(NO_TERM));
        }

        for term in terms {
            if filter.is_dropped(&term) {
                dropped += 1;
                continue;
            }
            rows.push(ExplodedRow::from_record(record, term));
        }
    }

    debug!(
        "Exploded {} records into {} term rows ({} dropped by filter)",
        records.len(),
        rows.len(),
        dropped
    );
    rows
}

/// Unique raw keyword tokens across all records, before lowercasing.
///
/// All author keywords are visited before any controlled term.
pub fn raw_terms(records: &[Record]) -> Vec<String> {
    let author = records
        .iter()
        .flat_map(|record| split_terms(record.author_keywords.as_deref()));
    let ieee = records
        .iter()
        .flat_map(|record| split_terms(record.ieee_terms.as_deref()));

    author.chain(ieee).unique().map(String::from).collect()
}
