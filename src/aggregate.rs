//! Term ranking per publication year and across years.
//!
//! Aggregation runs in two passes:
//!
//! 1. [`top_terms_per_year`] counts the exploded rows of every year in an inclusive
//!    [`YearRange`] and keeps the `top_count` most frequent terms of each year,
//!    together with the summed citations of their rows.
//! 2. [`collapse_global`] ranks terms by the number of per-year rows they own, that is by
//!    the number of years in which they reached the top list, and sums their counts and
//!    citations. A term that stays popular for several years outranks a term with one
//!    large spike.
//!
//! Both rankings sort by frequency, descending. Terms with equal frequency keep the order
//! in which they were first encountered.
//!
//! # Example
//!
//! ```
//! use litrev::aggregate::{YearRange, collapse_global, top_terms_per_year};
//! use litrev::terms::{TermFilter, explode};
//! use litrev::Record;
//!
//! let records: Vec<Record> = (2019..=2021)
//!     .map(|year| Record {
//!         author_keywords: Some("robotics".to_string()),
//!         citation_count: Some(2),
//!         year: Some(year),
//!         ..Default::default()
//!     })
//!     .collect();
//!
//! let rows = explode(&records, &TermFilter::disabled());
//! let counts = top_terms_per_year(&rows, YearRange::new(2019, 2021), 20);
//! let global = collapse_global(&counts, 20);
//!
//! assert_eq!(counts.len(), 3);
//! assert_eq!(global[0].term, "robotics");
//! assert_eq!(global[0].count, 3);
//! assert_eq!(global[0].citations, 6);
//! ```

use std::collections::{BTreeMap, HashMap};

use log::debug;

use crate::{ExplodedRow, GlobalTermSummary, Term, YearTermCount};

/// Inclusive range of publication years.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    #[must_use]
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.start..=self.end).contains(&year)
    }
}

/// Running totals for one term.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Tally<'a> {
    term: &'a str,
    /// Number of entries seen for the term; this is the ranking key.
    hits: u64,
    count: u64,
    citations: u64,
}

/// Accumulates `(term, count, citations)` entries and ranks terms by hits.
///
/// The sort is stable, so ties keep first-encounter order.
fn rank<'a, I>(entries: I) -> Vec<Tally<'a>>
where
    I: IntoIterator<Item = (&'a str, u64, u64)>,
{
    let mut position: HashMap<&'a str, usize> = HashMap::new();
    let mut tallies: Vec<Tally<'a>> = Vec::new();

    for (term, count, citations) in entries {
        match position.get(term) {
            Some(&index) => {
                let tally = &mut tallies[index];
                tally.hits += 1;
                tally.count += count;
                tally.citations += citations;
            }
            None => {
                position.insert(term, tallies.len());
                tallies.push(Tally {
                    term,
                    hits: 1,
                    count,
                    citations,
                });
            }
        }
    }

    tallies.sort_by(|a, b| b.hits.cmp(&a.hits));
    tallies
}

/// Keeps the `top_count` most frequent terms of every year in `range`.
///
/// Years are visited in ascending order and rows within a year follow the rank.
/// Rows without a publication year never fall in a range. Missing citation counts
/// add nothing to the citation sum.
pub fn top_terms_per_year(
    rows: &[ExplodedRow],
    range: YearRange,
    top_count: usize,
) -> Vec<YearTermCount> {
    let mut by_year: BTreeMap<i32, Vec<&ExplodedRow>> = BTreeMap::new();
    for row in rows {
        if let Some(year) = row.year.filter(|year| range.contains(*year)) {
            by_year.entry(year).or_default().push(row);
        }
    }

    let mut counts = Vec::new();
    for (year, year_rows) in &by_year {
        let ranked = rank(
            year_rows
                .iter()
                .map(|row| (row.term.as_str(), 1, row.citation_count.unwrap_or(0))),
        );

        counts.extend(ranked.into_iter().take(top_count).map(|tally| YearTermCount {
            year: *year,
            term: Term::from(tally.term),
            count: tally.hits,
            citations: tally.citations,
        }));
    }

    debug!(
        "Ranked terms for {} years between {} and {}: {} rows",
        by_year.len(),
        range.start,
        range.end,
        counts.len()
    );
    counts
}

/// Collapses the per-year table into one row per term.
///
/// Terms are ranked by how many per-year rows they have, the `top_count` best are kept,
/// and their counts and citations are summed over those rows.
pub fn collapse_global(counts: &[YearTermCount], top_count: usize) -> Vec<GlobalTermSummary> {
    let ranked = rank(
        counts
            .iter()
            .map(|row| (row.term.as_str(), row.count, row.citations)),
    );

    let summary: Vec<GlobalTermSummary> = ranked
        .into_iter()
        .take(top_count)
        .map(|tally| GlobalTermSummary {
            term: Term::from(tally.term),
            count: tally.count,
            citations: tally.citations,
        })
        .collect();

    debug!("Collapsed {} per-year rows into {} terms", counts.len(), summary.len());
    summary
}
