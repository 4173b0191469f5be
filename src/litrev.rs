//! The literature review pipeline.
//!
//! [`LitRev`] runs term explosion and both aggregation passes once, at construction,
//! and keeps the resulting tables. Nothing is recomputed or mutated afterwards, so two
//! pipelines built from the same records and configuration hold identical tables.

use chrono::{Datelike, Local};
use log::{info, warn};

use crate::aggregate::{YearRange, collapse_global, top_terms_per_year};
use crate::report::{self, MostCited};
use crate::terms::{self, DropMode, TermFilter};
use crate::{EmptyResultWarning, ExplodedRow, GlobalTermSummary, Record, Result, YearTermCount};

/// Default number of terms kept per year and globally.
pub const DEFAULT_TOP_COUNT: usize = 20;
/// Default number of most-cited terms handed to the citation chart.
pub const DEFAULT_TOP_CITATIONS: usize = 5;

/// Options for a [`LitRev`] run.
///
/// # Examples
///
/// ```
/// use litrev::LitRevConfig;
///
/// let config = LitRevConfig::new(2015)
///     .with_year_end(2022)
///     .with_drop_values(["covid", "sars"])
///     .with_top_count(10);
/// assert_eq!(config.top_citations, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LitRevConfig {
    /// First publication year counted, inclusive
    pub year_start: i32,
    /// Last publication year counted, inclusive. Defaults to the current year.
    pub year_end: i32,
    /// Terms matching any of these values are dropped
    pub drop_values: Vec<String>,
    /// How `drop_values` are matched
    pub drop_mode: DropMode,
    /// Number of terms kept per year and in the global summary
    pub top_count: usize,
    /// Number of most-cited terms selected for the citation chart
    pub top_citations: usize,
}

impl LitRevConfig {
    /// Creates a configuration counting from `year_start` up to the current year.
    #[must_use]
    pub fn new(year_start: i32) -> Self {
        Self {
            year_start,
            year_end: Local::now().year(),
            drop_values: Vec::new(),
            drop_mode: DropMode::default(),
            top_count: DEFAULT_TOP_COUNT,
            top_citations: DEFAULT_TOP_CITATIONS,
        }
    }

    #[must_use]
    pub fn with_year_end(mut self, year_end: i32) -> Self {
        self.year_end = year_end;
        self
    }

    #[must_use]
    pub fn with_drop_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.drop_values = values.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_drop_mode(mut self, mode: DropMode) -> Self {
        self.drop_mode = mode;
        self
    }

    #[must_use]
    pub fn with_top_count(mut self, top_count: usize) -> Self {
        self.top_count = top_count;
        self
    }

    #[must_use]
    pub fn with_top_citations(mut self, top_citations: usize) -> Self {
        self.top_citations = top_citations;
        self
    }

    /// The inclusive year range of the per-year pass.
    pub fn year_range(&self) -> YearRange {
        YearRange::new(self.year_start, self.year_end)
    }
}

/// Term tables derived from one literature export.
#[derive(Debug, Clone)]
pub struct LitRev {
    config: LitRevConfig,
    records: Vec<Record>,
    lit: Vec<ExplodedRow>,
    counts: Vec<YearTermCount>,
    top_counts: Vec<GlobalTermSummary>,
    warnings: Vec<EmptyResultWarning>,
}

impl LitRev {
    /// Runs the pipeline over `records`.
    ///
    /// # Errors
    ///
    /// Returns [`LitRevError::InvalidPattern`](crate::LitRevError::InvalidPattern) if the
    /// drop values do not compile. Empty results are reported through
    /// [`warnings`](Self::warnings) instead.
    pub fn new(records: Vec<Record>, config: LitRevConfig) -> Result<Self> {
        let filter = TermFilter::new(&config.drop_values, config.drop_mode)?;
        let mut warnings = Vec::new();

        let lit = terms::explode(&records, &filter);
        if lit.is_empty() {
            warnings.push(EmptyResultWarning::NoTerms);
        }

        let counts = top_terms_per_year(&lit, config.year_range(), config.top_count);
        if counts.is_empty() {
            warnings.push(EmptyResultWarning::NoYears {
                start: config.year_start,
                end: config.year_end,
            });
        }

        let top_counts = collapse_global(&counts, config.top_count);
        if top_counts.is_empty() {
            warnings.push(EmptyResultWarning::NoGlobalTerms);
        }

        for warning in &warnings {
            warn!("{}", warning);
        }
        info!(
            "Analysed {} records: {} term rows, {} per-year counts, {} global terms",
            records.len(),
            lit.len(),
            counts.len(),
            top_counts.len()
        );

        Ok(Self {
            config,
            records,
            lit,
            counts,
            top_counts,
            warnings,
        })
    }

    /// Loads a CSV export with the default [`CsvLoader`](crate::CsvLoader) and runs the pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`LitRevError::Schema`](crate::LitRevError::Schema) if a required column is
    /// missing, and any other loading error.
    #[cfg(feature = "csv")]
    pub fn from_csv(input: &str, config: LitRevConfig) -> Result<Self> {
        let records = crate::CsvLoader::new().parse(input)?;
        Self::new(records, config)
    }

    pub fn config(&self) -> &LitRevConfig {
        &self.config
    }

    /// The records as loaded.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// One row per (record, term) pair after exclusion filtering.
    pub fn lit(&self) -> &[ExplodedRow] {
        &self.lit
    }

    /// Top terms of every year in the configured range.
    pub fn counts(&self) -> &[YearTermCount] {
        &self.counts
    }

    /// Top terms across years.
    pub fn top_counts(&self) -> &[GlobalTermSummary] {
        &self.top_counts
    }

    /// Stages that produced no rows.
    pub fn warnings(&self) -> &[EmptyResultWarning] {
        &self.warnings
    }

    /// Unique keyword tokens as they appear in the export, before lowercasing.
    pub fn raw_terms(&self) -> Vec<String> {
        terms::raw_terms(&self.records)
    }

    /// Terms for the common-terms chart, the global table in rank order.
    pub fn common_terms(&self) -> &[GlobalTermSummary] {
        &self.top_counts
    }

    /// The `top_citations` most cited terms and their per-year rows.
    pub fn most_cited(&self) -> MostCited {
        report::most_cited(&self.top_counts, &self.counts, self.config.top_citations)
    }
}
