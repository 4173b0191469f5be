//! Column resolution and record conversion for CSV exports.

use csv::StringRecord;

use crate::csv::CsvConfig;
use crate::utils::{non_empty, parse_count, parse_year};
use crate::{LitRevError, REQUIRED_COLUMNS, Record, Result};

const TITLE: usize = 0;
const AUTHORS: usize = 1;
const ABSTRACT: usize = 2;
const AUTHOR_KEYWORDS: usize = 3;
const IEEE_TERMS: usize = 4;
const CITATION_COUNT: usize = 5;
const PUBLICATION_YEAR: usize = 6;
const DOI: usize = 7;

/// Positions of the required columns within a CSV header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ColumnMap {
    /// Header index for each entry of [`REQUIRED_COLUMNS`]
    positions: [usize; REQUIRED_COLUMNS.len()],
}

impl ColumnMap {
    /// Locates every required column by exact name.
    ///
    /// If a name appears more than once the first occurrence wins.
    pub(crate) fn from_headers(headers: &[String]) -> Result<Self> {
        let mut positions = [0; REQUIRED_COLUMNS.len()];
        for (slot, name) in positions.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = headers
                .iter()
                .position(|header| header == name)
                .ok_or_else(|| LitRevError::Schema(name.to_string()))?;
        }
        Ok(Self { positions })
    }

    fn cell<'r>(&self, row: &'r StringRecord, column: usize, config: &CsvConfig) -> &'r str {
        let value = row.get(self.positions[column]).unwrap_or("");
        if config.trim { value.trim() } else { value }
    }

    fn number<T>(
        &self,
        row: &StringRecord,
        column: usize,
        config: &CsvConfig,
        line: usize,
        parse: fn(&str) -> Option<T>,
    ) -> Result<Option<T>> {
        let Some(value) = non_empty(self.cell(row, column, config)) else {
            return Ok(None);
        };
        match parse(value) {
            Some(number) => Ok(Some(number)),
            None if config.strict_numbers => Err(LitRevError::InvalidFieldValue {
                field: REQUIRED_COLUMNS[column].to_string(),
                message: format!("'{}' is not a whole number (line {})", value.trim(), line),
            }),
            None => Ok(None),
        }
    }

    /// Builds a record from one CSV row.
    pub(crate) fn to_record(
        &self,
        row: &StringRecord,
        config: &CsvConfig,
        line: usize,
    ) -> Result<Record> {
        let text = |column| self.cell(row, column, config).to_string();
        let optional = |column| {
            Some(self.cell(row, column, config))
                .filter(|value| !value.is_empty())
                .map(String::from)
        };

        Ok(Record {
            title: text(TITLE),
            authors: text(AUTHORS),
            abstract_text: text(ABSTRACT),
            author_keywords: optional(AUTHOR_KEYWORDS),
            ieee_terms: optional(IEEE_TERMS),
            citation_count: self.number(row, CITATION_COUNT, config, line, parse_count)?,
            year: self.number(row, PUBLICATION_YEAR, config, line, parse_year)?,
            doi: text(DOI),
        })
    }
}
