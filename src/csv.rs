//! CSV loader for literature exports.
//!
//! Reads the table exported by IEEE Xplore (and compatible tools) into [`Record`]s.
//! The header row must contain every column in [`REQUIRED_COLUMNS`], spelled exactly;
//! other columns are ignored.
//!
//! # Example
//!
//! ```
//! use litrev::CsvLoader;
//!
//! let input = "\
//! Document Title,Authors,Abstract,Author Keywords,IEEE Terms,Article Citation Count,Publication Year,DOI,Publisher
//! Test Paper,Smith J,An abstract,a;b,C,4,2021,10.1/x,IEEE";
//!
//! let records = CsvLoader::new().parse(input).unwrap();
//! assert_eq!(records[0].title, "Test Paper");
//! assert_eq!(records[0].author_keywords.as_deref(), Some("a;b"));
//! assert_eq!(records[0].year, Some(2021));
//! ```
//!
//! [`REQUIRED_COLUMNS`]: crate::REQUIRED_COLUMNS

mod structure;

use csv::ReaderBuilder;
use log::debug;
use std::path::Path;

use crate::{LitRevError, Record, Result};
use structure::ColumnMap;

/// Configuration for CSV loading.
///
/// # Examples
///
/// ```
/// use litrev::csv::CsvConfig;
///
/// let mut config = CsvConfig::new();
/// config.set_delimiter(b'\t').set_strict_numbers(true);
/// ```
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Delimiter to use for parsing the CSV
    pub(crate) delimiter: u8,
    /// Whether to trim whitespace around every cell
    pub(crate) trim: bool,
    /// Whether unparseable year and citation cells are errors instead of missing values
    pub(crate) strict_numbers: bool,
    /// Whether records may have a different number of fields than the header
    pub(crate) flexible: bool,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvConfig {
    /// Creates a new CSV configuration with default settings
    #[must_use]
    pub fn new() -> Self {
        Self {
            delimiter: b',',
            trim: false,
            strict_numbers: false,
            flexible: false,
        }
    }

    /// Sets the delimiter character
    pub fn set_delimiter(&mut self, delimiter: u8) -> &mut Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether cells are trimmed
    pub fn set_trim(&mut self, trim: bool) -> &mut Self {
        self.trim = trim;
        self
    }

    /// Sets whether malformed year or citation cells abort loading
    pub fn set_strict_numbers(&mut self, strict: bool) -> &mut Self {
        self.strict_numbers = strict;
        self
    }

    /// Sets whether ragged rows are accepted
    pub fn set_flexible(&mut self, flexible: bool) -> &mut Self {
        self.flexible = flexible;
        self
    }
}

/// Loader for CSV literature exports.
#[derive(Debug, Clone, Default)]
pub struct CsvLoader {
    config: CsvConfig,
}

impl CsvLoader {
    /// Creates a new loader with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: CsvConfig::new(),
        }
    }

    /// Creates a new loader with custom configuration
    #[must_use]
    pub fn with_config(mut self, config: CsvConfig) -> Self {
        self.config = config;
        self
    }

    /// Parses CSV text into records.
    ///
    /// # Errors
    ///
    /// - [`LitRevError::Schema`] if a required column is missing from the header.
    /// - [`LitRevError::InvalidFormat`] if the CSV itself is malformed.
    /// - [`LitRevError::InvalidFieldValue`] for unparseable numbers in strict mode.
    pub fn parse(&self, input: &str) -> Result<Vec<Record>> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.config.delimiter)
            .has_headers(true)
            .flexible(self.config.flexible)
            .from_reader(input.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| LitRevError::InvalidFormat(e.to_string()))?
            .iter()
            .map(|header| header.trim_start_matches('\u{feff}').to_string())
            .collect();

        let columns = ColumnMap::from_headers(&headers)?;

        let mut records = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let row = result.map_err(|e| LitRevError::InvalidFormat(e.to_string()))?;
            // Line 1 is the header.
            records.push(columns.to_record(&row, &self.config, index + 2)?);
        }

        debug!("Loaded {} records from CSV", records.len());
        Ok(records)
    }

    /// Reads and parses a CSV file.
    ///
    /// # Errors
    ///
    /// Returns [`LitRevError::Io`] if the file cannot be read, otherwise as [`parse`](Self::parse).
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Record>> {
        let input = std::fs::read_to_string(path)?;
        self.parse(&input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const HEADER: &str = "Document Title,Authors,Abstract,Author Keywords,IEEE Terms,Article Citation Count,Publication Year,DOI";

    #[test]
    fn test_basic_export() {
        let input = format!(
            "{HEADER}\n\
             Paper A,\"Smith, J.; Doe, J.\",Abstract A,AI;ml,ML,3,2020,10.1/a\n\
             Paper B,Roe R.,Abstract B,,AI,1,2020,10.1/b"
        );

        let records = CsvLoader::new().parse(&input).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0],
            Record {
                title: "Paper A".to_string(),
                authors: "Smith, J.; Doe, J.".to_string(),
                abstract_text: "Abstract A".to_string(),
                author_keywords: Some("AI;ml".to_string()),
                ieee_terms: Some("ML".to_string()),
                citation_count: Some(3),
                year: Some(2020),
                doi: "10.1/a".to_string(),
            }
        );
        assert_eq!(records[1].author_keywords, None);
        assert_eq!(records[1].ieee_terms.as_deref(), Some("AI"));
    }

    #[test]
    fn test_column_order_and_extra_columns() {
        let input = "\
DOI,Publication Year,Publisher,Article Citation Count,IEEE Terms,Author Keywords,Abstract,Authors,Document Title
10.1/a,2019,IEEE,,x,y,abs,auth,Title";

        let records = CsvLoader::new().parse(input).unwrap();
        assert_eq!(records[0].title, "Title");
        assert_eq!(records[0].doi, "10.1/a");
        assert_eq!(records[0].citation_count, None);
        assert_eq!(records[0].author_keywords.as_deref(), Some("y"));
    }

    #[test]
    fn test_missing_column_is_schema_error() {
        let input = "Document Title,Authors,Abstract,Author Keywords,Article Citation Count,Publication Year,DOI\n\
                     T,A,B,k,1,2020,d";
        let result = CsvLoader::new().parse(input);
        match result {
            Err(LitRevError::Schema(column)) => assert_eq!(column, "IEEE Terms"),
            other => panic!("expected schema error, got {:?}", other),
        }
    }

    #[test]
    fn test_header_names_are_case_sensitive() {
        let input = "document title,Authors,Abstract,Author Keywords,IEEE Terms,Article Citation Count,Publication Year,DOI\n\
                     T,A,B,k,t,1,2020,d";
        assert!(matches!(
            CsvLoader::new().parse(input),
            Err(LitRevError::Schema(_))
        ));
    }

    #[test]
    fn test_byte_order_mark_is_ignored() {
        let input = format!("\u{feff}{HEADER}\nT,A,B,k,t,1,2020,d");
        let records = CsvLoader::new().parse(&input).unwrap();
        assert_eq!(records[0].title, "T");
    }

    #[test]
    fn test_malformed_numbers_are_left_missing() {
        let input = format!("{HEADER}\nT,A,B,k,t,many,unknown,d\nT2,A,B,k,t,2.0,2021.0,d");
        let records = CsvLoader::new().parse(&input).unwrap();
        assert_eq!(records[0].citation_count, None);
        assert_eq!(records[0].year, None);
        assert_eq!(records[1].citation_count, Some(2));
        assert_eq!(records[1].year, Some(2021));
    }

    #[test]
    fn test_strict_numbers() {
        let input = format!("{HEADER}\nT,A,B,k,t,1,2020,d\nT,A,B,k,t,1,soon,d");
        let mut config = CsvConfig::new();
        config.set_strict_numbers(true);

        let result = CsvLoader::new().with_config(config).parse(&input);
        match result {
            Err(LitRevError::InvalidFieldValue { field, message }) => {
                assert_eq!(field, "Publication Year");
                assert!(message.contains("line 3"));
            }
            other => panic!("expected invalid field value, got {:?}", other),
        }
    }

    #[test]
    fn test_custom_delimiter_and_trim() {
        let input = "Document Title\tAuthors\tAbstract\tAuthor Keywords\tIEEE Terms\tArticle Citation Count\tPublication Year\tDOI\n\
                     Title \tA\tB\t k1;k2 \t\t 5 \t2022\td";
        let mut config = CsvConfig::new();
        config.set_delimiter(b'\t').set_trim(true);

        let records = CsvLoader::new().with_config(config).parse(input).unwrap();
        assert_eq!(records[0].title, "Title");
        assert_eq!(records[0].author_keywords.as_deref(), Some("k1;k2"));
        assert_eq!(records[0].ieee_terms, None);
        assert_eq!(records[0].citation_count, Some(5));
    }

    #[test]
    fn test_ragged_rows() {
        let input = format!("{HEADER}\nT,A,B,k,t,1,2020");
        assert!(matches!(
            CsvLoader::new().parse(&input),
            Err(LitRevError::InvalidFormat(_))
        ));

        let mut config = CsvConfig::new();
        config.set_flexible(true);
        let records = CsvLoader::new().with_config(config).parse(&input).unwrap();
        assert_eq!(records[0].doi, "");
    }

    #[test]
    fn test_header_only() {
        let records = CsvLoader::new().parse(HEADER).unwrap();
        assert!(records.is_empty());
    }
}
