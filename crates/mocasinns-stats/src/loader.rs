//! Reading delimited numeric text tables.
//!
//! Each input line is either skipped (one of the first `skip_rows` lines),
//! a comment (everything after the comment marker is ignored, and lines that
//! are blank afterwards are dropped), or a data row. Data rows are split on
//! the delimiter, or on runs of whitespace when no delimiter is set, and
//! every row must have as many fields as the first one.
//!
//! # Examples
//!
//! ```
//! use mocasinns_stats::{
//!     loader::{self, LoadOptions},
//!     table::Cell,
//! };
//!
//! let text = "# energy magnetization\n1.0 2.0 3.0\n4.0 5.0 6.0\n";
//! let options = LoadOptions::default().with_value_columns([1, 2]);
//! let mapping = loader::read_mapping(text.as_bytes(), &options).unwrap();
//!
//! assert_eq!(
//!     mapping.get(&Cell::Scalar(4.0)),
//!     Some(&Cell::Tuple(vec![5.0, 6.0]))
//! );
//! ```

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::{
    error::{LoadError, ParseError, ParseErrorKind},
    precision::Precision,
    table::{KeyedMapping, Table},
};

/// Options controlling how a text table is parsed and converted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Columns forming the key of each row. Default: `[0]`.
    pub key_columns: Vec<usize>,
    /// Columns forming the value of each row. Default: `[1]`.
    pub value_columns: Vec<usize>,
    /// Precision that parsed numbers are rounded to. Default: `f64`.
    pub precision: Precision,
    /// Marker starting a comment. An empty marker disables comments. Default: `#`.
    pub comment_marker: String,
    /// Field separator; `None` splits on runs of whitespace. Default: `None`.
    pub delimiter: Option<String>,
    /// Number of leading lines to skip unconditionally. Default: `0`.
    pub skip_rows: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            key_columns: vec![0],
            value_columns: vec![1],
            precision: Precision::default(),
            comment_marker: "#".to_owned(),
            delimiter: None,
            skip_rows: 0,
        }
    }
}

impl LoadOptions {
    #[must_use]
    pub fn with_key_columns(mut self, columns: impl Into<Vec<usize>>) -> Self {
        self.key_columns = columns.into();
        self
    }

    #[must_use]
    pub fn with_value_columns(mut self, columns: impl Into<Vec<usize>>) -> Self {
        self.value_columns = columns.into();
        self
    }

    #[must_use]
    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    #[must_use]
    pub fn with_comment_marker(mut self, marker: impl Into<String>) -> Self {
        self.comment_marker = marker.into();
        self
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: Option<String>) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_skip_rows(mut self, skip_rows: usize) -> Self {
        self.skip_rows = skip_rows;
        self
    }

    fn strip_comment<'a>(&self, line: &'a str) -> &'a str {
        if self.comment_marker.is_empty() {
            return line;
        }
        line.split_once(self.comment_marker.as_str())
            .map_or(line, |(data, _)| data)
    }

    fn parse_line(&self, line: &str, line_number: usize) -> Result<Vec<f64>, ParseError> {
        let parse = |token: &str| {
            token
                .parse::<f64>()
                .map(|value| self.precision.round(value))
                .map_err(|_| ParseError {
                    line: line_number,
                    kind: ParseErrorKind::InvalidNumber {
                        token: token.to_owned(),
                    },
                })
        };
        match &self.delimiter {
            Some(delimiter) => line.split(delimiter.as_str()).map(str::trim).map(parse).collect(),
            None => line.split_whitespace().map(parse).collect(),
        }
    }
}

/// Reads a table from `reader`, line by line.
pub fn read_table<R>(reader: R, options: &LoadOptions) -> Result<Table, LoadError>
where
    R: BufRead,
{
    let mut table = Table::default();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if let Some(row) = parse_data_line(&line, index, options)? {
            push_checked(&mut table, &row, index + 1)?;
        }
    }
    tracing::debug!(rows = table.len(), width = table.width(), "table loaded");
    Ok(table)
}

fn parse_data_line(
    line: &str,
    index: usize,
    options: &LoadOptions,
) -> Result<Option<Vec<f64>>, ParseError> {
    if index < options.skip_rows {
        return Ok(None);
    }
    let data = options.strip_comment(line);
    if data.trim().is_empty() {
        return Ok(None);
    }
    options.parse_line(data, index + 1).map(Some)
}

fn push_checked(table: &mut Table, row: &[f64], line: usize) -> Result<(), ParseError> {
    table.push_row(row).map_err(|_| ParseError {
        line,
        kind: ParseErrorKind::ColumnCount {
            expected: table.width(),
            actual: row.len(),
        },
    })
}

/// Reads a table from `reader` and converts it into a keyed mapping.
pub fn read_mapping<R>(reader: R, options: &LoadOptions) -> Result<KeyedMapping, LoadError>
where
    R: BufRead,
{
    let table = read_table(reader, options)?;
    Ok(table.to_mapping(&options.key_columns, &options.value_columns)?)
}

/// Loads the table file at `path` and converts it into a keyed mapping.
pub fn load_mapping<P>(path: P, options: &LoadOptions) -> Result<KeyedMapping, LoadError>
where
    P: AsRef<Path>,
{
    let file = File::open(path)?;
    read_mapping(BufReader::new(file), options)
}

/// Loads the table file at `path`.
pub fn load_table<P>(path: P, options: &LoadOptions) -> Result<Table, LoadError>
where
    P: AsRef<Path>,
{
    let file = File::open(path)?;
    read_table(BufReader::new(file), options)
}
