// Dweve rowbench - Row Aggregation Benchmark Harness
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Load delimited text into a [`Matrix`].
//!
//! The first line is a header naming each column; every following line is
//! one row of numeric fields. Ragged rows and non-numeric fields are
//! rejected before any matrix is produced.

use crate::error::ParseError;
use crate::matrix::Matrix;
use csv::{ReaderBuilder, Trim};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

/// Default maximum number of data rows accepted by the loader.
///
/// Can be overridden via the `ROWBENCH_MAX_ROWS` environment variable.
pub const DEFAULT_MAX_ROWS: usize = 10_000_000;

/// Environment variable overriding [`DEFAULT_MAX_ROWS`].
pub const MAX_ROWS_ENV: &str = "ROWBENCH_MAX_ROWS";

/// Read the row limit from the environment, falling back to the default.
fn max_rows_from_env() -> usize {
    std::env::var(MAX_ROWS_ENV)
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(DEFAULT_MAX_ROWS)
}

/// Configuration for loading delimited text.
///
/// # Examples
///
/// ```
/// use rowbench_core::LoadConfig;
///
/// let config = LoadConfig::default().with_delimiter(b'\t');
/// assert_eq!(config.delimiter, b'\t');
/// assert!(config.trim);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadConfig {
    /// Field separator (default: `,`).
    pub delimiter: u8,
    /// Trim surrounding whitespace from headers and fields (default: `true`).
    pub trim: bool,
    /// Maximum number of data rows (default: [`DEFAULT_MAX_ROWS`] or `ROWBENCH_MAX_ROWS`).
    pub max_rows: usize,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: true,
            max_rows: max_rows_from_env(),
        }
    }
}

impl LoadConfig {
    /// Sets the field separator.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Enables or disables whitespace trimming.
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Sets the row limit.
    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = max_rows;
        self
    }
}

/// Load a comma-separated file with the default configuration.
///
/// # Errors
///
/// Returns a [`ParseError`] if the file cannot be read, has no header, has a
/// row whose field count differs from the header, or has a non-numeric field.
///
/// # Examples
///
/// ```no_run
/// let matrix = rowbench_core::load("big_data.csv").unwrap();
/// println!("Dataset shape: {:?}", matrix.shape());
/// ```
pub fn load(path: impl AsRef<Path>) -> Result<Matrix, ParseError> {
    load_with_config(path, &LoadConfig::default())
}

/// Load a file with an explicit configuration.
pub fn load_with_config(path: impl AsRef<Path>, config: &LoadConfig) -> Result<Matrix, ParseError> {
    let path = path.as_ref();
    debug!(path = %path.display(), "opening input");
    let file = File::open(path).map_err(|e| ParseError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let matrix = load_from_reader(BufReader::new(file), config)?;
    info!(
        path = %path.display(),
        rows = matrix.nrows(),
        columns = matrix.ncols(),
        "loaded matrix"
    );
    Ok(matrix)
}

/// Load from any reader.
///
/// # Examples
///
/// ```
/// use rowbench_core::{load_from_reader, LoadConfig};
///
/// let data = "a,b\n1,3\n2,2\n4,4\n";
/// let matrix = load_from_reader(data.as_bytes(), &LoadConfig::default()).unwrap();
/// assert_eq!(matrix.shape(), (3, 2));
/// ```
pub fn load_from_reader<R: Read>(reader: R, config: &LoadConfig) -> Result<Matrix, ParseError> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(true)
        // Width is checked below so the error names the row.
        .flexible(true)
        .trim(if config.trim { Trim::All } else { Trim::None })
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Err(ParseError::MissingHeader);
    }
    let columns: Vec<String> = headers.iter().map(str::to_string).collect();
    if let Some(position) = columns.iter().position(|c| c.is_empty()) {
        return Err(ParseError::EmptyColumnName { position });
    }
    let mut seen = HashSet::with_capacity(columns.len());
    if let Some(position) = columns.iter().position(|c| !seen.insert(c.as_str())) {
        return Err(ParseError::DuplicateColumn {
            name: columns[position].clone(),
            position,
        });
    }

    let width = columns.len();
    let mut values = Vec::new();
    let mut record = csv::StringRecord::new();
    let mut row = 0usize;

    while rdr.read_record(&mut record)? {
        row += 1;
        if row > config.max_rows {
            return Err(ParseError::RowLimit {
                limit: config.max_rows,
            });
        }
        if record.len() != width {
            return Err(ParseError::WidthMismatch {
                row,
                expected: width,
                actual: record.len(),
            });
        }
        for (col, field) in record.iter().enumerate() {
            let value = field.parse::<f64>().map_err(|_| ParseError::NotNumeric {
                row,
                column: columns[col].clone(),
                value: field.to_string(),
            })?;
            values.push(value);
        }
    }

    Matrix::from_flat(columns, values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(data: &str) -> Result<Matrix, ParseError> {
        load_from_reader(data.as_bytes(), &LoadConfig::default())
    }

    #[test]
    fn test_load_basic() {
        let m = parse("col1,col2\n1,3\n2,2\n4,4\n").unwrap();
        assert_eq!(m.shape(), (3, 2));
        assert_eq!(m.row(1).to_vec(), vec![2.0, 2.0]);
    }

    #[test]
    fn test_header_only_is_empty_matrix() {
        let m = parse("col1,col2,col3\n").unwrap();
        assert_eq!(m.shape(), (0, 3));
    }

    #[test]
    fn test_empty_input_has_no_header() {
        assert_eq!(parse("").unwrap_err(), ParseError::MissingHeader);
    }

    #[test]
    fn test_ragged_row() {
        let err = parse("a,b\n1,2\n3\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::WidthMismatch {
                row: 2,
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_too_many_fields() {
        let err = parse("a,b\n1,2,3\n").unwrap_err();
        assert!(matches!(err, ParseError::WidthMismatch { actual: 3, .. }));
    }

    #[test]
    fn test_non_numeric_field() {
        let err = parse("a,b\n1,2\n3,x\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::NotNumeric {
                row: 2,
                column: "b".to_string(),
                value: "x".to_string()
            }
        );
    }

    #[test]
    fn test_empty_column_name() {
        let err = parse("a,,c\n1,2,3\n").unwrap_err();
        assert_eq!(err, ParseError::EmptyColumnName { position: 1 });
    }

    #[test]
    fn test_duplicate_column_name() {
        let err = parse("a,b,a\n1,2,3\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::DuplicateColumn {
                name: "a".to_string(),
                position: 2
            }
        );
        assert!(err.to_string().contains("duplicate column name 'a'"));
    }

    #[test]
    fn test_duplicates_detected_after_trim() {
        assert!(matches!(
            parse("x, x\n1,2\n").unwrap_err(),
            ParseError::DuplicateColumn { position: 1, .. }
        ));
        let config = LoadConfig::default().with_trim(false);
        assert!(load_from_reader("x, x\n1,2\n".as_bytes(), &config).is_ok());
    }

    #[test]
    fn test_trim_and_exponents() {
        let m = parse(" a , b \n 1.5e2 , -0.25 \n").unwrap();
        assert_eq!(m.columns(), &["a".to_string(), "b".to_string()]);
        assert_eq!(m.row(0).to_vec(), vec![150.0, -0.25]);
    }

    #[test]
    fn test_no_trim_rejects_padded_numbers() {
        let config = LoadConfig::default().with_trim(false);
        let err = load_from_reader("a\n 1\n".as_bytes(), &config).unwrap_err();
        assert!(matches!(err, ParseError::NotNumeric { .. }));
    }

    #[test]
    fn test_custom_delimiter() {
        let config = LoadConfig::default().with_delimiter(b';');
        let m = load_from_reader("a;b\n1;2\n".as_bytes(), &config).unwrap();
        assert_eq!(m.row(0).to_vec(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_row_limit() {
        let config = LoadConfig::default().with_max_rows(2);
        let err = load_from_reader("a\n1\n2\n3\n".as_bytes(), &config).unwrap_err();
        assert_eq!(err, ParseError::RowLimit { limit: 2 });
    }

    #[test]
    fn test_missing_file() {
        let err = load("definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, ParseError::Io { .. }));
        assert!(err.to_string().contains("definitely/not/here.csv"));
    }
}
