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

//! Error types for loading matrices and running strategies.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while turning delimited text into a [`Matrix`](crate::Matrix).
///
/// Row numbers are 1-based data-row numbers (the header is not counted).
///
/// # Examples
///
/// ```
/// use rowbench_core::ParseError;
///
/// let err = ParseError::WidthMismatch {
///     row: 3,
///     expected: 10,
///     actual: 9,
/// };
/// assert_eq!(
///     err.to_string(),
///     "Row width mismatch: expected 10 columns, got 9 in row 3"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// The input has no header line.
    #[error("Missing header: input is empty")]
    MissingHeader,

    /// A header field is blank.
    #[error("Invalid header at position {position}: empty column name")]
    EmptyColumnName {
        /// Position of the blank column name (0-based).
        position: usize,
    },

    /// A header name appears more than once.
    #[error("Invalid header at position {position}: duplicate column name '{name}'")]
    DuplicateColumn {
        /// The repeated name.
        name: String,
        /// Position of the second occurrence (0-based).
        position: usize,
    },

    /// A row does not have as many fields as the header.
    #[error("Row width mismatch: expected {expected} columns, got {actual} in row {row}")]
    WidthMismatch {
        /// Row number (1-based).
        row: usize,
        /// Number of columns declared by the header.
        expected: usize,
        /// Number of fields found in the row.
        actual: usize,
    },

    /// A field could not be read as a floating-point number.
    #[error("Non-numeric value '{value}' in column '{column}' at row {row}")]
    NotNumeric {
        /// Row number (1-based).
        row: usize,
        /// Column name from the header.
        column: String,
        /// The offending field.
        value: String,
    },

    /// The input has more rows than the configured limit.
    #[error("Row limit exceeded: input has more than {limit} rows")]
    RowLimit {
        /// Maximum number of rows accepted.
        limit: usize,
    },

    /// Values and column names do not describe a rectangular matrix.
    #[error("Invalid matrix shape: {0}")]
    Shape(String),

    /// The input file could not be opened or read.
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error message.
        message: String,
    },

    /// Error from the underlying CSV reader.
    #[error("CSV error: {0}")]
    Csv(String),
}

impl From<csv::Error> for ParseError {
    fn from(err: csv::Error) -> Self {
        ParseError::Csv(err.to_string())
    }
}

/// Errors raised by the harness, the strategies and the dataset generator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HarnessError {
    /// The input could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A per-row computation failed inside the worker pool.
    ///
    /// Remaining work is abandoned once the first failure is observed.
    #[error("Worker failed at row index {row}: {message}")]
    Worker {
        /// Index of the failing row (0-based).
        row: usize,
        /// Failure reported by the row operation.
        message: String,
    },

    /// A per-row computation panicked inside the worker pool.
    #[error("Worker panicked: {0}")]
    WorkerPanicked(String),

    /// A per-row computation failed in the serial strategy.
    #[error("Row index {row} failed: {message}")]
    RowFailed {
        /// Index of the failing row (0-based).
        row: usize,
        /// Failure reported by the row operation.
        message: String,
    },

    /// The worker pool could not be created.
    #[error("Failed to build worker pool: {0}")]
    PoolBuild(String),

    /// Invalid configuration parameter.
    #[error("Invalid configuration parameter '{parameter}': {reason}")]
    InvalidConfig {
        /// Parameter name.
        parameter: String,
        /// Reason the value was rejected.
        reason: String,
    },

    /// Writing an output file failed.
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error message.
        message: String,
    },

    /// Writing CSV output failed.
    #[error("CSV write error: {0}")]
    CsvWrite(String),
}

impl HarnessError {
    /// Create an invalid-configuration error.
    pub fn invalid_config(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Create an I/O error with file path context.
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Whether this error came out of the worker pool.
    pub fn is_worker_error(&self) -> bool {
        matches!(self, Self::Worker { .. } | Self::WorkerPanicked(_))
    }
}

impl From<csv::Error> for HarnessError {
    fn from(err: csv::Error) -> Self {
        HarnessError::CsvWrite(err.to_string())
    }
}

/// Convenience type alias for harness results.
pub type Result<T> = std::result::Result<T, HarnessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_numeric_display() {
        let err = ParseError::NotNumeric {
            row: 7,
            column: "col3".to_string(),
            value: "abc".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Non-numeric value 'abc' in column 'col3' at row 7"
        );
    }

    #[test]
    fn test_parse_error_is_transparent() {
        let err = HarnessError::from(ParseError::MissingHeader);
        assert_eq!(err.to_string(), "Missing header: input is empty");
    }

    #[test]
    fn test_worker_error_classification() {
        let worker = HarnessError::Worker {
            row: 4,
            message: "boom".to_string(),
        };
        assert!(worker.is_worker_error());
        assert!(HarnessError::WorkerPanicked("boom".to_string()).is_worker_error());
        assert!(!HarnessError::RowFailed {
            row: 4,
            message: "boom".to_string()
        }
        .is_worker_error());
    }

    #[test]
    fn test_io_error_carries_path() {
        let err = HarnessError::io_error(
            "out/big_data.csv",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory"),
        );
        let msg = err.to_string();
        assert!(msg.contains("out/big_data.csv"));
        assert!(msg.contains("no such directory"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ParseError>();
        assert_send_sync::<HarnessError>();
    }
}
