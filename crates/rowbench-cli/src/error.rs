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

//! Structured error types for the rowbench CLI.
//!
//! Every failure is reported as a single line naming the stage that failed
//! and the underlying cause, e.g. `load failed: Row width mismatch: ...`.

use rowbench_core::Strategy;
use rowbench_store::{RoundTripError, RoundTripStep};
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Pipeline stage in which a failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Reading the input file.
    Load,
    /// Serial strategy.
    SerialRun,
    /// Worker-pool strategy.
    ParallelRun,
    /// Bulk vectorized strategy.
    VectorizedRun,
    /// Writing a generated dataset.
    Generate,
    /// Opening the database.
    Connect,
    /// Writing the table.
    StoreWrite,
    /// Reading the table back.
    StoreRead,
    /// Cross-strategy comparison.
    Compare,
}

impl Stage {
    /// Stage in which a strategy runs.
    pub fn for_strategy(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Serial => Stage::SerialRun,
            Strategy::Parallel => Stage::ParallelRun,
            Strategy::Vectorized => Stage::VectorizedRun,
        }
    }

    /// Lowercase stage name used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Load => "load",
            Stage::SerialRun => "serial run",
            Stage::ParallelRun => "parallel run",
            Stage::VectorizedRun => "vectorized run",
            Stage::Generate => "generate",
            Stage::Connect => "connect",
            Stage::StoreWrite => "store write",
            Stage::StoreRead => "store read",
            Stage::Compare => "compare",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The main error type for rowbench CLI operations.
///
/// # Cloning
///
/// Implements `Clone` so results can be collected and reported after the
/// run that produced them has finished.
///
/// # Examples
///
/// ```
/// use rowbench_cli::error::{CliError, Stage};
///
/// let err = CliError::stage(Stage::Load, "Row width mismatch: expected 10 columns, got 9 in row 3");
/// assert_eq!(
///     err.to_string(),
///     "load failed: Row width mismatch: expected 10 columns, got 9 in row 3"
/// );
/// ```
#[derive(Error, Debug, Clone)]
pub enum CliError {
    /// A pipeline stage failed.
    #[error("{stage} failed: {message}")]
    Stage {
        /// Stage that failed.
        stage: Stage,
        /// Underlying cause.
        message: String,
    },

    /// Strategies produced results that do not agree.
    #[error(
        "compare failed: {candidate} results differ from {baseline} (first mismatch at row index {index}, max abs diff {max_abs_diff:e})"
    )]
    Mismatch {
        /// Reference strategy.
        baseline: Strategy,
        /// Disagreeing strategy.
        candidate: Strategy,
        /// First row index outside the tolerance.
        index: usize,
        /// Largest absolute difference.
        max_abs_diff: f64,
    },

    /// I/O operation failed.
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The file path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// JSON serialization error.
    #[error("JSON format error: {message}")]
    JsonFormat {
        /// The error message
        message: String,
    },

    /// Invalid input provided by the user.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CliError {
    /// Create a stage failure from any displayable cause.
    pub fn stage(stage: Stage, cause: impl fmt::Display) -> Self {
        Self::Stage {
            stage,
            message: cause.to_string(),
        }
    }

    /// Create an I/O error with file path context.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(source: serde_json::Error) -> Self {
        Self::JsonFormat {
            message: source.to_string(),
        }
    }
}

impl From<RoundTripError> for CliError {
    fn from(err: RoundTripError) -> Self {
        let stage = match err.step {
            RoundTripStep::Connect => Stage::Connect,
            RoundTripStep::Write => Stage::StoreWrite,
            RoundTripStep::Read => Stage::StoreRead,
        };
        Self::stage(stage, err.source)
    }
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_names() {
        assert_eq!(Stage::Load.to_string(), "load");
        assert_eq!(Stage::for_strategy(Strategy::Parallel).to_string(), "parallel run");
        assert_eq!(Stage::StoreWrite.to_string(), "store write");
        assert_eq!(Stage::Connect.to_string(), "connect");
    }

    #[test]
    fn test_roundtrip_step_maps_to_stage() {
        let err: CliError = RoundTripError {
            step: RoundTripStep::Write,
            source: rowbench_store::StoreError::EmptySchema("t".into()),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "store write failed: Cannot create table 't' without columns"
        );
    }

    #[test]
    fn test_stage_error_display() {
        let err = CliError::stage(Stage::ParallelRun, "Worker failed at row index 42: boom");
        assert_eq!(
            err.to_string(),
            "parallel run failed: Worker failed at row index 42: boom"
        );
    }

    #[test]
    fn test_mismatch_display() {
        let err = CliError::Mismatch {
            baseline: Strategy::Serial,
            candidate: Strategy::Vectorized,
            index: 7,
            max_abs_diff: 0.5,
        };
        let msg = err.to_string();
        assert!(msg.starts_with("compare failed: vectorized results differ from serial"));
        assert!(msg.contains("row index 7"));
    }

    #[test]
    fn test_io_error_display() {
        let err = CliError::io_error(
            "report.json",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "I/O error for 'report.json': denied");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CliError = json_err.into();
        assert!(matches!(err, CliError::JsonFormat { .. }));
    }

    #[test]
    fn test_error_cloning() {
        let err = CliError::invalid_input("delimiter must be ASCII");
        assert_eq!(err.clone().to_string(), err.to_string());
    }
}
