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

//! Store error types.

use rowbench_core::ParseError;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while writing or reading a matrix through the database.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database could not be opened or did not answer.
    #[error("Cannot connect to '{database}': {message}")]
    Connection {
        /// Database file.
        database: PathBuf,
        /// Driver message.
        message: String,
    },

    /// The table name is not a plain identifier.
    #[error("Invalid table name '{0}': expected [A-Za-z_][A-Za-z0-9_]*")]
    InvalidTableName(String),

    /// The configured table does not exist.
    #[error("Table '{0}' not found")]
    TableNotFound(String),

    /// A matrix without columns cannot become a table.
    #[error("Cannot create table '{0}' without columns")]
    EmptySchema(String),

    /// Error reported by SQLite.
    #[error("SQL error: {0}")]
    Sql(#[from] rusqlite::Error),

    /// The rows read back do not form a matrix.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl StoreError {
    /// Connection failure for a database path.
    pub fn connection(database: impl Into<PathBuf>, message: impl ToString) -> Self {
        StoreError::Connection {
            database: database.into(),
            message: message.to_string(),
        }
    }

    /// Whether the database itself was unreachable.
    pub fn is_connection_error(&self) -> bool {
        matches!(self, StoreError::Connection { .. })
    }
}

/// Step of a round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundTripStep {
    /// Opening the database.
    Connect,
    /// Replacing the table.
    Write,
    /// Reading the table and its schema back, then closing.
    Read,
}

impl fmt::Display for RoundTripStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RoundTripStep::Connect => "connect",
            RoundTripStep::Write => "write",
            RoundTripStep::Read => "read",
        })
    }
}

/// A round trip failure and the step it happened in.
#[derive(Debug, Error)]
#[error("{step} failed: {source}")]
pub struct RoundTripError {
    /// Step that failed.
    pub step: RoundTripStep,
    /// Underlying store error.
    #[source]
    pub source: StoreError,
}

impl RoundTripError {
    pub(crate) fn at(step: RoundTripStep) -> impl FnOnce(StoreError) -> Self {
        move |source| RoundTripError { step, source }
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
