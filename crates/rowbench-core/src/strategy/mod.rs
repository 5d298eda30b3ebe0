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

//! The three interchangeable execution strategies.
//!
//! Each strategy computes the same row-wise aggregate over a read-only
//! [`Matrix`](crate::Matrix) and reports how long it took:
//!
//! - [`serial`]: one row at a time on the calling thread
//! - [`parallel`]: rows distributed across a scoped worker pool
//! - [`vectorized`]: one bulk array operation, no per-row dispatch

pub mod parallel;
pub mod serial;
pub mod vectorized;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Ordered row results, aligned by index with the input matrix.
pub type ResultSequence = Vec<f64>;

/// Execution strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Row-by-row loop on one thread.
    Serial,
    /// Worker pool.
    Parallel,
    /// Bulk array operation.
    Vectorized,
}

impl Strategy {
    /// All strategies in the order the harness runs them.
    pub const ALL: [Strategy; 3] = [Strategy::Serial, Strategy::Parallel, Strategy::Vectorized];

    /// Short lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Serial => "serial",
            Strategy::Parallel => "parallel",
            Strategy::Vectorized => "vectorized",
        }
    }

    /// Longer description for console output.
    pub fn description(&self) -> &'static str {
        match self {
            Strategy::Serial => "Serial computation (for loop)",
            Strategy::Parallel => "Parallel computation (worker pool)",
            Strategy::Vectorized => "Vectorized computation (bulk array mean)",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of running one strategy over a matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyRun {
    /// Which strategy produced the results.
    pub strategy: Strategy,
    /// One result per matrix row, in row order.
    pub results: ResultSequence,
    /// Wall-clock duration of the run.
    pub elapsed: Duration,
    /// Execution units used (1 for serial and vectorized).
    pub workers: usize,
}

impl StrategyRun {
    /// Number of row results.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// True when no rows were processed.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Rows processed per second, or 0 when nothing was timed.
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.results.len() as f64 / secs
        }
    }
}
