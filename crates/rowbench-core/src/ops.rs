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

//! Per-row operations dispatched by the serial and parallel strategies.

use ndarray::ArrayView1;
use std::time::Duration;
use thiserror::Error;

/// Default artificial delay applied before each row (10 µs).
pub const DEFAULT_ROW_DELAY: Duration = Duration::from_micros(10);

/// Failure of a single row computation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowError {
    /// The row has no values to aggregate.
    #[error("row has no values")]
    EmptyRow,

    /// Operation-specific failure.
    #[error("{0}")]
    Failed(String),
}

/// A computation applied to one row at a time.
///
/// Operations must be `Send + Sync` because the parallel strategy shares one
/// instance across all workers.
///
/// # Examples
///
/// ```
/// use ndarray::ArrayView1;
/// use rowbench_core::{RowError, RowOp};
///
/// struct RowMax;
///
/// impl RowOp for RowMax {
///     fn apply(&self, _index: usize, row: ArrayView1<'_, f64>) -> Result<f64, RowError> {
///         row.iter().copied().reduce(f64::max).ok_or(RowError::EmptyRow)
///     }
///
///     fn name(&self) -> &str {
///         "max"
///     }
/// }
/// ```
pub trait RowOp: Send + Sync {
    /// Compute the result for row `index`.
    fn apply(&self, index: usize, row: ArrayView1<'_, f64>) -> Result<f64, RowError>;

    /// Human-readable name, used in logs.
    fn name(&self) -> &str;
}

/// Arithmetic mean of a row, optionally after a simulated workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeanOp {
    /// Sleep applied before each row. Zero disables it.
    pub delay: Duration,
}

impl MeanOp {
    /// Mean with the given per-row delay.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Mean with no delay.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }
}

impl Default for MeanOp {
    fn default() -> Self {
        Self::new(DEFAULT_ROW_DELAY)
    }
}

impl RowOp for MeanOp {
    fn apply(&self, _index: usize, row: ArrayView1<'_, f64>) -> Result<f64, RowError> {
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        row_mean(row)
    }

    fn name(&self) -> &str {
        "mean"
    }
}

/// Mean of one row, summed in index order.
pub fn row_mean(row: ArrayView1<'_, f64>) -> Result<f64, RowError> {
    if row.is_empty() {
        return Err(RowError::EmptyRow);
    }
    let sum: f64 = row.iter().sum();
    Ok(sum / row.len() as f64)
}
