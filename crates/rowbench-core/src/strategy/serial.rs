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

//! Serial strategy: a plain loop over rows on the calling thread.

use super::{Strategy, StrategyRun};
use crate::error::{HarnessError, Result};
use crate::matrix::Matrix;
use crate::ops::{MeanOp, RowOp};
use std::time::{Duration, Instant};
use tracing::debug;

/// Compute each row's mean in index order, sleeping `per_row_delay` first.
///
/// # Examples
///
/// ```
/// use rowbench_core::{run_serial, Matrix};
/// use std::time::Duration;
///
/// let m = Matrix::from_rows(
///     vec!["a".into(), "b".into()],
///     vec![vec![1.0, 3.0], vec![2.0, 2.0], vec![4.0, 4.0]],
/// )
/// .unwrap();
/// let run = run_serial(&m, Duration::ZERO).unwrap();
/// assert_eq!(run.results, vec![2.0, 2.0, 4.0]);
/// ```
pub fn run_serial(matrix: &Matrix, per_row_delay: Duration) -> Result<StrategyRun> {
    run_serial_with(matrix, &MeanOp::new(per_row_delay))
}

/// Apply `op` to each row in index order.
///
/// Stops at the first failing row and reports it as
/// [`HarnessError::RowFailed`].
pub fn run_serial_with<O: RowOp + ?Sized>(matrix: &Matrix, op: &O) -> Result<StrategyRun> {
    let start = Instant::now();
    let mut results = Vec::with_capacity(matrix.nrows());

    for (index, row) in matrix.rows().enumerate() {
        let value = op.apply(index, row).map_err(|e| HarnessError::RowFailed {
            row: index,
            message: e.to_string(),
        })?;
        results.push(value);
    }

    let elapsed = start.elapsed();
    debug!(op = op.name(), rows = results.len(), ?elapsed, "serial run finished");

    Ok(StrategyRun {
        strategy: Strategy::Serial,
        results,
        elapsed,
        workers: 1,
    })
}
