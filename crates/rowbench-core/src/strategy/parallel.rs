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

//! Parallel strategy: rows distributed across a scoped Rayon pool.
//!
//! A fresh pool is built for every run and dropped when the run returns,
//! on success and on failure alike. Rows are handed out by Rayon's
//! work-stealing scheduler; collecting an indexed parallel iterator restores
//! row order regardless of which worker finished first.
//!
//! # Worker count
//!
//! The requested worker count is clamped by [`WorkerLimits`]: never more
//! than the hardware parallelism minus a reserve, and never more than a
//! fixed ceiling. Asking for too many workers is not an error.

use super::{Strategy, StrategyRun};
use crate::error::{HarnessError, Result};
use crate::matrix::Matrix;
use crate::ops::{MeanOp, RowError, RowOp};
use rayon::prelude::*;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Default upper bound on pool size.
pub const DEFAULT_MAX_WORKERS: usize = 6;

/// Default number of hardware threads left free for other work.
pub const DEFAULT_RESERVED_WORKERS: usize = 1;

/// Bounds applied to the requested worker count.
///
/// # Examples
///
/// ```
/// use rowbench_core::WorkerLimits;
///
/// let limits = WorkerLimits::default();
/// // 8 hardware threads: one reserved, ceiling of 6.
/// assert_eq!(limits.clamp(64, 8), 6);
/// // 4 hardware threads: one reserved.
/// assert_eq!(limits.clamp(64, 4), 3);
/// // 0 means "as many as allowed".
/// assert_eq!(limits.clamp(0, 4), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerLimits {
    /// Hard ceiling on the pool size.
    pub max_workers: usize,
    /// Hardware threads kept out of the pool.
    pub reserved: usize,
}

impl Default for WorkerLimits {
    fn default() -> Self {
        Self {
            max_workers: DEFAULT_MAX_WORKERS,
            reserved: DEFAULT_RESERVED_WORKERS,
        }
    }
}

impl WorkerLimits {
    /// Sets the hard ceiling.
    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers;
        self
    }

    /// Sets the number of reserved hardware threads.
    pub fn with_reserved(mut self, reserved: usize) -> Self {
        self.reserved = reserved;
        self
    }

    /// Largest pool allowed on a machine with `available` hardware threads.
    ///
    /// Always at least 1.
    pub fn ceiling(&self, available: usize) -> usize {
        let headroom = available.saturating_sub(self.reserved).max(1);
        self.max_workers.max(1).min(headroom)
    }

    /// Effective worker count for a request; `0` requests the ceiling.
    pub fn clamp(&self, requested: usize, available: usize) -> usize {
        let ceiling = self.ceiling(available);
        if requested == 0 {
            ceiling
        } else {
            requested.min(ceiling)
        }
    }
}

/// Hardware parallelism reported by the OS, or 1 if unknown.
pub fn available_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Compute each row's mean on a pool of up to `worker_count` workers.
///
/// # Errors
///
/// Returns a worker error if any row fails; remaining rows are abandoned.
///
/// # Examples
///
/// ```
/// use rowbench_core::{run_parallel, Matrix};
/// use std::time::Duration;
///
/// let m = Matrix::from_rows(
///     vec!["a".into(), "b".into()],
///     vec![vec![1.0, 3.0], vec![2.0, 2.0], vec![4.0, 4.0]],
/// )
/// .unwrap();
/// let run = run_parallel(&m, 4, Duration::ZERO).unwrap();
/// assert_eq!(run.results, vec![2.0, 2.0, 4.0]);
/// ```
pub fn run_parallel(
    matrix: &Matrix,
    worker_count: usize,
    per_row_delay: Duration,
) -> Result<StrategyRun> {
    run_parallel_with(
        matrix,
        worker_count,
        &WorkerLimits::default(),
        &MeanOp::new(per_row_delay),
    )
}

/// Apply `op` to every row on a scoped pool.
///
/// The reported duration includes building and tearing down the pool.
///
/// # Errors
///
/// - [`HarnessError::Worker`] when `op` returns an error for some row
/// - [`HarnessError::WorkerPanicked`] when `op` panics
/// - [`HarnessError::PoolBuild`] when the OS refuses to spawn threads
pub fn run_parallel_with<O: RowOp>(
    matrix: &Matrix,
    requested: usize,
    limits: &WorkerLimits,
    op: &O,
) -> Result<StrategyRun> {
    let available = available_workers();
    let workers = limits.clamp(requested, available);
    if requested > workers {
        warn!(requested, workers, available, "worker count clamped");
    }

    let start = Instant::now();
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("rowbench-worker-{}", i))
        .build()
        .map_err(|e| HarnessError::PoolBuild(e.to_string()))?;

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        pool.install(|| {
            (0..matrix.nrows())
                .into_par_iter()
                .map(|index| op.apply(index, matrix.row(index)).map_err(|e| (index, e)))
                .collect::<std::result::Result<Vec<f64>, (usize, RowError)>>()
        })
    }));
    drop(pool);
    let elapsed = start.elapsed();

    match outcome {
        Ok(Ok(results)) => {
            debug!(op = op.name(), workers, rows = results.len(), ?elapsed, "parallel run finished");
            Ok(StrategyRun {
                strategy: Strategy::Parallel,
                results,
                elapsed,
                workers,
            })
        }
        Ok(Err((row, err))) => Err(HarnessError::Worker {
            row,
            message: err.to_string(),
        }),
        Err(payload) => Err(HarnessError::WorkerPanicked(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
