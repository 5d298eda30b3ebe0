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

//! Benchmark driver: run strategies, time them, check they agree.

use crate::compare::{compare_detailed, DEFAULT_TOLERANCE};
use crate::error::{HarnessError, Result};
use crate::matrix::Matrix;
use crate::ops::{MeanOp, DEFAULT_ROW_DELAY};
use crate::strategy::parallel::{run_parallel_with, WorkerLimits};
use crate::strategy::serial::run_serial_with;
use crate::strategy::vectorized::run_vectorized;
use crate::strategy::{Strategy, StrategyRun};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

/// Default number of leading results kept in a report.
pub const DEFAULT_SAMPLE_SIZE: usize = 5;

/// Harness configuration.
///
/// # Example
///
/// ```
/// use rowbench_core::HarnessConfig;
/// use std::time::Duration;
///
/// let config = HarnessConfig::default()
///     .with_workers(4)
///     .with_per_row_delay(Duration::ZERO);
/// assert_eq!(config.workers, 4);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HarnessConfig {
    /// Simulated cost per row for the serial and parallel strategies.
    pub per_row_delay: Duration,
    /// Requested pool size; 0 uses the largest size the limits allow.
    pub workers: usize,
    /// Bounds on the pool size.
    pub limits: WorkerLimits,
    /// Tolerance for cross-strategy comparison.
    pub tolerance: f64,
    /// Number of leading results recorded in reports.
    pub sample_size: usize,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            per_row_delay: DEFAULT_ROW_DELAY,
            workers: 0,
            limits: WorkerLimits::default(),
            tolerance: DEFAULT_TOLERANCE,
            sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }
}

impl HarnessConfig {
    /// Sets the per-row delay.
    pub fn with_per_row_delay(mut self, delay: Duration) -> Self {
        self.per_row_delay = delay;
        self
    }

    /// Sets the requested worker count.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Sets the worker limits.
    pub fn with_limits(mut self, limits: WorkerLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Sets the comparison tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the report sample size.
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    /// Reject configurations that cannot produce a meaningful run.
    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(HarnessError::invalid_config(
                "tolerance",
                format!("must be a finite, non-negative number (got {})", self.tolerance),
            ));
        }
        Ok(())
    }
}

/// Timing of one strategy within a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyTiming {
    /// Strategy measured.
    pub strategy: Strategy,
    /// Wall-clock time in milliseconds.
    pub elapsed_ms: f64,
    /// Execution units used.
    pub workers: usize,
    /// Serial time divided by this strategy's time.
    pub speedup_vs_serial: Option<f64>,
}

/// Equivalence verdict between a baseline and a candidate strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyComparison {
    /// Reference strategy.
    pub baseline: Strategy,
    /// Strategy checked against the reference.
    pub candidate: Strategy,
    /// Whether the results agree within tolerance.
    pub equivalent: bool,
    /// Largest absolute difference observed.
    pub max_abs_diff: f64,
    /// First index outside the tolerance.
    pub first_mismatch: Option<usize>,
}

/// Summary of a full run of every strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarnessReport {
    /// Number of rows in the input.
    pub rows: usize,
    /// Number of columns in the input.
    pub columns: usize,
    /// Per-row delay in microseconds.
    pub per_row_delay_us: u64,
    /// Tolerance used for comparisons.
    pub tolerance: f64,
    /// Timings in run order.
    pub timings: Vec<StrategyTiming>,
    /// Parallel and vectorized results checked against serial.
    pub comparisons: Vec<StrategyComparison>,
    /// Leading serial results.
    pub sample: Vec<f64>,
}

impl HarnessReport {
    /// True when every comparison passed.
    pub fn all_equivalent(&self) -> bool {
        self.comparisons.iter().all(|c| c.equivalent)
    }

    /// Timing for a strategy, if it ran.
    pub fn timing(&self, strategy: Strategy) -> Option<&StrategyTiming> {
        self.timings.iter().find(|t| t.strategy == strategy)
    }

    /// Fastest strategy, if any ran.
    pub fn fastest(&self) -> Option<Strategy> {
        self.timings
            .iter()
            .min_by(|a, b| a.elapsed_ms.total_cmp(&b.elapsed_ms))
            .map(|t| t.strategy)
    }
}

/// Runs the strategies over a matrix according to a [`HarnessConfig`].
#[derive(Debug, Clone, Default)]
pub struct Harness {
    config: HarnessConfig,
}

impl Harness {
    /// Creates a harness.
    pub fn new(config: HarnessConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Run one strategy.
    pub fn run(&self, matrix: &Matrix, strategy: Strategy) -> Result<StrategyRun> {
        let op = MeanOp::new(self.config.per_row_delay);
        let run = match strategy {
            Strategy::Serial => run_serial_with(matrix, &op)?,
            Strategy::Parallel => {
                run_parallel_with(matrix, self.config.workers, &self.config.limits, &op)?
            }
            Strategy::Vectorized => run_vectorized(matrix),
        };
        info!(
            strategy = %strategy,
            rows = run.len(),
            workers = run.workers,
            elapsed_ms = run.elapsed.as_secs_f64() * 1000.0,
            "strategy finished"
        );
        Ok(run)
    }

    /// Run serial, parallel and vectorized in turn and compare them.
    ///
    /// The first failing strategy aborts the whole run.
    pub fn run_all(&self, matrix: &Matrix) -> Result<HarnessReport> {
        self.config.validate()?;
        let runs = Strategy::ALL
            .iter()
            .map(|&strategy| self.run(matrix, strategy))
            .collect::<Result<Vec<_>>>()?;
        Ok(self.report(matrix, &runs))
    }

    /// Build a report from completed runs; the first run is the baseline.
    pub fn report(&self, matrix: &Matrix, runs: &[StrategyRun]) -> HarnessReport {
        let baseline = runs.first();
        let baseline_secs = baseline.map(|r| r.elapsed.as_secs_f64());

        let timings = runs
            .iter()
            .map(|run| {
                let secs = run.elapsed.as_secs_f64();
                StrategyTiming {
                    strategy: run.strategy,
                    elapsed_ms: secs * 1000.0,
                    workers: run.workers,
                    speedup_vs_serial: baseline_secs
                        .filter(|_| secs > 0.0)
                        .map(|base| base / secs),
                }
            })
            .collect();

        let comparisons = match baseline {
            Some(base) => runs
                .iter()
                .skip(1)
                .map(|run| {
                    let detail = compare_detailed(&base.results, &run.results, self.config.tolerance);
                    StrategyComparison {
                        baseline: base.strategy,
                        candidate: run.strategy,
                        equivalent: detail.equivalent,
                        max_abs_diff: detail.max_abs_diff,
                        first_mismatch: detail.first_mismatch,
                    }
                })
                .collect(),
            None => Vec::new(),
        };

        let sample = baseline
            .map(|r| r.results.iter().take(self.config.sample_size).copied().collect())
            .unwrap_or_default();

        HarnessReport {
            rows: matrix.nrows(),
            columns: matrix.ncols(),
            per_row_delay_us: u64::try_from(self.config.per_row_delay.as_micros())
                .unwrap_or(u64::MAX),
            tolerance: self.config.tolerance,
            timings,
            comparisons,
            sample,
        }
    }
}
