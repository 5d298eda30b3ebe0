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

//! Row aggregation benchmark harness.
//!
//! Computes the mean of every row of a numeric table three ways and checks
//! that the answers agree while the timings differ:
//!
//! - **Serial**: a loop over rows on one thread
//! - **Parallel**: rows spread over a scoped worker pool
//! - **Vectorized**: a single bulk mean over the column axis
//!
//! # Examples
//!
//! ## Comparing the strategies
//!
//! ```
//! use rowbench_core::{compare, run_parallel, run_serial, run_vectorized, Matrix};
//! use std::time::Duration;
//!
//! let matrix = Matrix::from_rows(
//!     vec!["col1".into(), "col2".into()],
//!     vec![vec![1.0, 3.0], vec![2.0, 2.0], vec![4.0, 4.0]],
//! )
//! .unwrap();
//!
//! let serial = run_serial(&matrix, Duration::ZERO).unwrap();
//! let parallel = run_parallel(&matrix, 4, Duration::ZERO).unwrap();
//! let vectorized = run_vectorized(&matrix);
//!
//! assert_eq!(serial.results, vec![2.0, 2.0, 4.0]);
//! assert!(compare(&serial.results, &parallel.results, 1e-9));
//! assert!(compare(&serial.results, &vectorized.results, 1e-9));
//! ```
//!
//! ## Full harness run
//!
//! ```no_run
//! use rowbench_core::{load, Harness, HarnessConfig};
//!
//! let matrix = load("big_data.csv").unwrap();
//! let report = Harness::new(HarnessConfig::default()).run_all(&matrix).unwrap();
//! for timing in &report.timings {
//!     println!("{}: {:.2} ms", timing.strategy, timing.elapsed_ms);
//! }
//! assert!(report.all_equivalent());
//! ```
//!
//! # Generating input
//!
//! [`generate_dataset`] writes a random `rows x columns` table in the format
//! [`load`] reads.

pub mod compare;
pub mod error;
pub mod generator;
pub mod harness;
pub mod loader;
pub mod matrix;
pub mod ops;
pub mod strategy;

pub use compare::{compare, compare_detailed, values_close, ComparisonReport, DEFAULT_TOLERANCE};
pub use error::{HarnessError, ParseError, Result};
pub use generator::{
    generate_dataset, generate_matrix, write_csv, write_csv_to, GenerateSummary, GeneratorConfig,
};
pub use harness::{
    Harness, HarnessConfig, HarnessReport, StrategyComparison, StrategyTiming, DEFAULT_SAMPLE_SIZE,
};
pub use loader::{load, load_from_reader, load_with_config, LoadConfig, DEFAULT_MAX_ROWS};
pub use matrix::Matrix;
pub use ops::{row_mean, MeanOp, RowError, RowOp, DEFAULT_ROW_DELAY};
pub use strategy::parallel::{available_workers, run_parallel, run_parallel_with, WorkerLimits};
pub use strategy::serial::{run_serial, run_serial_with};
pub use strategy::vectorized::run_vectorized;
pub use strategy::{ResultSequence, Strategy, StrategyRun};
