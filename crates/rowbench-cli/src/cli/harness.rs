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

//! Strategy commands.

use crate::commands;
use crate::error::Result;
use clap::{Args, Subcommand};
use rowbench_core::Strategy;
use std::path::PathBuf;

/// Options shared by every strategy command.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Simulated cost per row in microseconds (serial and parallel only)
    #[arg(long, value_name = "US", default_value_t = 10)]
    pub delay_us: u64,

    /// Number of leading results to print
    #[arg(long, value_name = "N", default_value_t = 5)]
    pub sample: usize,

    /// Field delimiter of the input file
    #[arg(short, long, default_value_t = ',')]
    pub delimiter: char,
}

/// Strategy commands.
///
/// Each command loads the input once, then times one or all strategies.
#[derive(Subcommand)]
pub enum HarnessCommands {
    /// Compute row means with a single-threaded loop
    Serial {
        /// Input file path
        #[arg(value_name = "FILE", default_value = "big_data.csv")]
        file: PathBuf,

        #[command(flatten)]
        args: RunArgs,
    },

    /// Compute row means on a worker pool
    ///
    /// The pool size is clamped to the hardware parallelism minus one,
    /// with a ceiling of six workers.
    Parallel {
        /// Input file path
        #[arg(value_name = "FILE", default_value = "big_data.csv")]
        file: PathBuf,

        /// Requested worker count (0 = largest allowed)
        #[arg(short, long, default_value_t = 0)]
        workers: usize,

        #[command(flatten)]
        args: RunArgs,
    },

    /// Compute row means with one bulk array operation
    Vectorized {
        /// Input file path
        #[arg(value_name = "FILE", default_value = "big_data.csv")]
        file: PathBuf,

        #[command(flatten)]
        args: RunArgs,
    },

    /// Run every strategy, compare timings, and check the results agree
    ///
    /// Exits with a failure status if any strategy disagrees with the
    /// serial baseline.
    Compare {
        /// Input file path
        #[arg(value_name = "FILE", default_value = "big_data.csv")]
        file: PathBuf,

        /// Requested worker count for the parallel strategy (0 = largest allowed)
        #[arg(short, long, default_value_t = 0)]
        workers: usize,

        /// Tolerance when checking that strategies agree
        #[arg(long, default_value_t = 1e-9)]
        tolerance: f64,

        #[command(flatten)]
        args: RunArgs,

        /// Also write the full report as JSON to this path
        #[arg(long, value_name = "PATH")]
        json: Option<PathBuf>,
    },
}

impl HarnessCommands {
    /// Execute the strategy command.
    pub fn execute(self) -> Result<()> {
        match self {
            HarnessCommands::Serial { file, args } => {
                commands::run_strategy(&file, Strategy::Serial, 0, &args)
            }
            HarnessCommands::Parallel {
                file,
                workers,
                args,
            } => commands::run_strategy(&file, Strategy::Parallel, workers, &args),
            HarnessCommands::Vectorized { file, args } => {
                commands::run_strategy(&file, Strategy::Vectorized, 0, &args)
            }
            HarnessCommands::Compare {
                file,
                workers,
                tolerance,
                args,
                json,
            } => commands::compare(&file, workers, tolerance, &args, json.as_deref()),
        }
    }
}
