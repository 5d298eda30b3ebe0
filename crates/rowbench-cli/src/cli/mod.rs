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

//! CLI command definitions and argument parsing.
//!
//! Commands are grouped by category:
//!
//! - [`harness`]: strategy runs (serial, parallel, vectorized, compare)
//! - [`data`]: dataset generation and the database round trip (generate, store)
//! - [`utility`]: utility commands (completion)

mod data;
mod harness;
mod utility;

use crate::error::Result;
use clap::{Parser, Subcommand};

pub use data::DataCommands;
pub use harness::{HarnessCommands, RunArgs};
pub use utility::UtilityCommands;

/// rowbench - row aggregation benchmark harness
///
/// Computes the mean of every row of a numeric table serially, on a worker
/// pool, and as one bulk array operation, then compares the timings and
/// checks that the results agree.
///
/// # Examples
///
/// ```bash
/// # Create a 1,000,000 x 10 dataset
/// rowbench generate
///
/// # Run every strategy and compare
/// rowbench compare big_data.csv --json report.json
///
/// # Round trip through SQLite
/// rowbench store parallel_big_data.csv --database bench.sqlite
/// ```
#[derive(Parser)]
#[command(name = "rowbench")]
#[command(author, version, about = "rowbench - row aggregation benchmark harness", long_about = None)]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
///
/// ```text
/// Commands
/// ├── Harness (serial, parallel, vectorized, compare)
/// ├── Data (generate, store)
/// └── Utility (completion)
/// ```
#[derive(Subcommand)]
pub enum Commands {
    // Strategy commands - flattened to appear at top level
    #[command(flatten)]
    Harness(HarnessCommands),

    // Data commands - flattened to appear at top level
    #[command(flatten)]
    Data(DataCommands),

    // Utility commands - flattened to appear at top level
    #[command(flatten)]
    Utility(UtilityCommands),
}

impl Commands {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns the first stage failure, or a mismatch when `compare` finds
    /// strategies that disagree.
    pub fn execute(self) -> Result<()> {
        match self {
            Commands::Harness(cmd) => cmd.execute(),
            Commands::Data(cmd) => cmd.execute(),
            Commands::Utility(cmd) => cmd.execute(),
        }
    }
}
