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

//! Dataset and database commands.

use crate::commands;
use crate::error::Result;
use clap::Subcommand;
use rowbench_core::generator::{DEFAULT_COLUMNS, DEFAULT_OUTPUT, DEFAULT_ROWS};
use rowbench_store::{DEFAULT_CHUNK_SIZE, DEFAULT_DATABASE, DEFAULT_TABLE};
use std::path::PathBuf;

/// Dataset and database commands.
#[derive(Subcommand)]
pub enum DataCommands {
    /// Generate a random dataset of values in [0, 1)
    ///
    /// Columns are named col1..colN and the file has a header line and no
    /// index column.
    Generate {
        /// Number of rows
        #[arg(long, default_value_t = DEFAULT_ROWS)]
        rows: usize,

        /// Number of columns
        #[arg(long, default_value_t = DEFAULT_COLUMNS)]
        cols: usize,

        /// Output file path
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Write a dataset to a SQLite table and read it back
    ///
    /// Any existing table of the same name is replaced.
    Store {
        /// Input file path
        #[arg(value_name = "FILE", default_value = "parallel_big_data.csv")]
        file: PathBuf,

        /// Database file
        #[arg(long, default_value = DEFAULT_DATABASE)]
        database: PathBuf,

        /// Table name
        #[arg(long, default_value = DEFAULT_TABLE)]
        table: String,

        /// Rows per INSERT statement
        #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,

        /// Field delimiter of the input file
        #[arg(short, long, default_value_t = ',')]
        delimiter: char,

        /// Number of leading rows to print after reading back
        #[arg(long, value_name = "N", default_value_t = 5)]
        sample: usize,
    },
}

impl DataCommands {
    /// Execute the data command.
    pub fn execute(self) -> Result<()> {
        match self {
            DataCommands::Generate {
                rows,
                cols,
                output,
                seed,
            } => commands::generate(rows, cols, &output, seed),
            DataCommands::Store {
                file,
                database,
                table,
                chunk_size,
                delimiter,
                sample,
            } => commands::store(&file, &database, &table, chunk_size, delimiter, sample),
        }
    }
}
