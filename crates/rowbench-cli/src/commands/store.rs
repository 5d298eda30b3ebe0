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

//! Store command - database round trip of a dataset

use super::load_input;
use super::report::format_sample;
use crate::error::Result;
use colored::Colorize;
use rowbench_store::{roundtrip, StoreConfig};
use std::path::Path;

/// Load `file`, write it to `table` in `database`, and read it back.
///
/// Prints the row counts, the leading rows read back, and the column types
/// before and after the trip through the database.
///
/// # Errors
///
/// Failures are reported per stage: load, connect, store write or store
/// read.
pub fn store(
    file: &Path,
    database: &Path,
    table: &str,
    chunk_size: usize,
    delimiter: char,
    sample: usize,
) -> Result<()> {
    let matrix = load_input(file, delimiter)?;
    println!("Data to write: {} rows", matrix.nrows());

    let config = StoreConfig::new(database)
        .with_table(table)
        .with_chunk_size(chunk_size);
    let trip = roundtrip(&config, &matrix)?;

    println!(
        "{} Data written to table '{}' ({} rows, {:.4} seconds)",
        "✓".green().bold(),
        table,
        trip.rows_written,
        trip.write_elapsed.as_secs_f64()
    );
    println!(
        "{} Data read from table '{}' ({} rows, {:.4} seconds)",
        "✓".green().bold(),
        table,
        trip.matrix.nrows(),
        trip.read_elapsed.as_secs_f64()
    );

    let read_back = &trip.matrix;
    println!("First {} rows:", sample.min(read_back.nrows()));
    println!("  {}", read_back.columns().join(", "));
    for row in read_back.rows().take(sample) {
        println!("  {}", format_sample(&row.to_vec(), usize::MAX));
    }

    println!("Column types:");
    println!("  {:<16} {:<10} {}", "column", "original", "stored");
    for (name, stored) in &trip.column_types {
        println!("  {:<16} {:<10} {}", name, "f64", stored);
    }
    Ok(())
}
