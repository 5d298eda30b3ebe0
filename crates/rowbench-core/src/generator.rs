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

//! Synthetic dataset generation.
//!
//! Produces a matrix of uniform random values in `[0, 1)` with columns named
//! `col1..colN` and writes it as comma-separated text with a header line and
//! no index column.

use crate::error::{HarnessError, Result};
use crate::matrix::Matrix;
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Default number of generated rows.
pub const DEFAULT_ROWS: usize = 1_000_000;

/// Default number of generated columns.
pub const DEFAULT_COLUMNS: usize = 10;

/// Default output file.
pub const DEFAULT_OUTPUT: &str = "big_data.csv";

/// Largest row count the generator accepts.
pub const MAX_GENERATED_ROWS: usize = 50_000_000;

/// Dataset generation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub columns: usize,
    /// Destination file.
    pub output: PathBuf,
    /// Seed for reproducible output; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            output: PathBuf::from(DEFAULT_OUTPUT),
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Sets the shape.
    pub fn with_shape(mut self, rows: usize, columns: usize) -> Self {
        self.rows = rows;
        self.columns = columns;
        self
    }

    /// Sets the output path.
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    /// Sets the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the shape against generator limits.
    pub fn validate(&self) -> Result<()> {
        validate_shape(self.rows, self.columns)
    }
}

/// What [`generate_dataset`] produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateSummary {
    /// Rows written.
    pub rows: usize,
    /// Columns written.
    pub columns: usize,
    /// File written.
    pub path: PathBuf,
    /// Size of the file on disk.
    pub bytes_written: u64,
    /// Size of the values in memory.
    pub memory_bytes: usize,
}

fn validate_shape(rows: usize, columns: usize) -> Result<()> {
    if rows == 0 {
        return Err(HarnessError::invalid_config("rows", "must be at least 1"));
    }
    if rows > MAX_GENERATED_ROWS {
        return Err(HarnessError::invalid_config(
            "rows",
            format!("{} exceeds maximum of {}", rows, MAX_GENERATED_ROWS),
        ));
    }
    if columns == 0 {
        return Err(HarnessError::invalid_config("columns", "must be at least 1"));
    }
    Ok(())
}

/// Column names `col1..colN`.
pub fn column_names(columns: usize) -> Vec<String> {
    (1..=columns).map(|i| format!("col{}", i)).collect()
}

/// Generate a `rows x columns` matrix of uniform values in `[0, 1)`.
///
/// # Examples
///
/// ```
/// use rowbench_core::generate_matrix;
///
/// let a = generate_matrix(100, 4, Some(7)).unwrap();
/// let b = generate_matrix(100, 4, Some(7)).unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.columns()[3], "col4");
/// ```
pub fn generate_matrix(rows: usize, columns: usize, seed: Option<u64>) -> Result<Matrix> {
    validate_shape(rows, columns)?;
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let data = Array2::from_shape_fn((rows, columns), |_| rng.gen::<f64>());
    Ok(Matrix::new(column_names(columns), data)?)
}

/// Write a matrix as delimited text: header, then one line per row.
pub fn write_csv_to<W: Write>(matrix: &Matrix, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(matrix.columns())?;
    for row in matrix.rows() {
        wtr.write_record(row.iter().map(|v| v.to_string()))?;
    }
    wtr.flush().map_err(|e| HarnessError::CsvWrite(e.to_string()))?;
    Ok(())
}

/// Write a matrix to a file.
pub fn write_csv(matrix: &Matrix, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| HarnessError::io_error(path, e))?;
    write_csv_to(matrix, BufWriter::new(file))
}

/// Generate a dataset and write it to `config.output`.
pub fn generate_dataset(config: &GeneratorConfig) -> Result<GenerateSummary> {
    config.validate()?;
    info!(rows = config.rows, columns = config.columns, "generating random dataset");
    let matrix = generate_matrix(config.rows, config.columns, config.seed)?;

    info!(path = %config.output.display(), "saving dataset");
    write_csv(&matrix, &config.output)?;

    let bytes_written = fs::metadata(&config.output)
        .map_err(|e| HarnessError::io_error(&config.output, e))?
        .len();

    Ok(GenerateSummary {
        rows: matrix.nrows(),
        columns: matrix.ncols(),
        path: config.output.clone(),
        bytes_written,
        memory_bytes: matrix.memory_bytes(),
    })
}
