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

//! Generate command - write a random dataset

use crate::error::{CliError, Result, Stage};
use colored::Colorize;
use rowbench_core::{generate_dataset, GeneratorConfig};
use std::path::Path;

/// Generate a `rows x cols` dataset of uniform values and save it.
pub fn generate(rows: usize, cols: usize, output: &Path, seed: Option<u64>) -> Result<()> {
    let mut config = GeneratorConfig::default()
        .with_shape(rows, cols)
        .with_output(output);
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }

    println!("Generating random dataset...");
    let summary = generate_dataset(&config).map_err(|e| CliError::stage(Stage::Generate, e))?;

    println!(
        "{} Dataset saved to {}",
        "✓".green().bold(),
        summary.path.display()
    );
    println!("  Shape: ({}, {})", summary.rows, summary.columns);
    println!(
        "  Memory usage: {:.2} MB",
        summary.memory_bytes as f64 / 1024.0 / 1024.0
    );
    println!("  File size: {} bytes", summary.bytes_written);
    Ok(())
}
