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

//! Compare command - run every strategy and check they agree

use super::report::{print_report, print_run, print_shape};
use super::{harness_config, load_input};
use crate::cli::RunArgs;
use crate::error::{CliError, Result, Stage};
use rowbench_core::{Harness, Strategy};
use std::fs;
use std::path::Path;

/// Run serial, parallel and vectorized over `file` and compare them.
///
/// Serial is the baseline for speedups and equivalence. When `json` is
/// given, the full report is written there as pretty-printed JSON before
/// the equivalence verdict is applied.
///
/// # Errors
///
/// Returns the first stage failure, or [`CliError::Mismatch`] when a
/// strategy disagrees with the serial baseline.
pub fn compare(
    file: &Path,
    workers: usize,
    tolerance: f64,
    args: &RunArgs,
    json: Option<&Path>,
) -> Result<()> {
    let config = harness_config(args, workers).with_tolerance(tolerance);
    config
        .validate()
        .map_err(|e| CliError::stage(Stage::Compare, e))?;

    let matrix = load_input(file, args.delimiter)?;
    print_shape(&matrix);

    let harness = Harness::new(config);
    let mut runs = Vec::with_capacity(Strategy::ALL.len());
    for strategy in Strategy::ALL {
        let run = harness
            .run(&matrix, strategy)
            .map_err(|e| CliError::stage(Stage::for_strategy(strategy), e))?;
        print_run(&run, args.sample);
        runs.push(run);
    }

    let report = harness.report(&matrix, &runs);
    print_report(&report);

    if let Some(path) = json {
        let text = serde_json::to_string_pretty(&report)?;
        fs::write(path, text).map_err(|e| CliError::io_error(path, e))?;
        println!("Report written to {}", path.display());
    }

    match report.comparisons.iter().find(|c| !c.equivalent) {
        Some(cmp) => Err(CliError::Mismatch {
            baseline: cmp.baseline,
            candidate: cmp.candidate,
            index: cmp.first_mismatch.unwrap_or(0),
            max_abs_diff: cmp.max_abs_diff,
        }),
        None => Ok(()),
    }
}
