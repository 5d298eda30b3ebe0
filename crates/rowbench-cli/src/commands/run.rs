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

//! Single strategy command - load, run one strategy, print timing

use super::report::{print_run, print_shape};
use super::{harness_config, load_input};
use crate::cli::RunArgs;
use crate::error::{CliError, Result, Stage};
use rowbench_core::{Harness, Strategy};
use std::path::Path;

/// Load `file` and run one strategy over it.
///
/// # Errors
///
/// Returns a load stage error for unreadable or malformed input, and the
/// strategy's own stage error if the run fails.
///
/// # Examples
///
/// ```no_run
/// use rowbench_cli::cli::RunArgs;
/// use rowbench_cli::commands::run_strategy;
/// use rowbench_core::Strategy;
/// use std::path::Path;
///
/// let args = RunArgs { delay_us: 10, sample: 5, delimiter: ',' };
/// run_strategy(Path::new("big_data.csv"), Strategy::Parallel, 0, &args).unwrap();
/// ```
pub fn run_strategy(file: &Path, strategy: Strategy, workers: usize, args: &RunArgs) -> Result<()> {
    let matrix = load_input(file, args.delimiter)?;
    print_shape(&matrix);

    let harness = Harness::new(harness_config(args, workers));
    let run = harness
        .run(&matrix, strategy)
        .map_err(|e| CliError::stage(Stage::for_strategy(strategy), e))?;

    print_run(&run, args.sample);
    Ok(())
}
