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

//! CLI command implementations

mod compare;
mod completion;
mod generate;
mod report;
mod run;
mod store;

pub use compare::compare;
pub use completion::{generate_completion, installation_instructions};
pub use generate::generate;
pub use run::run_strategy;
pub use store::store;

use crate::cli::RunArgs;
use crate::error::{CliError, Result, Stage};
use rowbench_core::{load_with_config, HarnessConfig, LoadConfig, Matrix};
use std::path::Path;
use std::time::Duration;

/// Convert a delimiter argument to the byte the loader expects.
pub(crate) fn delimiter_byte(delimiter: char) -> Result<u8> {
    if delimiter.is_ascii() {
        Ok(delimiter as u8)
    } else {
        Err(CliError::invalid_input(format!(
            "delimiter must be a single ASCII character, got '{}'",
            delimiter
        )))
    }
}

/// Load the input file, reporting failures as the load stage.
pub(crate) fn load_input(file: &Path, delimiter: char) -> Result<Matrix> {
    let config = LoadConfig::default().with_delimiter(delimiter_byte(delimiter)?);
    load_with_config(file, &config).map_err(|e| CliError::stage(Stage::Load, e))
}

/// Harness configuration from command-line options.
pub(crate) fn harness_config(args: &RunArgs, workers: usize) -> HarnessConfig {
    HarnessConfig::default()
        .with_per_row_delay(Duration::from_micros(args.delay_us))
        .with_workers(workers)
        .with_sample_size(args.sample)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delimiter_byte() {
        assert_eq!(delimiter_byte(',').unwrap(), b',');
        assert_eq!(delimiter_byte('\t').unwrap(), b'\t');
        assert!(delimiter_byte('é').is_err());
    }

    #[test]
    fn test_load_input_missing_file_is_load_stage() {
        let err = load_input(Path::new("definitely/not/here.csv"), ',').unwrap_err();
        assert!(err.to_string().starts_with("load failed: "));
    }

    #[test]
    fn test_harness_config_from_args() {
        let args = RunArgs {
            delay_us: 0,
            sample: 3,
            delimiter: ',',
        };
        let config = harness_config(&args, 4);
        assert_eq!(config.per_row_delay, Duration::ZERO);
        assert_eq!(config.workers, 4);
        assert_eq!(config.sample_size, 3);
        assert_eq!(config.tolerance, rowbench_core::DEFAULT_TOLERANCE);
    }
}
