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

//! Console output shared by the commands.

use colored::Colorize;
use rowbench_core::{HarnessReport, Matrix, StrategyRun};

/// Format a row sample the way it is printed, e.g. `[2.0, 2.0, 4.0]`.
pub(crate) fn format_sample(values: &[f64], limit: usize) -> String {
    let shown: Vec<String> = values.iter().take(limit).map(|v| format!("{:?}", v)).collect();
    format!("[{}]", shown.join(", "))
}

pub(crate) fn print_shape(matrix: &Matrix) {
    println!("Dataset shape: ({}, {})", matrix.nrows(), matrix.ncols());
}

/// Print one strategy's timing and leading results.
pub(crate) fn print_run(run: &StrategyRun, sample: usize) {
    println!("{}", run.strategy.description().bold());
    println!(
        "  {} execution time: {:.4} seconds",
        run.strategy,
        run.elapsed.as_secs_f64()
    );
    if run.workers > 1 {
        println!("  Workers: {}", run.workers);
    }
    println!(
        "  First {} results: {}",
        sample.min(run.len()),
        format_sample(&run.results, sample)
    );
}

/// Print the comparison table and equivalence verdicts.
pub(crate) fn print_report(report: &HarnessReport) {
    println!();
    println!("{}", "Timing summary:".bright_blue().bold());
    println!(
        "  {:<12} {:>12} {:>8} {:>10}",
        "Strategy", "Time (ms)", "Workers", "Speedup"
    );
    for timing in &report.timings {
        let speedup = timing
            .speedup_vs_serial
            .map(|s| format!("{:.2}x", s))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<12} {:>12.3} {:>8} {:>10}",
            timing.strategy.as_str(),
            timing.elapsed_ms,
            timing.workers,
            speedup
        );
    }
    if let Some(fastest) = report.fastest() {
        println!("  Fastest: {}", fastest);
    }

    println!();
    for cmp in &report.comparisons {
        if cmp.equivalent {
            println!(
                "{} {} matches {} (max abs diff {:e})",
                "✓".green().bold(),
                cmp.candidate,
                cmp.baseline,
                cmp.max_abs_diff
            );
        } else {
            println!(
                "{} {} differs from {} (max abs diff {:e})",
                "✗".red().bold(),
                cmp.candidate,
                cmp.baseline,
                cmp.max_abs_diff
            );
        }
    }
    println!("Results equivalent: {}", report.all_equivalent());
}
