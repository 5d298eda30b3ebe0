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

//! Vectorized strategy: one bulk mean over the column axis.

use super::{Strategy, StrategyRun};
use crate::matrix::Matrix;
use ndarray::Axis;
use std::time::Instant;
use tracing::debug;

/// Compute every row's mean with a single array operation.
///
/// A matrix with no rows yields an empty sequence.
///
/// # Examples
///
/// ```
/// use rowbench_core::{run_vectorized, Matrix};
///
/// let m = Matrix::from_rows(
///     vec!["a".into(), "b".into()],
///     vec![vec![1.0, 3.0], vec![2.0, 2.0], vec![4.0, 4.0]],
/// )
/// .unwrap();
/// assert_eq!(run_vectorized(&m).results, vec![2.0, 2.0, 4.0]);
/// ```
pub fn run_vectorized(matrix: &Matrix) -> StrategyRun {
    let start = Instant::now();
    // `mean_axis` is None only for a zero-width axis, i.e. a matrix with no columns and no rows.
    let results = matrix
        .view()
        .mean_axis(Axis(1))
        .map(|means| means.to_vec())
        .unwrap_or_default();
    let elapsed = start.elapsed();
    debug!(rows = results.len(), ?elapsed, "vectorized run finished");

    StrategyRun {
        strategy: Strategy::Vectorized,
        results,
        elapsed,
        workers: 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vectorized_means() {
        let m = Matrix::from_rows(
            vec!["a".into(), "b".into(), "c".into()],
            vec![vec![1.0, 2.0, 3.0], vec![-1.0, 0.0, 1.0]],
        )
        .unwrap();
        let run = run_vectorized(&m);
        assert_eq!(run.strategy, Strategy::Vectorized);
        assert_eq!(run.results, vec![2.0, 0.0]);
    }

    #[test]
    fn test_vectorized_empty_rows() {
        let run = run_vectorized(&Matrix::empty(vec!["a".into(), "b".into()]));
        assert!(run.is_empty());
    }

    #[test]
    fn test_vectorized_no_columns() {
        let run = run_vectorized(&Matrix::empty(Vec::new()));
        assert!(run.is_empty());
    }
}
