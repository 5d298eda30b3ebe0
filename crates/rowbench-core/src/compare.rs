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

//! Numerical equivalence between result sequences.
//!
//! Two sequences are equivalent when they have the same length and every
//! pair of values is within `tolerance`, scaled by the larger magnitude once
//! that exceeds 1. NaN matches NaN and equal infinities match.

use serde::{Deserialize, Serialize};

/// Default tolerance for cross-strategy comparisons.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Detailed outcome of comparing two sequences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// Whether the sequences are equivalent.
    pub equivalent: bool,
    /// Length of the first sequence.
    pub len_a: usize,
    /// Length of the second sequence.
    pub len_b: usize,
    /// Largest absolute difference over the common prefix.
    pub max_abs_diff: f64,
    /// Index of the first value pair outside the tolerance.
    pub first_mismatch: Option<usize>,
}

/// Whether two values agree within `tolerance`.
pub fn values_close(a: f64, b: f64, tolerance: f64) -> bool {
    if a == b || (a.is_nan() && b.is_nan()) {
        return true;
    }
    // Unequal infinities, or an infinity against a finite value.
    if a.is_infinite() || b.is_infinite() {
        return false;
    }
    let scale = 1f64.max(a.abs()).max(b.abs());
    (a - b).abs() <= tolerance * scale
}

/// Check element-wise equivalence of two result sequences.
///
/// # Examples
///
/// ```
/// use rowbench_core::compare;
///
/// assert!(compare(&[2.0, 2.0, 4.0], &[2.0, 2.0 + 1e-12, 4.0], 1e-9));
/// assert!(!compare(&[2.0, 2.0], &[2.0, 2.1], 1e-9));
/// assert!(!compare(&[2.0], &[2.0, 2.0], 1e-9));
/// ```
pub fn compare(results_a: &[f64], results_b: &[f64], tolerance: f64) -> bool {
    results_a.len() == results_b.len()
        && results_a
            .iter()
            .zip(results_b)
            .all(|(&a, &b)| values_close(a, b, tolerance))
}

/// Compare two sequences and describe where they diverge.
pub fn compare_detailed(results_a: &[f64], results_b: &[f64], tolerance: f64) -> ComparisonReport {
    let mut max_abs_diff = 0.0f64;
    let mut first_mismatch = None;

    for (index, (&a, &b)) in results_a.iter().zip(results_b).enumerate() {
        if !values_close(a, b, tolerance) && first_mismatch.is_none() {
            first_mismatch = Some(index);
        }
        let diff = (a - b).abs();
        if diff.is_finite() {
            max_abs_diff = max_abs_diff.max(diff);
        }
    }

    let same_len = results_a.len() == results_b.len();
    if !same_len && first_mismatch.is_none() {
        first_mismatch = Some(results_a.len().min(results_b.len()));
    }

    ComparisonReport {
        equivalent: same_len && first_mismatch.is_none(),
        len_a: results_a.len(),
        len_b: results_b.len(),
        max_abs_diff,
        first_mismatch,
    }
}
