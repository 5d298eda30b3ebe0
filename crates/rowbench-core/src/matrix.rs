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

//! The in-memory numeric table shared read-only by every strategy.

use crate::error::ParseError;
use ndarray::iter::AxisIter;
use ndarray::{Array2, ArrayView1, ArrayView2, Axis, Ix1};

/// An immutable, rectangular table of `f64` values with named columns.
///
/// Every row has exactly [`ncols`](Matrix::ncols) values. A matrix with at
/// least one row always has at least one column. Values are stored row-major
/// so a row is a contiguous lane.
///
/// # Examples
///
/// ```
/// use rowbench_core::Matrix;
///
/// let matrix = Matrix::from_rows(
///     vec!["a".to_string(), "b".to_string()],
///     vec![vec![1.0, 3.0], vec![2.0, 2.0]],
/// )
/// .unwrap();
///
/// assert_eq!(matrix.nrows(), 2);
/// assert_eq!(matrix.ncols(), 2);
/// assert_eq!(matrix.row(0).to_vec(), vec![1.0, 3.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    columns: Vec<String>,
    data: Array2<f64>,
}

impl Matrix {
    /// Wrap an array, checking it against the column names.
    pub fn new(columns: Vec<String>, data: Array2<f64>) -> Result<Self, ParseError> {
        if data.ncols() != columns.len() {
            return Err(ParseError::Shape(format!(
                "{} column names for {} columns of data",
                columns.len(),
                data.ncols()
            )));
        }
        if columns.is_empty() && data.nrows() > 0 {
            return Err(ParseError::Shape(format!(
                "{} rows with no columns",
                data.nrows()
            )));
        }
        // Row access hands out contiguous lanes, so force standard layout.
        let data = if data.is_standard_layout() {
            data
        } else {
            data.as_standard_layout().into_owned()
        };
        Ok(Self { columns, data })
    }

    /// Build a matrix from row-major values; the row count is inferred.
    pub fn from_flat(columns: Vec<String>, values: Vec<f64>) -> Result<Self, ParseError> {
        let width = columns.len();
        if width == 0 {
            if values.is_empty() {
                return Ok(Self::empty(columns));
            }
            return Err(ParseError::Shape(format!(
                "{} values with no columns",
                values.len()
            )));
        }
        if values.len() % width != 0 {
            return Err(ParseError::Shape(format!(
                "{} values do not fill rows of {} columns",
                values.len(),
                width
            )));
        }
        let rows = values.len() / width;
        let data = Array2::from_shape_vec((rows, width), values)
            .map_err(|e| ParseError::Shape(e.to_string()))?;
        Ok(Self { columns, data })
    }

    /// Build a matrix from individual rows.
    ///
    /// Fails with [`ParseError::WidthMismatch`] on the first row whose
    /// length differs from the number of columns.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self, ParseError> {
        let width = columns.len();
        let mut values = Vec::with_capacity(rows.len() * width);
        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(ParseError::WidthMismatch {
                    row: index + 1,
                    expected: width,
                    actual: row.len(),
                });
            }
            values.extend(row);
        }
        Self::from_flat(columns, values)
    }

    /// A matrix with the given columns and no rows.
    pub fn empty(columns: Vec<String>) -> Self {
        let width = columns.len();
        Self {
            columns,
            data: Array2::zeros((0, width)),
        }
    }

    /// Number of rows.
    pub fn nrows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns.
    pub fn ncols(&self) -> usize {
        self.data.ncols()
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }

    /// True when the matrix has no rows.
    pub fn is_empty(&self) -> bool {
        self.nrows() == 0
    }

    /// Column names, in header order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Read-only view of the whole table.
    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    /// View of row `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.nrows()`.
    pub fn row(&self, index: usize) -> ArrayView1<'_, f64> {
        self.data.row(index)
    }

    /// View of row `index`, or `None` when out of range.
    pub fn get_row(&self, index: usize) -> Option<ArrayView1<'_, f64>> {
        (index < self.nrows()).then(|| self.data.row(index))
    }

    /// Iterate rows in index order.
    pub fn rows(&self) -> AxisIter<'_, f64, Ix1> {
        self.data.axis_iter(Axis(0))
    }

    /// Approximate heap size of the values in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.data.len() * std::mem::size_of::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("col{}", i)).collect()
    }

    #[test]
    fn test_from_rows_shape() {
        let m = Matrix::from_rows(names(2), vec![vec![1.0, 3.0], vec![2.0, 2.0], vec![4.0, 4.0]])
            .unwrap();
        assert_eq!(m.shape(), (3, 2));
        assert_eq!(m.columns(), &["col1".to_string(), "col2".to_string()]);
        assert_eq!(m.row(2).to_vec(), vec![4.0, 4.0]);
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let err = Matrix::from_rows(names(2), vec![vec![1.0, 3.0], vec![2.0]]).unwrap_err();
        assert_eq!(
            err,
            ParseError::WidthMismatch {
                row: 2,
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_from_flat_rejects_partial_row() {
        let err = Matrix::from_flat(names(3), vec![1.0, 2.0, 3.0, 4.0]).unwrap_err();
        assert!(matches!(err, ParseError::Shape(_)));
    }

    #[test]
    fn test_no_columns_only_when_empty() {
        assert!(Matrix::from_flat(Vec::new(), Vec::new()).unwrap().is_empty());
        assert!(Matrix::from_flat(Vec::new(), vec![1.0]).is_err());
        assert!(Matrix::new(Vec::new(), Array2::zeros((2, 0))).is_err());
    }

    #[test]
    fn test_new_checks_column_names() {
        let err = Matrix::new(names(1), Array2::zeros((2, 2))).unwrap_err();
        assert!(err.to_string().contains("1 column names for 2 columns"));
    }

    #[test]
    fn test_new_normalises_layout() {
        let transposed = Array2::from_shape_vec((2, 3), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
            .unwrap()
            .reversed_axes();
        let m = Matrix::new(names(2), transposed).unwrap();
        assert_eq!(m.row(0).to_vec(), vec![1.0, 4.0]);
        assert!(m.view().is_standard_layout());
    }

    #[test]
    fn test_get_row_out_of_range() {
        let m = Matrix::empty(names(4));
        assert_eq!(m.shape(), (0, 4));
        assert!(m.get_row(0).is_none());
        assert_eq!(m.rows().count(), 0);
    }

    #[test]
    fn test_memory_bytes() {
        let m = Matrix::from_flat(names(2), vec![0.0; 8]).unwrap();
        assert_eq!(m.memory_bytes(), 64);
    }
}
