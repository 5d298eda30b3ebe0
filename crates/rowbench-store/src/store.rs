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

//! SQLite-backed matrix store.

use crate::error::{Result, RoundTripError, RoundTripStep, StoreError};
use ndarray::Axis;
use rowbench_core::Matrix;
use rusqlite::{params_from_iter, Connection, OpenFlags};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Default table name.
pub const DEFAULT_TABLE: &str = "parallel_big_data";

/// Default number of rows per multi-row `INSERT`.
pub const DEFAULT_CHUNK_SIZE: usize = 10_000;

/// Default database file.
pub const DEFAULT_DATABASE: &str = "rowbench.sqlite";

/// Upper bound on bound parameters in one statement.
const MAX_BOUND_PARAMS: usize = 32_766;

const IN_MEMORY: &str = ":memory:";

/// Connection and table settings.
///
/// # Examples
///
/// ```
/// use rowbench_store::StoreConfig;
///
/// let config = StoreConfig::new("bench.sqlite").with_chunk_size(500);
/// assert_eq!(config.table, "parallel_big_data");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Database file, or `:memory:`.
    pub database: PathBuf,
    /// Table written and read.
    pub table: String,
    /// Rows per `INSERT` statement.
    pub chunk_size: usize,
    /// Create the database file when it does not exist.
    pub create: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATABASE)
    }
}

impl StoreConfig {
    /// Settings for a database file with default table and chunking.
    pub fn new(database: impl Into<PathBuf>) -> Self {
        Self {
            database: database.into(),
            table: DEFAULT_TABLE.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            create: true,
        }
    }

    /// Settings for a private in-memory database.
    pub fn in_memory() -> Self {
        Self::new(IN_MEMORY)
    }

    /// Sets the table name.
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Sets the rows per `INSERT`.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Controls whether a missing database file is created.
    pub fn with_create(mut self, create: bool) -> Self {
        self.create = create;
        self
    }

    /// Check the table name.
    pub fn validate(&self) -> Result<()> {
        if is_identifier(&self.table) {
            Ok(())
        } else {
            Err(StoreError::InvalidTableName(self.table.clone()))
        }
    }

    fn is_in_memory(&self) -> bool {
        self.database.as_os_str() == IN_MEMORY
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn insert_sql(table: &str, ncols: usize, rows: usize) -> String {
    let tuple = format!("({})", vec!["?"; ncols].join(", "));
    format!(
        "INSERT INTO {} VALUES {}",
        quote_ident(table),
        vec![tuple.as_str(); rows].join(", ")
    )
}

/// An open database holding one matrix table.
///
/// The connection is closed when the store is dropped.
pub struct Store {
    conn: Connection,
    config: StoreConfig,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").field("config", &self.config).finish()
    }
}

impl Store {
    /// Open the database and check that it answers.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        config.validate()?;
        debug!(database = %config.database.display(), "connecting");

        let conn = if config.is_in_memory() {
            Connection::open_in_memory()
        } else {
            let mut flags = OpenFlags::default();
            if !config.create {
                flags.remove(OpenFlags::SQLITE_OPEN_CREATE);
            }
            Connection::open_with_flags(&config.database, flags)
        }
        .map_err(|e| StoreError::connection(&config.database, e))?;

        // A file that is not a database only fails on first use.
        conn.query_row("SELECT count(*) FROM sqlite_master", [], |row| {
            row.get::<_, i64>(0)
        })
        .map_err(|e| StoreError::connection(&config.database, e))?;

        Ok(Self {
            conn,
            config: config.clone(),
        })
    }

    /// The configuration in use.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Replace the table with the contents of `matrix`.
    ///
    /// Returns the number of rows written. The drop, create and inserts run
    /// in one transaction.
    pub fn write_matrix(&mut self, matrix: &Matrix) -> Result<usize> {
        let table = self.config.table.clone();
        let ncols = matrix.ncols();
        if ncols == 0 {
            return Err(StoreError::EmptySchema(table));
        }
        let rows_per_stmt = self
            .config
            .chunk_size
            .max(1)
            .min(MAX_BOUND_PARAMS / ncols)
            .max(1);

        let tx = self.conn.transaction()?;
        tx.execute(&format!("DROP TABLE IF EXISTS {}", quote_ident(&table)), [])?;

        let column_defs: Vec<String> = matrix
            .columns()
            .iter()
            .map(|c| format!("{} REAL", quote_ident(c)))
            .collect();
        tx.execute(
            &format!("CREATE TABLE {} ({})", quote_ident(&table), column_defs.join(", ")),
            [],
        )?;

        let mut written = 0usize;
        for chunk in matrix.view().axis_chunks_iter(Axis(0), rows_per_stmt) {
            let rows = chunk.nrows();
            let mut stmt = tx.prepare_cached(&insert_sql(&table, ncols, rows))?;
            stmt.execute(params_from_iter(chunk.iter()))?;
            written += rows;
        }
        tx.commit()?;

        info!(table = %table, rows = written, columns = ncols, "wrote table");
        Ok(written)
    }

    /// Read the table back into a matrix, in insertion order.
    ///
    /// SQL `NULL` reads as NaN.
    pub fn read_matrix(&self) -> Result<Matrix> {
        let table = &self.config.table;
        if !self.table_exists()? {
            return Err(StoreError::TableNotFound(table.clone()));
        }

        let mut stmt = self
            .conn
            .prepare(&format!("SELECT * FROM {} ORDER BY rowid", quote_ident(table)))?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let ncols = columns.len();

        let mut values = Vec::new();
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            for i in 0..ncols {
                values.push(row.get::<_, Option<f64>>(i)?.unwrap_or(f64::NAN));
            }
        }

        let matrix = Matrix::from_flat(columns, values)?;
        info!(table = %table, rows = matrix.nrows(), columns = ncols, "read table");
        Ok(matrix)
    }

    /// Whether the configured table exists.
    pub fn table_exists(&self) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT count(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [&self.config.table],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Number of rows in the table.
    pub fn row_count(&self) -> Result<usize> {
        if !self.table_exists()? {
            return Err(StoreError::TableNotFound(self.config.table.clone()));
        }
        let count: i64 = self.conn.query_row(
            &format!("SELECT count(*) FROM {}", quote_ident(&self.config.table)),
            [],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// Declared column names and types of the table.
    pub fn column_types(&self) -> Result<Vec<(String, String)>> {
        if !self.table_exists()? {
            return Err(StoreError::TableNotFound(self.config.table.clone()));
        }
        let mut stmt = self.conn.prepare(&format!(
            "PRAGMA table_info({})",
            quote_ident(&self.config.table)
        ))?;
        let types = stmt
            .query_map([], |row| Ok((row.get::<_, String>(1)?, row.get::<_, String>(2)?)))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(types)
    }

    /// Close the connection, reporting any error.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| StoreError::Sql(e))
    }
}

/// Outcome of writing a matrix and reading it back.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundTrip {
    /// Rows written to the table.
    pub rows_written: usize,
    /// Matrix read back.
    pub matrix: Matrix,
    /// Declared column types of the table.
    pub column_types: Vec<(String, String)>,
    /// Time spent writing.
    pub write_elapsed: Duration,
    /// Time spent reading.
    pub read_elapsed: Duration,
}

/// Open the store, write `matrix`, read it back, and close.
///
/// # Errors
///
/// The returned [`RoundTripError`] names the step that failed.
///
/// # Examples
///
/// ```
/// use rowbench_core::Matrix;
/// use rowbench_store::{roundtrip, StoreConfig};
///
/// let m = Matrix::from_rows(vec!["a".into(), "b".into()], vec![vec![1.0, 2.0]]).unwrap();
/// let trip = roundtrip(&StoreConfig::in_memory(), &m).unwrap();
/// assert_eq!(trip.rows_written, 1);
/// assert_eq!(trip.matrix, m);
/// ```
pub fn roundtrip(
    config: &StoreConfig,
    matrix: &Matrix,
) -> std::result::Result<RoundTrip, RoundTripError> {
    let mut store = Store::open(config).map_err(RoundTripError::at(RoundTripStep::Connect))?;

    let start = Instant::now();
    let rows_written = store
        .write_matrix(matrix)
        .map_err(RoundTripError::at(RoundTripStep::Write))?;
    let write_elapsed = start.elapsed();

    let start = Instant::now();
    let (read_back, column_types) = store
        .read_matrix()
        .and_then(|m| Ok((m, store.column_types()?)))
        .map_err(RoundTripError::at(RoundTripStep::Read))?;
    let read_elapsed = start.elapsed();

    store.close().map_err(RoundTripError::at(RoundTripStep::Read))?;

    Ok(RoundTrip {
        rows_written,
        matrix: read_back,
        column_types,
        write_elapsed,
        read_elapsed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Matrix {
        Matrix::from_rows(
            vec!["col1".into(), "col2".into(), "col3".into()],
            vec![
                vec![0.5, 0.25, 0.125],
                vec![1.0, -2.0, 3.5],
                vec![1e-300, 1e300, 0.1],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_identifier_rules() {
        assert!(is_identifier("parallel_big_data"));
        assert!(is_identifier("_t1"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("1t"));
        assert!(!is_identifier("t; DROP TABLE x"));
        assert!(!is_identifier("t-1"));
    }

    #[test]
    fn test_quote_ident_escapes() {
        assert_eq!(quote_ident("a\"b"), "\"a\"\"b\"");
    }

    #[test]
    fn test_insert_sql_shape() {
        assert_eq!(
            insert_sql("t", 2, 2),
            "INSERT INTO \"t\" VALUES (?, ?), (?, ?)"
        );
    }

    #[test]
    fn test_write_then_read_exact() {
        let mut store = Store::open(&StoreConfig::in_memory()).unwrap();
        assert_eq!(store.write_matrix(&sample()).unwrap(), 3);
        assert_eq!(store.read_matrix().unwrap(), sample());
        assert_eq!(store.row_count().unwrap(), 3);
    }

    #[test]
    fn test_small_chunks_preserve_order() {
        let values: Vec<f64> = (0..1000).map(|i| i as f64).collect();
        let m = Matrix::from_flat(vec!["n".into(), "m".into()], values).unwrap();
        let config = StoreConfig::in_memory().with_chunk_size(7);

        let trip = roundtrip(&config, &m).unwrap();
        assert_eq!(trip.rows_written, 500);
        assert_eq!(trip.matrix, m);
    }

    #[test]
    fn test_zero_chunk_size_still_writes() {
        let config = StoreConfig::in_memory().with_chunk_size(0);
        let trip = roundtrip(&config, &sample()).unwrap();
        assert_eq!(trip.matrix, sample());
    }

    #[test]
    fn test_rewrite_replaces_table() {
        let mut store = Store::open(&StoreConfig::in_memory()).unwrap();
        store.write_matrix(&sample()).unwrap();

        let smaller = Matrix::from_rows(vec!["x".into()], vec![vec![9.0]]).unwrap();
        store.write_matrix(&smaller).unwrap();
        assert_eq!(store.read_matrix().unwrap(), smaller);
    }

    #[test]
    fn test_nan_reads_back_as_nan() {
        let m = Matrix::from_rows(vec!["a".into()], vec![vec![f64::NAN]]).unwrap();
        let trip = roundtrip(&StoreConfig::in_memory(), &m).unwrap();
        assert!(trip.matrix.row(0)[0].is_nan());
    }

    #[test]
    fn test_empty_matrix_creates_empty_table() {
        let m = Matrix::empty(vec!["a".into(), "b".into()]);
        let trip = roundtrip(&StoreConfig::in_memory(), &m).unwrap();
        assert_eq!(trip.rows_written, 0);
        assert_eq!(trip.matrix.shape(), (0, 2));
    }

    #[test]
    fn test_column_types_are_real() {
        let trip = roundtrip(&StoreConfig::in_memory(), &sample()).unwrap();
        assert_eq!(
            trip.column_types,
            vec![
                ("col1".to_string(), "REAL".to_string()),
                ("col2".to_string(), "REAL".to_string()),
                ("col3".to_string(), "REAL".to_string()),
            ]
        );
    }

    #[test]
    fn test_missing_table() {
        let store = Store::open(&StoreConfig::in_memory().with_table("absent")).unwrap();
        assert!(matches!(
            store.read_matrix(),
            Err(StoreError::TableNotFound(name)) if name == "absent"
        ));
        assert!(matches!(store.column_types(), Err(StoreError::TableNotFound(_))));
    }

    #[test]
    fn test_invalid_table_rejected_on_open() {
        let err = Store::open(&StoreConfig::in_memory().with_table("bad name")).unwrap_err();
        assert!(matches!(err, StoreError::InvalidTableName(_)));
    }

    #[test]
    fn test_roundtrip_reports_failing_step() {
        let err = roundtrip(&StoreConfig::in_memory().with_table("bad name"), &sample()).unwrap_err();
        assert_eq!(err.step, RoundTripStep::Connect);
        assert!(matches!(err.source, StoreError::InvalidTableName(_)));

        let no_columns = Matrix::empty(Vec::new());
        let err = roundtrip(&StoreConfig::in_memory(), &no_columns).unwrap_err();
        assert_eq!(err.step, RoundTripStep::Write);
        assert!(matches!(err.source, StoreError::EmptySchema(_)));
    }

    #[test]
    fn test_quoted_column_names() {
        let m = Matrix::from_rows(
            vec!["select".into(), "with space".into(), "q\"uote".into()],
            vec![vec![1.0, 2.0, 3.0]],
        )
        .unwrap();
        let trip = roundtrip(&StoreConfig::in_memory(), &m).unwrap();
        assert_eq!(trip.matrix, m);
    }
}
