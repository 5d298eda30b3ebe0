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

//! Relational round trip for rowbench matrices.
//!
//! Writes a [`Matrix`](rowbench_core::Matrix) into a SQLite table, replacing
//! any previous table of the same name, and reads it back unchanged. All
//! connection state lives in a [`Store`] opened from an explicit
//! [`StoreConfig`].
//!
//! ```no_run
//! use rowbench_core::load;
//! use rowbench_store::{roundtrip, StoreConfig};
//!
//! let matrix = load("parallel_big_data.csv").unwrap();
//! let trip = roundtrip(&StoreConfig::new("bench.sqlite"), &matrix).unwrap();
//! println!("Data written: {} rows", trip.rows_written);
//! ```

pub mod error;
pub mod store;

pub use error::{Result, RoundTripError, RoundTripStep, StoreError};
pub use store::{
    roundtrip, RoundTrip, Store, StoreConfig, DEFAULT_CHUNK_SIZE, DEFAULT_DATABASE, DEFAULT_TABLE,
};
