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

//! rowbench CLI library for command-line parsing and execution.
//!
//! # Commands
//!
//! ## Strategies
//!
//! - **serial**: row means with a single-threaded loop
//! - **parallel**: row means on a clamped worker pool
//! - **vectorized**: row means as one bulk array operation
//! - **compare**: all three, with a timing table and an equivalence check
//!
//! ## Data
//!
//! - **generate**: write a random `rows x cols` dataset
//! - **store**: write a dataset to SQLite and read it back
//!
//! ## Utilities
//!
//! - **completion**: shell completion scripts (bash, zsh, fish, powershell, elvish)
//!
//! # Errors
//!
//! Commands return [`error::CliError`], which names the failing stage:
//!
//! ```text
//! Error: load failed: Row width mismatch: expected 10 columns, got 9 in row 3
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
