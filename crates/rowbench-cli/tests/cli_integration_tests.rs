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

//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::{NamedTempFile, TempDir};

// Test helper to create a rowbench command
fn rowbench_cmd() -> Command {
    Command::cargo_bin("rowbench").expect("Failed to find rowbench binary")
}

// Test helper to create a temporary file with content
fn create_temp_file(content: &str) -> NamedTempFile {
    let file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("Failed to create temp file");
    fs::write(file.path(), content).expect("Failed to write temp file");
    file
}

const SMALL: &str = "col1,col2\n1,3\n2,2\n4,4\n";

// ===== Help and Version Tests =====

#[test]
fn test_help_output() {
    rowbench_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("rowbench - row aggregation benchmark harness"))
        .stdout(predicate::str::contains("compare"))
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_version_output() {
    rowbench_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("rowbench"));
}

#[test]
fn test_no_subcommand_fails() {
    rowbench_cmd().assert().failure();
}

// ===== Strategy Command Tests =====

#[test]
fn test_serial_small_example() {
    let file = create_temp_file(SMALL);
    rowbench_cmd()
        .args(["serial", "--delay-us", "0"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Dataset shape: (3, 2)"))
        .stdout(predicate::str::contains("serial execution time:"))
        .stdout(predicate::str::contains("[2.0, 2.0, 4.0]"));
}

#[test]
fn test_parallel_clamps_large_worker_request() {
    let file = create_temp_file(SMALL);
    rowbench_cmd()
        .args(["parallel", "--workers", "512", "--delay-us", "0"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("[2.0, 2.0, 4.0]"));
}

#[test]
fn test_vectorized_small_example() {
    let file = create_temp_file(SMALL);
    rowbench_cmd()
        .arg("vectorized")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("vectorized execution time:"))
        .stdout(predicate::str::contains("[2.0, 2.0, 4.0]"));
}

#[test]
fn test_sample_option_limits_output() {
    let file = create_temp_file(SMALL);
    rowbench_cmd()
        .args(["vectorized", "--sample", "1"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("First 1 results: [2.0]"));
}

#[test]
fn test_header_only_file_runs() {
    let file = create_temp_file("col1,col2\n");
    rowbench_cmd()
        .args(["compare", "--delay-us", "0"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Dataset shape: (0, 2)"))
        .stdout(predicate::str::contains("Results equivalent: true"));
}

#[test]
fn test_semicolon_delimiter() {
    let file = create_temp_file("a;b\n1;3\n");
    rowbench_cmd()
        .args(["serial", "--delay-us", "0", "--delimiter", ";"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("[2.0]"));
}

// ===== Compare Command Tests =====

#[test]
fn test_generate_then_compare() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("big_data.csv");
    let report = dir.path().join("report.json");

    rowbench_cmd()
        .args(["generate", "--rows", "500", "--cols", "10", "--seed", "42", "--output"])
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("Dataset saved to"))
        .stdout(predicate::str::contains("Shape: (500, 10)"));

    let header = fs::read_to_string(&data).unwrap();
    assert!(header.starts_with("col1,col2,col3,col4,col5,col6,col7,col8,col9,col10\n"));

    rowbench_cmd()
        .args(["compare", "--delay-us", "0", "--workers", "2", "--json"])
        .arg(&report)
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("Timing summary:"))
        .stdout(predicate::str::contains("parallel matches serial"))
        .stdout(predicate::str::contains("vectorized matches serial"))
        .stdout(predicate::str::contains("Results equivalent: true"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["rows"], 500);
    assert_eq!(json["columns"], 10);
    assert_eq!(json["timings"].as_array().unwrap().len(), 3);
    assert_eq!(json["timings"][0]["strategy"], "serial");
    assert_eq!(json["comparisons"][1]["candidate"], "vectorized");
    assert_eq!(json["comparisons"][1]["equivalent"], true);
}

#[test]
fn test_compare_rejects_negative_tolerance() {
    let file = create_temp_file(SMALL);
    rowbench_cmd()
        .args(["compare", "--tolerance=-1"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: compare failed:"));
}

// ===== Error Reporting Tests =====

#[test]
fn test_ragged_input_fails_at_load() {
    let file = create_temp_file("a,b,c\n1,2,3\n4,5\n");
    rowbench_cmd()
        .arg("serial")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Error: load failed: Row width mismatch: expected 3 columns, got 2 in row 2",
        ));
}

#[test]
fn test_non_numeric_input_fails_at_load() {
    let file = create_temp_file("a,b\n1,x\n");
    rowbench_cmd()
        .arg("vectorized")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: load failed: Non-numeric value 'x'"));
}

#[test]
fn test_missing_file_fails_at_load() {
    rowbench_cmd()
        .args(["compare", "no_such_file_anywhere.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: load failed:"));
}

#[test]
fn test_non_ascii_delimiter_rejected() {
    let file = create_temp_file(SMALL);
    rowbench_cmd()
        .args(["serial", "--delimiter", "é"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid input"));
}

#[test]
fn test_generate_rejects_zero_rows() {
    let dir = TempDir::new().unwrap();
    rowbench_cmd()
        .args(["generate", "--rows", "0", "--output"])
        .arg(dir.path().join("x.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: generate failed:"));
}

// ===== Store Command Tests =====

#[test]
fn test_store_round_trip() {
    let dir = TempDir::new().unwrap();
    let file = create_temp_file(SMALL);
    let db = dir.path().join("bench.sqlite");

    rowbench_cmd()
        .arg("store")
        .arg(file.path())
        .arg("--database")
        .arg(&db)
        .assert()
        .success()
        .stdout(predicate::str::contains("Data to write: 3 rows"))
        .stdout(predicate::str::contains("Data written to table 'parallel_big_data' (3 rows"))
        .stdout(predicate::str::contains("Data read from table 'parallel_big_data' (3 rows"))
        .stdout(predicate::str::contains("[1.0, 3.0]"))
        .stdout(predicate::str::contains("REAL"))
        .stdout(predicate::str::is_match(r"col1\s+f64\s+REAL").unwrap())
        .stdout(predicate::str::is_match(r"col2\s+f64\s+REAL").unwrap());

    assert!(db.exists());
}

#[test]
fn test_store_duplicate_header_fails_at_load() {
    let dir = TempDir::new().unwrap();
    let file = create_temp_file("a,a\n1,2\n");
    let db = dir.path().join("bench.sqlite");

    rowbench_cmd()
        .arg("store")
        .arg(file.path())
        .arg("--database")
        .arg(&db)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Error: load failed: Invalid header at position 1: duplicate column name 'a'",
        ));

    assert!(!db.exists());
}

#[test]
fn test_store_invalid_table_fails_at_connect() {
    let dir = TempDir::new().unwrap();
    let file = create_temp_file(SMALL);

    rowbench_cmd()
        .arg("store")
        .arg(file.path())
        .arg("--database")
        .arg(dir.path().join("bench.sqlite"))
        .args(["--table", "bad-name"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: connect failed:"));
}

#[test]
fn test_store_unreachable_database_fails_at_connect() {
    let dir = TempDir::new().unwrap();
    let file = create_temp_file(SMALL);

    rowbench_cmd()
        .arg("store")
        .arg(file.path())
        .arg("--database")
        .arg(dir.path().join("missing/dir/bench.sqlite"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: connect failed:"));
}

// ===== Completion Tests =====

#[test]
fn test_completion_bash() {
    rowbench_cmd()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rowbench"));
}

#[test]
fn test_completion_install_instructions() {
    rowbench_cmd()
        .args(["completion", "zsh", "--install"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rowbench completion zsh"));
}

#[test]
fn test_completion_unknown_shell_fails() {
    rowbench_cmd().args(["completion", "tcsh"]).assert().failure();
}
