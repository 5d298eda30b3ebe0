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

//! Log filter setup.
//!
//! `RUST_LOG`, when set and non-empty, replaces the defaults entirely.
//! Otherwise the rowbench crates log at `info`, or `debug` with `-v`.

use tracing_subscriber::EnvFilter;

const LOG_TARGETS: [&str; 3] = ["rowbench_core", "rowbench_store", "rowbench_cli"];

/// Default directives for the rowbench crates.
pub fn default_directives(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    LOG_TARGETS
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Build the filter from an optional `RUST_LOG` value.
///
/// An unparsable `RUST_LOG` falls back to the defaults.
pub fn env_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .map(str::trim)
        .filter(|directives| !directives.is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(default_directives(verbose)))
}

/// Install the stderr subscriber, reading `RUST_LOG` from the environment.
pub fn init(verbose: bool) {
    let rust_log = std::env::var("RUST_LOG").ok();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose, rust_log.as_deref()))
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn test_defaults_when_unset() {
        let filter = env_filter(false, None).to_string();
        for target in LOG_TARGETS {
            assert!(filter.contains(&format!("{}=info", target)));
        }
    }

    #[test]
    fn test_verbose_defaults() {
        assert_eq!(
            default_directives(true),
            "rowbench_core=debug,rowbench_store=debug,rowbench_cli=debug"
        );
        assert_eq!(env_filter(true, Some("  ")).max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_rust_log_wins_over_defaults() {
        let filter = env_filter(false, Some("rowbench_core=trace"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));
        let shown = filter.to_string();
        assert!(shown.contains("rowbench_core=trace"));
        assert!(!shown.contains("rowbench_core=info"));
        assert!(!shown.contains("rowbench_store"));
    }

    #[test]
    fn test_rust_log_wins_over_verbose() {
        let filter = env_filter(true, Some("warn"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn test_invalid_rust_log_falls_back() {
        let filter = env_filter(false, Some("rowbench_core=notalevel"));
        assert!(filter.to_string().contains("rowbench_cli=info"));
    }
}
