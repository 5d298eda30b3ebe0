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

//! Shell completion generation - Tab completion for various shells

use crate::cli::Cli;
use crate::error::Result;
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io;

/// Write the completion script for `shell` to stdout.
///
/// # Examples
///
/// ```no_run
/// use clap_complete::Shell;
/// use rowbench_cli::commands::generate_completion;
///
/// generate_completion(Shell::Bash).unwrap();
/// ```
pub fn generate_completion(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}

/// Installation instructions for rowbench completions in `shell`.
///
/// # Examples
///
/// ```
/// use clap_complete::Shell;
/// use rowbench_cli::commands::installation_instructions;
///
/// assert!(installation_instructions(Shell::Zsh).contains("zsh"));
/// ```
pub fn installation_instructions(shell: Shell) -> String {
    match shell {
        Shell::Bash => {
            r#"# Bash completion installation:

# For current session only:
eval "$(rowbench completion bash)"

# Or save to completions directory:
rowbench completion bash > ~/.local/share/bash-completion/completions/rowbench
"#
        }
        Shell::Zsh => {
            r#"# Zsh completion installation:

# For current session only:
eval "$(rowbench completion zsh)"

# Or save to completions directory (ensure directory is in $fpath):
rowbench completion zsh > ~/.zsh/completions/_rowbench
"#
        }
        Shell::Fish => {
            r#"# Fish completion installation:

rowbench completion fish > ~/.config/fish/completions/rowbench.fish
"#
        }
        Shell::PowerShell => {
            r#"# PowerShell completion installation:

# Add this line to the profile at $PROFILE:
rowbench completion powershell | Out-String | Invoke-Expression
"#
        }
        Shell::Elvish => {
            r#"# Elvish completion installation:

# Add this line to ~/.elvish/rc.elv:
eval (rowbench completion elvish)
"#
        }
        _ => "Unsupported shell",
    }
    .to_string()
}
