// Dweve KVDF - Valve KeyValues Data Format
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

//! Shell completion generation

use crate::error::CliError;
use clap::Command;
use clap_complete::{generate, Shell};
use std::io::{self, Write};

/// Write a completion script for `shell` and the CLI described by `cmd` to
/// stdout.
///
/// # Errors
///
/// Returns `Err` if stdout cannot be flushed.
///
/// # Examples
///
/// ```no_run
/// use clap::Command;
/// use clap_complete::Shell;
/// use kvdf_cli::commands::completion;
///
/// # fn main() -> Result<(), kvdf_cli::error::CliError> {
/// let mut cmd = Command::new("kvdf");
/// completion(Shell::Bash, &mut cmd)?;
/// # Ok(())
/// # }
/// ```
pub fn completion(shell: Shell, cmd: &mut Command) -> Result<(), CliError> {
    let mut out = io::stdout().lock();
    write_completion(shell, cmd, &mut out);
    out.flush()?;
    Ok(())
}

fn write_completion(shell: Shell, cmd: &mut Command, out: &mut dyn Write) {
    let name = cmd.get_name().to_string();
    generate(shell, cmd, name, out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Commands;
    use clap::Subcommand;

    fn script(shell: Shell, cmd: &mut Command) -> String {
        let mut buf = Vec::new();
        write_completion(shell, cmd, &mut buf);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_uses_given_command_name() {
        let mut cmd = Commands::augment_subcommands(Command::new("kvdftool"));
        let text = script(Shell::Bash, &mut cmd);
        assert!(text.contains("_kvdftool()"));
        assert!(text.contains("validate"));
    }

    #[test]
    fn test_zsh_header() {
        let mut cmd = Commands::augment_subcommands(Command::new("kvdf"));
        assert!(script(Shell::Zsh, &mut cmd).contains("#compdef kvdf"));
    }
}
