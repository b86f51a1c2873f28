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

//! CLI command definitions and argument parsing.
//!
//! - [`Commands`]: the subcommands (`print`, `validate`, `completion`)
//! - [`ConditionArgs`]: condition flags shared by every command

mod args;

use crate::commands;
use crate::error::CliError;
use clap::{Command, Subcommand};
use clap_complete::Shell;

pub use args::{ConditionArgs, Target};

/// Top-level CLI commands.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use kvdf_cli::cli::Commands;
///
/// #[derive(Parser)]
/// struct Cli {
///     #[command(subcommand)]
///     command: Commands,
/// }
/// ```
#[derive(Subcommand)]
pub enum Commands {
    /// Print the parsed tree as indented text
    ///
    /// Parses a KeyValues file, resolving includes and conditional
    /// statements, and prints one `key: value` line per entry with nested
    /// objects indented by tabs.
    Print {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: String,

        #[command(flatten)]
        conditions: ConditionArgs,

        /// Print the tree as pretty JSON instead
        #[arg(long)]
        json: bool,
    },

    /// Check that a file parses
    ///
    /// Reports every error with its location and prints a short summary.
    Validate {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: String,

        #[command(flatten)]
        conditions: ConditionArgs,

        /// Treat include warnings as errors
        #[arg(short = 'W', long)]
        warn_error: bool,
    },

    /// Generate a shell completion script
    ///
    /// Writes the script to stdout, e.g. `kvdf completion bash > kvdf.bash`.
    Completion {
        /// Target shell
        #[arg(value_name = "SHELL", value_enum)]
        shell: Shell,
    },
}

impl Commands {
    /// Execute the command. `root` builds the top-level command that
    /// shell completions are generated for.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file cannot be loaded or parsed, or if output
    /// cannot be written.
    pub fn execute(self, root: fn() -> Command) -> Result<(), CliError> {
        match self {
            Commands::Print {
                file,
                conditions,
                json,
            } => commands::print(&file, &conditions, json),
            Commands::Validate {
                file,
                conditions,
                warn_error,
            } => commands::validate(&file, &conditions, warn_error),
            Commands::Completion { shell } => commands::completion(shell, &mut root()),
        }
    }
}
