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

//! KVDF Command Line Interface

use clap::{CommandFactory, Parser};
use colored::Colorize;
use kvdf_cli::cli::Commands;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// KVDF - Valve KeyValues toolkit
///
/// # Examples
///
/// ```bash
/// # Print a file with its includes resolved
/// kvdf print scripts/weapon_crowbar.txt
///
/// # Validate as an Xbox 360 build with an extra condition
/// kvdf validate gameinfo.txt --target x360 -D DEBUG
///
/// # Trace include resolution
/// RUST_LOG=kvdf_core=debug kvdf print main.vdf
/// ```
#[derive(Parser)]
#[command(name = "kvdf")]
#[command(author, version, about = "KVDF - Valve KeyValues toolkit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kvdf=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command.execute(Cli::command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::from(e.exit_code())
        }
    }
}
