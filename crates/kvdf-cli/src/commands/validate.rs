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

//! Validate command - KeyValues syntax validation

use super::parse_file;
use crate::cli::ConditionArgs;
use crate::error::CliError;
use colored::Colorize;

/// Validate a KeyValues file.
///
/// Prints `✓ <file>` with entry and warning counts on success. Errors are
/// rendered to stderr by the parse session.
///
/// # Errors
///
/// Returns `Err` if the file cannot be loaded or parsed, or, with
/// `warn_error`, if any include warning was raised.
pub fn validate(file: &str, conditions: &ConditionArgs, warn_error: bool) -> Result<(), CliError> {
    let parser = match parse_file(file, conditions) {
        Ok(parser) => parser,
        Err(e) => {
            println!("{} {}", "✗".red().bold(), file);
            return Err(e);
        }
    };

    let warnings = parser.warnings().len();
    if warn_error && warnings > 0 {
        println!("{} {}", "✗".red().bold(), file);
        return Err(CliError::invalid_input(format!(
            "{} include warning(s) treated as errors",
            warnings
        )));
    }

    let entries = parser.key_values().map(|kv| kv.len()).unwrap_or(0);
    println!("{} {}", "✓".green().bold(), file);
    println!("  Entries: {}", entries);
    println!("  Warnings: {}", warnings);
    println!(
        "  Conditions: {}",
        parser.conditions().iter().collect::<Vec<_>>().join(" ")
    );
    Ok(())
}
