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

//! CLI command implementations

mod completion;
mod print;
mod validate;

pub use completion::completion;
pub use print::{format_tree, print};
pub use validate::validate;

use crate::cli::ConditionArgs;
use crate::error::CliError;
use colored::Colorize;
use kvdf_core::{ParseOptions, Parser};
use tracing::debug;

/// Default maximum file size (64 MB).
/// Can be overridden via KVDF_MAX_FILE_SIZE environment variable
pub const DEFAULT_MAX_FILE_SIZE: usize = 64 * 1024 * 1024;

/// Get the maximum file size from environment or use default.
fn get_max_file_size() -> usize {
    std::env::var("KVDF_MAX_FILE_SIZE")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(DEFAULT_MAX_FILE_SIZE)
}

/// Builds a session for `args`, loads `file` and parses it.
///
/// Grammar errors are rendered to stderr by the session as they are
/// recorded. A load failure is returned without being rendered.
/// Include warnings are printed to stderr; the caller decides whether
/// they matter.
pub(crate) fn parse_file(file: &str, args: &ConditionArgs) -> Result<Parser, CliError> {
    let options = ParseOptions::builder()
        .max_file_size(get_max_file_size())
        .target(args.target_platform())
        .default_conditions(!args.no_default_conditions)
        .build();

    let mut parser = Parser::with_options(options);
    // Load errors come back as `CliError::Load` and are printed by `main`.
    parser.set_error_log_to_null();
    for name in &args.define {
        parser.add_condition(name.as_str());
    }
    for name in &args.undefine {
        parser.remove_condition(name);
    }
    debug!(
        file,
        conditions = ?parser.conditions().iter().collect::<Vec<_>>(),
        "parsing"
    );

    if !parser.load_from_file(file) {
        let message = parser
            .errors()
            .first()
            .map(|e| e.message.clone())
            .unwrap_or_default();
        return Err(CliError::load(file, message));
    }

    parser.set_error_log_to_stderr();

    let ok = parser.parse();
    for warning in parser.warnings() {
        eprintln!("{} {}", "Warning:".yellow().bold(), warning.message);
    }
    if !ok {
        return Err(CliError::parse(file, parser.errors().len()));
    }
    Ok(parser)
}
