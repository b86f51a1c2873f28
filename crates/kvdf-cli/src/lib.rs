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

//! KVDF CLI library for command-line parsing and execution.
//!
//! # Commands
//!
//! - **print**: Parse a file and print the resolved tree as indented text or JSON
//! - **validate**: Check that a file parses and summarize it
//! - **completion**: Generate a shell completion script
//!
//! Both commands accept `-D NAME` / `-U NAME` to add or remove conditions,
//! `--target` to pick the platform default conditions come from, and
//! `--no-default-conditions` to start from an empty set.
//!
//! # Exit codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | success |
//! | 1 | the file could not be loaded |
//! | 2 | the file did not parse |
//!
//! # Examples
//!
//! ```no_run
//! use kvdf_cli::cli::ConditionArgs;
//! use kvdf_cli::commands::validate;
//!
//! # fn main() -> Result<(), kvdf_cli::error::CliError> {
//! let args = ConditionArgs {
//!     define: vec!["DEBUG".to_string()],
//!     ..ConditionArgs::default()
//! };
//! validate("gameinfo.txt", &args, false)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Security
//!
//! - **File size limits**: configurable via `KVDF_MAX_FILE_SIZE` (bytes)
//! - **Bounded recursion**: nesting and include depth are limited by the core

pub mod cli;
pub mod commands;
pub mod error;
