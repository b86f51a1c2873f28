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

//! Structured error types for the KVDF CLI.
//!
//! All CLI operations return `Result<T, CliError>`. Each variant maps to a
//! process exit code with [`CliError::exit_code`].

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for KVDF CLI operations.
///
/// # Examples
///
/// ```rust
/// use kvdf_cli::error::CliError;
///
/// let err = CliError::parse("weapons.vdf", 3);
/// assert_eq!(err.exit_code(), 2);
/// assert_eq!(err.to_string(), "'weapons.vdf' has 3 parse error(s)");
/// ```
#[derive(Error, Debug, Clone)]
pub enum CliError {
    /// The source file could not be loaded.
    #[error("Failed to load '{path}': {message}")]
    Load {
        /// The file path that failed to load
        path: PathBuf,
        /// The load error message
        message: String,
    },

    /// The file loaded but did not parse.
    ///
    /// The individual errors have already been rendered by the session.
    #[error("'{path}' has {count} parse error(s)")]
    Parse {
        /// The file that failed to parse
        path: PathBuf,
        /// Number of errors recorded
        count: usize,
    },

    /// Writing output failed.
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(String),

    /// Invalid input provided by the user.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CliError {
    /// Create a load error with file path context.
    pub fn load(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Load {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a parse error.
    pub fn parse(path: impl Into<PathBuf>, count: usize) -> Self {
        Self::Parse {
            path: path.into(),
            count,
        }
    }

    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Process exit code: 1 when the source could not be loaded, 2 when it
    /// did not parse.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Parse { .. } => 2,
            Self::Load { .. } | Self::Io(_) | Self::Json(_) | Self::InvalidInput(_) => 1,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}
