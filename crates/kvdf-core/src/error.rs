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

//! Error and warning types for KeyValues parsing.
//!
//! Errors come from two places:
//!
//! - **Load errors** (codes 1-9) are raised before any grammar runs and are
//!   always [`Severity::Fatal`].
//! - **Grammar errors** (codes 10 and up, see [`GrammarErrorKind`]) carry the
//!   production being parsed, where that production started, and where the
//!   offending token starts.
//!
//! Warnings are produced only by the include resolver and never fail a parse.

use crate::lex::{LexError, SourcePos};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Load error code: the source could not be read.
pub const SOURCE_UNAVAILABLE: i32 = 1;
/// Load error code: `parse()` was called before any source was loaded.
pub const NOT_LOADED: i32 = 2;
/// Load error code: the file exceeds [`Limits::max_file_size`](crate::Limits).
pub const FILE_TOO_LARGE: i32 = 3;

/// Whether the grammar could resynchronize after an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Parsing continued past the error to collect further diagnostics.
    Recoverable,
    /// Parsing stopped at the error.
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recoverable => write!(f, "error"),
            Self::Fatal => write!(f, "fatal error"),
        }
    }
}

/// The grammar production an error was raised in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseContext {
    /// Production name, e.g. `KeyValueStatement`.
    pub production: String,
    /// Where the production started.
    pub start: SourcePos,
}

impl ParseContext {
    pub fn new(production: impl Into<String>, start: SourcePos) -> Self {
        Self {
            production: production.into(),
            start,
        }
    }
}

/// What went wrong inside the grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarErrorKind {
    #[error("expected a key-value statement or include directive")]
    ExpectedStatement,
    #[error("expected a value")]
    ExpectedValue,
    #[error("expected a quoted path after include directive")]
    ExpectedIncludePath,
    #[error("unterminated quoted string")]
    UnterminatedString,
    #[error("invalid escape sequence '\\{0}'")]
    InvalidEscape(char),
    #[error("control character {0:?} in quoted string")]
    ControlCharacter(char),
    #[error("integer literal '{0}' is out of range")]
    IntegerOutOfRange(String),
    #[error("expected hexadecimal digits after '0x'")]
    MissingHexDigits,
    #[error("expected conditional operand")]
    ExpectedConditionalOperand,
    #[error("expected '{0}'")]
    ExpectedToken(char),
    #[error("nesting depth exceeds limit of {0}")]
    NestingTooDeep(usize),
    #[error("invalid UTF-8 encoding")]
    InvalidEncoding,
    #[error("unexpected trailing input")]
    TrailingInput,
    #[error("float literal '{0}' is out of range")]
    FloatOutOfRange(String),
}

impl GrammarErrorKind {
    /// Numeric code reported in [`ParseError::code`].
    pub fn code(&self) -> i32 {
        match self {
            Self::ExpectedStatement => 10,
            Self::ExpectedValue => 11,
            Self::ExpectedIncludePath => 12,
            Self::UnterminatedString => 13,
            Self::InvalidEscape(_) => 14,
            Self::ControlCharacter(_) => 15,
            Self::IntegerOutOfRange(_) => 16,
            Self::MissingHexDigits => 17,
            Self::ExpectedConditionalOperand => 18,
            Self::ExpectedToken(_) => 19,
            Self::NestingTooDeep(_) => 20,
            Self::InvalidEncoding => 21,
            Self::TrailingInput => 22,
            Self::FloatOutOfRange(_) => 23,
        }
    }

    /// Errors after which there is nothing left to resynchronize on.
    pub fn is_unrecoverable(&self) -> bool {
        matches!(
            self,
            Self::UnterminatedString | Self::NestingTooDeep(_) | Self::InvalidEncoding
        )
    }
}

impl From<LexError> for GrammarErrorKind {
    fn from(err: LexError) -> Self {
        match err {
            LexError::UnterminatedString { .. } => Self::UnterminatedString,
            LexError::InvalidEscape { escape, .. } => Self::InvalidEscape(escape),
            LexError::ControlCharacter { ch, .. } => Self::ControlCharacter(ch),
            LexError::IntegerOutOfRange { literal, .. } => Self::IntegerOutOfRange(literal),
            LexError::FloatOutOfRange { literal, .. } => Self::FloatOutOfRange(literal),
            LexError::MissingHexDigits { .. } => Self::MissingHexDigits,
        }
    }
}

/// An error reported by a parse session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ParseError {
    /// Recoverable or fatal.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// Numeric error code.
    pub code: i32,
    /// Production the error was raised in.
    pub context: ParseContext,
    /// Start of the offending token. Unknown (0, 0) for load errors.
    pub pos: SourcePos,
    /// File the error refers to, when the source came from a file.
    pub path: Option<PathBuf>,
}

impl ParseError {
    /// Creates a fatal load error.
    pub fn load(message: impl Into<String>, code: i32) -> Self {
        Self {
            severity: Severity::Fatal,
            message: message.into(),
            code,
            context: ParseContext::new("Load", SourcePos::default()),
            pos: SourcePos::default(),
            path: None,
        }
    }

    /// The source file or buffer could not be read.
    pub fn source_unavailable(path: Option<&Path>) -> Self {
        let message = match path {
            Some(p) => format!("File '{}' was not found.", p.display()),
            None => "File path not specified.".to_string(),
        };
        let err = Self::load(message, SOURCE_UNAVAILABLE);
        match path {
            Some(p) => err.with_path(p),
            None => err,
        }
    }

    /// `parse()` called on a session with nothing loaded.
    pub fn not_loaded() -> Self {
        Self::load("No source has been loaded.", NOT_LOADED)
    }

    /// The file is larger than the configured limit.
    pub fn file_too_large(path: &Path, size: u64, max: usize) -> Self {
        Self::load(
            format!(
                "File '{}' is too large ({} bytes, limit {} bytes).",
                path.display(),
                size,
                max
            ),
            FILE_TOO_LARGE,
        )
        .with_path(path)
    }

    /// Creates a grammar error.
    pub fn grammar(
        kind: &GrammarErrorKind,
        severity: Severity,
        context: ParseContext,
        pos: SourcePos,
    ) -> Self {
        Self {
            severity,
            message: kind.to_string(),
            code: kind.code(),
            context,
            pos,
            path: None,
        }
    }

    /// Attaches the file path the error refers to.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    #[inline]
    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Fatal
    }

    /// Line of the offending token.
    #[inline]
    pub fn line(&self) -> usize {
        self.pos.line()
    }

    /// Column of the offending token.
    #[inline]
    pub fn column(&self) -> usize {
        self.pos.column()
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.severity)?;
        if let Some(path) = &self.path {
            write!(f, " in '{}'", path.display())?;
        }
        if self.pos.is_known() {
            write!(
                f,
                " at {}: {} (while parsing {})",
                self.pos, self.message, self.context.production
            )
        } else {
            write!(f, ": {}", self.message)
        }
    }
}

/// Warning code: an included file could not be found.
pub const INCLUDE_MISSING: i32 = 1;
/// Warning code: an included file failed to parse.
pub const INCLUDE_UNPARSABLE: i32 = 2;
/// Warning code: an include would re-enter a file already being parsed.
pub const INCLUDE_CYCLE: i32 = 3;
/// Warning code: the include chain is deeper than the configured limit.
pub const INCLUDE_TOO_DEEP: i32 = 4;

/// A non-fatal diagnostic produced while resolving includes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ParseWarning {
    pub message: String,
    pub code: i32,
}

impl ParseWarning {
    pub fn new(message: impl Into<String>, code: i32) -> Self {
        Self {
            message: message.into(),
            code,
        }
    }

    pub fn include_missing(path: &str) -> Self {
        Self::new(format!("Could not find '{}'.", path), INCLUDE_MISSING)
    }

    pub fn include_unparsable(path: &str) -> Self {
        Self::new(format!("'{}' could not be parsed.", path), INCLUDE_UNPARSABLE)
    }

    pub fn include_cycle(path: &str) -> Self {
        Self::new(format!("'{}' is already being included.", path), INCLUDE_CYCLE)
    }

    pub fn include_too_deep(path: &str) -> Self {
        Self::new(
            format!("'{}' exceeds the include depth limit.", path),
            INCLUDE_TOO_DEEP,
        )
    }
}

/// Returned by the one-shot constructors on [`KeyValues`](crate::KeyValues)
/// when loading or parsing fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to parse KeyValues ({} error(s)){}", .errors.len(), first_message(.errors))]
pub struct ParseFailure {
    /// Every error the session collected.
    pub errors: Vec<ParseError>,
}

fn first_message(errors: &[ParseError]) -> String {
    errors
        .first()
        .map(|e| format!(": {}", e))
        .unwrap_or_default()
}

impl ParseFailure {
    /// Returns true if any collected error is fatal.
    pub fn is_fatal(&self) -> bool {
        self.errors.iter().any(ParseError::is_fatal)
    }
}
