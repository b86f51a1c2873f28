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

//! Error types for literal tokenization.

use thiserror::Error;

pub use crate::lex::span::SourcePos;

/// An error raised while tokenizing a literal.
///
/// The grammar converts these into [`ParseError`](crate::ParseError)s,
/// attaching the production that was being parsed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LexError {
    /// Quoted string reached end of input before its closing quote.
    #[error("line {}, column {}: unterminated quoted string", .pos.line(), .pos.column())]
    UnterminatedString { pos: SourcePos },

    /// Backslash followed by a character that is not a known escape.
    #[error("line {}, column {}: invalid escape sequence '\\{}'", .pos.line(), .pos.column(), .escape)]
    InvalidEscape { escape: char, pos: SourcePos },

    /// Control character inside a quoted string.
    #[error("line {}, column {}: control character {:?} in quoted string", .pos.line(), .pos.column(), .ch)]
    ControlCharacter { ch: char, pos: SourcePos },

    /// Integer literal does not fit in 32 bits.
    #[error("line {}, column {}: integer literal '{}' is out of range", .pos.line(), .pos.column(), .literal)]
    IntegerOutOfRange { literal: String, pos: SourcePos },

    /// Float literal whose magnitude does not fit in an `f32`.
    #[error("line {}, column {}: float literal '{}' is out of range", .pos.line(), .pos.column(), .literal)]
    FloatOutOfRange { literal: String, pos: SourcePos },

    /// `0x` prefix without any hexadecimal digits.
    #[error("line {}, column {}: expected hexadecimal digits after '0x'", .pos.line(), .pos.column())]
    MissingHexDigits { pos: SourcePos },
}

impl LexError {
    /// Position where the error occurred.
    pub fn position(&self) -> SourcePos {
        match self {
            LexError::UnterminatedString { pos }
            | LexError::InvalidEscape { pos, .. }
            | LexError::ControlCharacter { pos, .. }
            | LexError::IntegerOutOfRange { pos, .. }
            | LexError::FloatOutOfRange { pos, .. }
            | LexError::MissingHexDigits { pos } => *pos,
        }
    }
}

/// Result type for lexer operations.
pub type LexResult<T> = Result<T, LexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_accessor() {
        let err = LexError::InvalidEscape {
            escape: 'q',
            pos: SourcePos::new(4, 9),
        };
        assert_eq!(err.position(), SourcePos::new(4, 9));
    }

    #[test]
    fn test_invalid_escape_display() {
        let err = LexError::InvalidEscape {
            escape: 'q',
            pos: SourcePos::new(1, 2),
        };
        assert_eq!(
            err.to_string(),
            "line 1, column 2: invalid escape sequence '\\q'"
        );
    }

    #[test]
    fn test_control_character_display() {
        let err = LexError::ControlCharacter {
            ch: '\n',
            pos: SourcePos::new(1, 5),
        };
        assert!(err.to_string().contains("'\\n'"));
    }
}
