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

//! Source positions for error reporting.
//!
//! # Examples
//!
//! ```
//! use kvdf_core::lex::SourcePos;
//!
//! let mut pos = SourcePos::new(3, 7);
//! pos.advance_col();
//! assert_eq!(pos.column(), 8);
//! pos.next_line();
//! assert_eq!((pos.line(), pos.column()), (4, 1));
//! ```

use std::fmt;

/// A position in source text.
///
/// Lines and columns are 1-indexed. Columns count Unicode scalar values,
/// not bytes. `SourcePos::default()` (0, 0) marks an unknown position, which
/// is what load errors carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct SourcePos {
    line: usize,
    column: usize,
}

impl SourcePos {
    /// Creates a new source position.
    #[inline]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Creates a position at the start of the input (line 1, column 1).
    #[inline]
    pub const fn start() -> Self {
        Self { line: 1, column: 1 }
    }

    /// Returns the line number.
    #[inline]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Returns the column number.
    #[inline]
    pub const fn column(&self) -> usize {
        self.column
    }

    /// Returns true if this position points into real source text.
    #[inline]
    pub const fn is_known(&self) -> bool {
        self.line > 0
    }

    /// Advances the position by one column.
    #[inline]
    pub fn advance_col(&mut self) {
        self.column += 1;
    }

    /// Moves to the next line (increments line, resets column to 1).
    #[inline]
    pub fn next_line(&mut self) {
        self.line += 1;
        self.column = 1;
    }
}

impl fmt::Display for SourcePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_position() {
        let pos = SourcePos::start();
        assert_eq!(pos.line(), 1);
        assert_eq!(pos.column(), 1);
        assert!(pos.is_known());
    }

    #[test]
    fn test_default_is_unknown() {
        assert!(!SourcePos::default().is_known());
    }

    #[test]
    fn test_next_line_resets_column() {
        let mut pos = SourcePos::new(2, 40);
        pos.next_line();
        assert_eq!(pos, SourcePos::new(3, 1));
    }

    #[test]
    fn test_display() {
        assert_eq!(SourcePos::new(10, 25).to_string(), "line 10, column 25");
    }

    #[test]
    fn test_ordering_is_line_major() {
        assert!(SourcePos::new(1, 80) < SourcePos::new(2, 1));
        assert!(SourcePos::new(2, 3) < SourcePos::new(2, 4));
    }
}
