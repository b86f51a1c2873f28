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

//! Character cursor with line/column tracking.
//!
//! The cursor is the single point through which the lexer, the conditional
//! evaluator and the grammar read source text. Backtracking for ordered
//! choice is done with [`Checkpoint`]s.

use super::span::SourcePos;

/// A saved cursor location that can be restored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    offset: usize,
    pos: SourcePos,
}

impl Checkpoint {
    /// Position of the checkpoint in the source.
    #[inline]
    pub fn pos(&self) -> SourcePos {
        self.pos
    }
}

/// Forward-only reader over UTF-8 source text.
#[derive(Debug, Clone)]
pub struct Cursor<'src> {
    src: &'src str,
    offset: usize,
    pos: SourcePos,
}

impl<'src> Cursor<'src> {
    /// Creates a cursor at the start of `src`.
    pub fn new(src: &'src str) -> Self {
        Self {
            src,
            offset: 0,
            pos: SourcePos::start(),
        }
    }

    /// Current position.
    #[inline]
    pub fn pos(&self) -> SourcePos {
        self.pos
    }

    /// Unconsumed input.
    #[inline]
    pub fn rest(&self) -> &'src str {
        &self.src[self.offset..]
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.offset >= self.src.len()
    }

    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Looks one character past [`peek`](Self::peek).
    #[inline]
    pub fn peek_second(&self) -> Option<char> {
        let mut chars = self.rest().chars();
        chars.next();
        chars.next()
    }

    #[inline]
    pub fn starts_with(&self, literal: &str) -> bool {
        self.rest().starts_with(literal)
    }

    /// Consumes one character.
    pub fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.offset += ch.len_utf8();
        if ch == '\n' {
            self.pos.next_line();
        } else {
            self.pos.advance_col();
        }
        Some(ch)
    }

    /// Consumes `ch` if it is next.
    pub fn eat_char(&mut self, ch: char) -> bool {
        if self.peek() == Some(ch) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consumes `literal` if the input starts with it.
    pub fn eat(&mut self, literal: &str) -> bool {
        if !self.starts_with(literal) {
            return false;
        }
        for _ in literal.chars() {
            self.bump();
        }
        true
    }

    /// Consumes characters while `pred` holds and returns how many were eaten.
    pub fn eat_while(&mut self, mut pred: impl FnMut(char) -> bool) -> usize {
        let mut count = 0;
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            self.bump();
            count += 1;
        }
        count
    }

    /// Skips whitespace and `//` line comments.
    pub fn skip_trivia(&mut self) {
        loop {
            self.eat_while(char::is_whitespace);
            if self.starts_with("//") {
                self.eat_while(|c| c != '\n');
            } else {
                break;
            }
        }
    }

    #[inline]
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            offset: self.offset,
            pos: self.pos,
        }
    }

    #[inline]
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.offset = checkpoint.offset;
        self.pos = checkpoint.pos;
    }

    /// Text consumed since `checkpoint`.
    #[inline]
    pub fn since(&self, checkpoint: Checkpoint) -> &'src str {
        &self.src[checkpoint.offset..self.offset]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bump_tracks_lines_and_columns() {
        let mut cur = Cursor::new("ab\nc");
        cur.bump();
        cur.bump();
        assert_eq!(cur.pos(), SourcePos::new(1, 3));
        cur.bump();
        assert_eq!(cur.pos(), SourcePos::new(2, 1));
        assert_eq!(cur.bump(), Some('c'));
        assert!(cur.is_eof());
        assert_eq!(cur.bump(), None);
    }

    #[test]
    fn test_columns_count_chars_not_bytes() {
        let mut cur = Cursor::new("éx");
        cur.bump();
        assert_eq!(cur.pos().column(), 2);
        assert_eq!(cur.peek(), Some('x'));
    }

    #[test]
    fn test_skip_trivia_handles_comments() {
        let mut cur = Cursor::new("  // note\n\t// another\n  key");
        cur.skip_trivia();
        assert_eq!(cur.rest(), "key");
        assert_eq!(cur.pos(), SourcePos::new(3, 3));
    }

    #[test]
    fn test_skip_trivia_comment_at_eof() {
        let mut cur = Cursor::new("// trailing");
        cur.skip_trivia();
        assert!(cur.is_eof());
    }

    #[test]
    fn test_checkpoint_restore() {
        let mut cur = Cursor::new("12.5");
        let cp = cur.checkpoint();
        cur.eat_while(|c| c.is_ascii_digit());
        assert_eq!(cur.since(cp), "12");
        cur.restore(cp);
        assert_eq!(cur.rest(), "12.5");
        assert_eq!(cur.pos(), SourcePos::start());
    }

    #[test]
    fn test_eat_literal() {
        let mut cur = Cursor::new("#include \"x\"");
        assert!(!cur.eat("#base"));
        assert!(cur.eat("#include"));
        assert_eq!(cur.peek(), Some(' '));
    }
}
