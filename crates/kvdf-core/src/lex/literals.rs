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

//! Literal tokenizers: identifiers, quoted strings, floats and integers.
//!
//! Every function expects the cursor to sit on the first character of the
//! candidate token (trivia already skipped). A function that does not match
//! leaves the cursor where it was and returns `None`; once a token is
//! committed (an opening quote, a `0x` prefix) malformed input is an error.
//!
//! ```
//! use kvdf_core::lex::{literals, Cursor};
//!
//! let mut cur = Cursor::new("0x1A");
//! assert_eq!(literals::float(&mut cur), Ok(None));
//! assert_eq!(literals::integer(&mut cur), Ok(Some(26)));
//! ```

use super::cursor::Cursor;
use super::error::{LexError, LexResult};

/// Returns true if `ch` can start a plain identifier.
#[inline]
pub fn is_identifier_start(ch: char) -> bool {
    ch == '_' || unicode_ident::is_xid_start(ch)
}

/// Returns true if `ch` can continue a plain identifier.
#[inline]
pub fn is_identifier_continue(ch: char) -> bool {
    unicode_ident::is_xid_continue(ch)
}

/// Scans a plain identifier (`_` or XID_Start, then XID_Continue*).
pub fn identifier<'src>(cur: &mut Cursor<'src>) -> Option<&'src str> {
    match cur.peek() {
        Some(ch) if is_identifier_start(ch) => {}
        _ => return None,
    }
    let start = cur.checkpoint();
    cur.bump();
    cur.eat_while(is_identifier_continue);
    Some(cur.since(start))
}

/// Scans a `"`-delimited string and returns its decoded contents.
pub fn quoted_string(cur: &mut Cursor<'_>) -> LexResult<Option<String>> {
    if cur.peek() != Some('"') {
        return Ok(None);
    }
    let open = cur.pos();
    cur.bump();

    let mut out = String::new();
    loop {
        let pos = cur.pos();
        match cur.bump() {
            None => return Err(LexError::UnterminatedString { pos: open }),
            Some('"') => return Ok(Some(out)),
            Some('\\') => {
                let escape_pos = cur.pos();
                let escaped = match cur.bump() {
                    None => return Err(LexError::UnterminatedString { pos: open }),
                    Some(ch) => ch,
                };
                out.push(decode_escape(escaped).ok_or(LexError::InvalidEscape {
                    escape: escaped,
                    pos: escape_pos,
                })?);
            }
            Some(ch) if ch.is_control() => {
                return Err(LexError::ControlCharacter { ch, pos });
            }
            Some(ch) => out.push(ch),
        }
    }
}

fn decode_escape(ch: char) -> Option<char> {
    match ch {
        '"' => Some('"'),
        '\'' => Some('\''),
        '\\' => Some('\\'),
        '/' => Some('/'),
        'b' => Some('\u{0008}'),
        'f' => Some('\u{000C}'),
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        _ => None,
    }
}

fn eat_sign(cur: &mut Cursor<'_>) {
    if !cur.eat_char('-') {
        cur.eat_char('+');
    }
}

fn eat_digits(cur: &mut Cursor<'_>) -> usize {
    cur.eat_while(|c| c.is_ascii_digit())
}

fn eat_exponent(cur: &mut Cursor<'_>) -> bool {
    if !(cur.eat_char('e') || cur.eat_char('E')) {
        return false;
    }
    eat_sign(cur);
    eat_digits(cur) > 0
}

/// Scans a float token.
///
/// Accepts `[sign] digits "." digits [exponent]` or `[sign] digits exponent`.
/// The token is atomic: if any part is missing nothing is consumed. A
/// well-formed literal whose magnitude does not fit in an `f32` is an error.
pub fn float(cur: &mut Cursor<'_>) -> LexResult<Option<f32>> {
    let start = cur.checkpoint();
    if !scan_float(cur) {
        cur.restore(start);
        return Ok(None);
    }
    let text = cur.since(start);
    match text.parse::<f64>() {
        Ok(v) if (v as f32).is_finite() => Ok(Some(v as f32)),
        Ok(_) => Err(LexError::FloatOutOfRange {
            literal: text.to_string(),
            pos: start.pos(),
        }),
        Err(_) => {
            cur.restore(start);
            Ok(None)
        }
    }
}

fn scan_float(cur: &mut Cursor<'_>) -> bool {
    eat_sign(cur);
    if eat_digits(cur) == 0 {
        return false;
    }
    if cur.eat_char('.') {
        if eat_digits(cur) == 0 {
            return false;
        }
        match cur.peek() {
            Some('e' | 'E') => eat_exponent(cur),
            _ => true,
        }
    } else {
        eat_exponent(cur)
    }
}

/// Scans an integer token: `0x` hex digits, or a signed decimal.
///
/// Hexadecimal literals take up to 32 bits and are reinterpreted as a
/// two's-complement `i32` (`0xFFFFFFFF` is `-1`). Decimal literals outside
/// the `i32` range are an error.
pub fn integer(cur: &mut Cursor<'_>) -> LexResult<Option<i32>> {
    let start = cur.checkpoint();

    if cur.eat("0x") {
        let digits = cur.checkpoint();
        if cur.eat_while(|c| c.is_ascii_hexdigit()) == 0 {
            return Err(LexError::MissingHexDigits { pos: cur.pos() });
        }
        let text = cur.since(digits);
        return match u32::from_str_radix(text, 16) {
            Ok(v) => Ok(Some(v as i32)),
            Err(_) => Err(LexError::IntegerOutOfRange {
                literal: cur.since(start).to_string(),
                pos: start.pos(),
            }),
        };
    }

    eat_sign(cur);
    if eat_digits(cur) == 0 {
        cur.restore(start);
        return Ok(None);
    }
    let text = cur.since(start);
    text.parse::<i32>()
        .map(Some)
        .map_err(|_| LexError::IntegerOutOfRange {
            literal: text.to_string(),
            pos: start.pos(),
        })
}
