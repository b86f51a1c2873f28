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

//! Raw source acquisition: files, byte buffers and byte ranges.
//!
//! Loading only produces bytes. UTF-8 validation happens when the buffer is
//! parsed, so an invalid sequence is reported at its line and column.

use crate::error::{GrammarErrorKind, ParseContext, ParseError, Severity, SOURCE_UNAVAILABLE};
use crate::lex::Cursor;
use crate::limits::Limits;
use std::ops::Range;
use std::path::Path;
use tracing::debug;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Strips a leading UTF-8 byte-order mark.
pub(crate) fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
}

/// Reads `path` into memory, enforcing [`Limits::max_file_size`].
pub(crate) fn read_file(path: &Path, limits: &Limits) -> Result<Vec<u8>, ParseError> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        debug!(path = %path.display(), error = %e, "source file unavailable");
        ParseError::source_unavailable(Some(path))
    })?;
    if !metadata.is_file() {
        return Err(ParseError::source_unavailable(Some(path)));
    }
    if metadata.len() > limits.max_file_size as u64 {
        return Err(ParseError::file_too_large(
            path,
            metadata.len(),
            limits.max_file_size,
        ));
    }
    let bytes = std::fs::read(path).map_err(|e| {
        debug!(path = %path.display(), error = %e, "failed to read source file");
        ParseError::source_unavailable(Some(path))
    })?;
    Ok(strip_bom(&bytes).to_vec())
}

/// Copies `range` out of `bytes`.
pub(crate) fn read_range(bytes: &[u8], range: Range<usize>) -> Result<Vec<u8>, ParseError> {
    match bytes.get(range.clone()) {
        Some(slice) => Ok(strip_bom(slice).to_vec()),
        None => Err(ParseError::load(
            format!(
                "Byte range {}..{} is outside the {}-byte buffer.",
                range.start,
                range.end,
                bytes.len()
            ),
            SOURCE_UNAVAILABLE,
        )),
    }
}

/// Views `bytes` as UTF-8, reporting the first invalid sequence as a fatal
/// grammar error at its line and column.
pub(crate) fn decode(bytes: &[u8]) -> Result<&str, ParseError> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            let valid = &bytes[..e.valid_up_to()];
            // The prefix is valid by construction.
            let prefix = std::str::from_utf8(valid).unwrap_or_default();
            let mut cur = Cursor::new(prefix);
            while cur.bump().is_some() {}
            let pos = cur.pos();
            Err(ParseError::grammar(
                &GrammarErrorKind::InvalidEncoding,
                Severity::Fatal,
                ParseContext::new("File", crate::lex::SourcePos::start()),
                pos,
            ))
        }
    }
}
