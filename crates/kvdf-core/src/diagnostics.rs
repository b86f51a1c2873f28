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

//! Where a parse session writes its error text.
//!
//! Every error a [`Parser`](crate::Parser) records is rendered to its sink
//! as it is recorded. Rendering includes the offending source line and a
//! caret under the reported column when the source is available.

use crate::error::ParseError;
use std::fmt;
use std::io::{self, Write};

/// Destination for rendered errors.
#[derive(Default)]
pub enum DiagnosticSink {
    /// Discard all output.
    Null,
    /// Standard error (the default).
    #[default]
    Stderr,
    /// Standard output.
    Stdout,
    /// Any other writer.
    Custom(Box<dyn Write + Send>),
}

impl fmt::Debug for DiagnosticSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "Null"),
            Self::Stderr => write!(f, "Stderr"),
            Self::Stdout => write!(f, "Stdout"),
            Self::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

impl DiagnosticSink {
    /// Renders `error` to the sink. Write failures are ignored.
    pub fn emit(&mut self, error: &ParseError, source: Option<&str>) {
        let text = render_error(error, source);
        let result = match self {
            Self::Null => return,
            Self::Stderr => io::stderr().lock().write_all(text.as_bytes()),
            Self::Stdout => io::stdout().lock().write_all(text.as_bytes()),
            Self::Custom(writer) => writer.write_all(text.as_bytes()),
        };
        if let Err(e) = result {
            tracing::trace!(error = %e, "diagnostic sink write failed");
        }
    }
}

/// Formats `error` followed by a source excerpt, one trailing newline.
///
/// ```
/// use kvdf_core::{render_error, KeyValues};
///
/// let err = "\"a\" }".parse::<KeyValues>().unwrap_err();
/// let text = render_error(&err.errors[0], Some("\"a\" }"));
/// assert!(text.contains("1 | \"a\" }"));
/// assert!(text.ends_with("^\n"));
/// ```
pub fn render_error(error: &ParseError, source: Option<&str>) -> String {
    let mut out = format!("{}\n", error);
    let line = match source {
        Some(src) if error.pos.is_known() => src.lines().nth(error.line() - 1),
        _ => None,
    };
    if let Some(text) = line {
        let gutter = error.line().to_string();
        let pad = " ".repeat(gutter.len());
        let caret_col = error.column().saturating_sub(1).min(text.chars().count());
        let lead: String = text
            .chars()
            .take(caret_col)
            .map(|c| if c == '\t' { '\t' } else { ' ' })
            .collect();
        out.push_str(&format!("{} | {}\n", gutter, text));
        out.push_str(&format!("{} | {}^\n", pad, lead));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GrammarErrorKind, ParseContext, Severity};
    use crate::lex::SourcePos;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Shared(Arc<Mutex<Vec<u8>>>);

    impl Write for Shared {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn value_error() -> ParseError {
        ParseError::grammar(
            &GrammarErrorKind::ExpectedValue,
            Severity::Recoverable,
            ParseContext::new("KeyValueStatement", SourcePos::new(2, 1)),
            SourcePos::new(2, 7),
        )
    }

    #[test]
    fn test_render_with_excerpt() {
        let text = render_error(&value_error(), Some("a 1\n\"key\" \nb 2"));
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("error at line 2, column 7"));
        assert_eq!(lines[1], "2 | \"key\" ");
        assert_eq!(lines[2], "  |       ^");
    }

    #[test]
    fn test_render_keeps_tabs_aligned() {
        let err = ParseError::grammar(
            &GrammarErrorKind::ExpectedValue,
            Severity::Recoverable,
            ParseContext::new("KeyValueStatement", SourcePos::new(1, 1)),
            SourcePos::new(1, 3),
        );
        let text = render_error(&err, Some("\tk"));
        assert!(text.ends_with("  | \t ^\n"));
    }

    #[test]
    fn test_render_without_source() {
        let text = render_error(&ParseError::not_loaded(), None);
        assert_eq!(text, "fatal error: No source has been loaded.\n");
    }

    #[test]
    fn test_custom_sink_receives_text() {
        let buffer = Shared::default();
        let mut sink = DiagnosticSink::Custom(Box::new(buffer.clone()));
        sink.emit(&value_error(), None);
        let written = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert!(written.contains("expected a value"));
    }

    #[test]
    fn test_null_sink_is_silent() {
        let mut sink = DiagnosticSink::Null;
        sink.emit(&value_error(), None);
        assert_eq!(format!("{:?}", sink), "Null");
    }

    #[test]
    fn test_default_is_stderr() {
        assert!(matches!(DiagnosticSink::default(), DiagnosticSink::Stderr));
    }
}
