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

//! Statement and object grammar.
//!
//! # Grammar
//!
//! ```text
//! File                 = (Statement)* EOF
//! Object               = "{" (Statement)* "}"
//! Statement            = KeyValueStatement | IncludeStatement
//! KeyValueStatement    = Key Value [ConditionalAttribute]
//! IncludeStatement     = ("#include" | "#base") QuotedString
//! ConditionalAttribute = "[" ConditionalExpression "]"
//! Key                  = Identifier | QuotedString
//! Value                = Object | Float | Integer | Identifier | QuotedString
//! ```
//!
//! Each statement list is folded left to right into a fresh [`KeyValues`]:
//! pairs insert first-wins, pairs whose attribute is false are dropped, and
//! includes merge the included root into the entries collected so far.
//!
//! # Error recovery
//!
//! A statement that fails inside a list is recorded as a recoverable error
//! and the grammar skips to the next line (or to the closing `}` of the
//! enclosing object) before continuing. Errors with nothing left to
//! resynchronize on, such as an unterminated string or a missing `}` at end
//! of input, are fatal and stop the parse. Any error means no tree.

use crate::conditional::ConditionParser;
use crate::error::{GrammarErrorKind, ParseContext, ParseError, ParseWarning, Severity};
use crate::include::{self, IncludeScope};
use crate::key_values::KeyValues;
use crate::lex::{literals, Cursor, LexError, SourcePos};
use crate::value::Value;
use tracing::{debug, trace};

/// A grammar error that has not been assigned a severity yet.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Fault {
    kind: GrammarErrorKind,
    pos: SourcePos,
    context: ParseContext,
}

impl Fault {
    pub(crate) fn new(kind: GrammarErrorKind, pos: SourcePos, context: ParseContext) -> Self {
        Self { kind, pos, context }
    }

    fn from_lex(err: LexError, context: ParseContext) -> Self {
        let pos = err.position();
        Self::new(err.into(), pos, context)
    }

    pub(crate) fn into_error(self, severity: Severity) -> ParseError {
        ParseError::grammar(&self.kind, severity, self.context, self.pos)
    }
}

/// Why a production stopped.
enum Halt {
    /// A fault the enclosing statement list may recover from.
    Fault(Fault),
    /// A fatal error was already recorded; unwind to the top.
    Aborted,
}

impl From<Fault> for Halt {
    fn from(fault: Fault) -> Self {
        Halt::Fault(fault)
    }
}

type Step<T> = Result<T, Halt>;

enum Item {
    Pair(String, Value),
    Suppressed,
    Include { path: String, pos: SourcePos },
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ListEnd {
    Eof,
    Brace,
}

/// Result of running the File production.
#[derive(Debug)]
pub(crate) struct GrammarOutput {
    /// The folded tree, present only when no error was recorded.
    pub tree: Option<KeyValues>,
    pub errors: Vec<ParseError>,
    pub warnings: Vec<ParseWarning>,
}

/// Parses `src` as a complete file.
pub(crate) fn parse_file(src: &str, scope: IncludeScope<'_>) -> GrammarOutput {
    let mut grammar = Grammar {
        cur: Cursor::new(src),
        scope,
        depth: 0,
        errors: Vec::new(),
        warnings: Vec::new(),
    };
    let tree = match grammar.file() {
        Ok(tree) => Some(tree),
        Err(Halt::Fault(fault)) => {
            grammar.abort(fault);
            None
        }
        Err(Halt::Aborted) => None,
    };
    let tree = if grammar.errors.is_empty() { tree } else { None };
    GrammarOutput {
        tree,
        errors: grammar.errors,
        warnings: grammar.warnings,
    }
}

struct Grammar<'a, 'src> {
    cur: Cursor<'src>,
    scope: IncludeScope<'a>,
    depth: usize,
    errors: Vec<ParseError>,
    warnings: Vec<ParseWarning>,
}

impl<'a, 'src> Grammar<'a, 'src> {
    fn file(&mut self) -> Step<KeyValues> {
        let mut tree = KeyValues::new();
        loop {
            self.cur.skip_trivia();
            if self.cur.is_eof() {
                return Ok(tree);
            }
            self.list_item(&mut tree, ListEnd::Eof)?;
        }
    }

    fn object(&mut self) -> Step<Option<KeyValues>> {
        let start = self.cur.pos();
        if !self.cur.eat_char('{') {
            return Ok(None);
        }
        let max = self.scope.options.limits.max_nesting_depth;
        if self.depth >= max {
            let fault = Fault::new(
                GrammarErrorKind::NestingTooDeep(max),
                start,
                ParseContext::new("Object", start),
            );
            return Err(self.abort(fault));
        }

        self.depth += 1;
        let mut tree = KeyValues::new();
        loop {
            self.cur.skip_trivia();
            if self.cur.eat_char('}') {
                break;
            }
            if self.cur.is_eof() {
                let fault = Fault::new(
                    GrammarErrorKind::ExpectedToken('}'),
                    self.cur.pos(),
                    ParseContext::new("Object", start),
                );
                return Err(self.abort(fault));
            }
            self.list_item(&mut tree, ListEnd::Brace)?;
        }
        self.depth -= 1;
        Ok(Some(tree))
    }

    /// Parses one statement and folds it into `tree`, recovering from
    /// statement-level faults.
    fn list_item(&mut self, tree: &mut KeyValues, end: ListEnd) -> Step<()> {
        match self.statement() {
            Ok(item) => {
                self.fold(tree, item);
                Ok(())
            }
            Err(Halt::Aborted) => Err(Halt::Aborted),
            Err(Halt::Fault(fault)) => {
                if fault.kind.is_unrecoverable() || self.cur.is_eof() {
                    return Err(self.abort(fault));
                }
                trace!(kind = ?fault.kind, "recovering from statement error");
                self.errors.push(fault.into_error(Severity::Recoverable));
                self.resync(end);
                Ok(())
            }
        }
    }

    fn fold(&mut self, tree: &mut KeyValues, item: Item) {
        match item {
            Item::Pair(key, value) => {
                if !tree.insert(key, value) {
                    trace!("duplicate key discarded");
                }
            }
            Item::Suppressed => {}
            Item::Include { path, pos } => {
                match include::resolve(&path, &self.scope, &mut self.warnings) {
                    Some(included) => tree.extend(included),
                    None => {
                        if let Some(warning) = self.warnings.last() {
                            debug!(path = %path, line = pos.line(), code = warning.code, "{}", warning);
                        }
                    }
                }
            }
        }
    }

    /// Skips the rest of the current line. Inside an object the closing `}`
    /// is left for the object to consume.
    fn resync(&mut self, end: ListEnd) {
        while let Some(ch) = self.cur.peek() {
            if end == ListEnd::Brace && ch == '}' {
                return;
            }
            self.cur.bump();
            if ch == '\n' {
                return;
            }
        }
    }

    /// Records `fault` as fatal.
    fn abort(&mut self, fault: Fault) -> Halt {
        self.errors.push(fault.into_error(Severity::Fatal));
        Halt::Aborted
    }

    fn statement(&mut self) -> Step<Item> {
        let start = self.cur.pos();
        if self.cur.starts_with("#include") || self.cur.starts_with("#base") {
            self.include_statement(start)
        } else {
            self.key_value_statement(start)
        }
    }

    fn include_statement(&mut self, start: SourcePos) -> Step<Item> {
        let context = || ParseContext::new("IncludeStatement", start);
        if !self.cur.eat("#include") {
            self.cur.eat("#base");
        }
        self.cur.skip_trivia();
        let pos = self.cur.pos();
        match literals::quoted_string(&mut self.cur) {
            Ok(Some(path)) => Ok(Item::Include { path, pos: start }),
            Ok(None) => Err(Fault::new(GrammarErrorKind::ExpectedIncludePath, pos, context()).into()),
            Err(e) => Err(Fault::from_lex(e, context()).into()),
        }
    }

    fn key_value_statement(&mut self, start: SourcePos) -> Step<Item> {
        let context = || ParseContext::new("KeyValueStatement", start);

        let key = match literals::identifier(&mut self.cur) {
            Some(ident) => ident.to_string(),
            None => match literals::quoted_string(&mut self.cur) {
                Ok(Some(s)) => s,
                Ok(None) => {
                    return Err(
                        Fault::new(GrammarErrorKind::ExpectedStatement, start, context()).into(),
                    )
                }
                Err(e) => return Err(Fault::from_lex(e, context()).into()),
            },
        };

        self.cur.skip_trivia();
        let value = self.value(start)?;

        self.cur.skip_trivia();
        if self.cur.peek() == Some('[') && !self.conditional_attribute()? {
            return Ok(Item::Suppressed);
        }
        Ok(Item::Pair(key, value))
    }

    /// Ordered choice: object, float, integer, identifier, quoted string.
    fn value(&mut self, statement_start: SourcePos) -> Step<Value> {
        let context = || ParseContext::new("KeyValueStatement", statement_start);
        let pos = self.cur.pos();

        if let Some(object) = self.object()? {
            return Ok(Value::Object(object));
        }
        match literals::float(&mut self.cur) {
            Ok(Some(f)) => return Ok(Value::Float(f)),
            Ok(None) => {}
            Err(e) => return Err(Fault::from_lex(e, context()).into()),
        }
        match literals::integer(&mut self.cur) {
            Ok(Some(n)) => return Ok(Value::Int(n)),
            Ok(None) => {}
            Err(e) => return Err(Fault::from_lex(e, context()).into()),
        }
        if let Some(ident) = literals::identifier(&mut self.cur) {
            return Ok(Value::String(ident.to_string()));
        }
        match literals::quoted_string(&mut self.cur) {
            Ok(Some(s)) => Ok(Value::String(s)),
            Ok(None) => Err(Fault::new(GrammarErrorKind::ExpectedValue, pos, context()).into()),
            Err(e) => Err(Fault::from_lex(e, context()).into()),
        }
    }

    /// Parses `[ expr ]` and returns whether the statement is kept.
    fn conditional_attribute(&mut self) -> Step<bool> {
        let start = self.cur.pos();
        self.cur.eat_char('[');
        let keep = ConditionParser::new(
            &mut self.cur,
            self.scope.conditions,
            self.depth,
            self.scope.options.limits.max_nesting_depth,
        )
        .evaluate()?;
        self.cur.skip_trivia();
        if !self.cur.eat_char(']') {
            return Err(Fault::new(
                GrammarErrorKind::ExpectedToken(']'),
                self.cur.pos(),
                ParseContext::new("ConditionalAttribute", start),
            )
            .into());
        }
        Ok(keep)
    }
}
