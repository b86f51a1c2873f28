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

//! Parse sessions.
//!
//! A [`Parser`] owns one source buffer, the [`ConditionSet`] that gates
//! conditional statements, the diagnostics collected while parsing, and the
//! resulting [`KeyValues`] tree.
//!
//! # Lifecycle
//!
//! ```text
//! Unloaded --load--> Loaded --parse--> Parsed
//!                       \----parse--> Failed
//! ```
//!
//! Every load resets errors, warnings and the fatal flag. A failed load
//! leaves the session `Failed` with one fatal error recorded.
//!
//! # Examples
//!
//! ```
//! use kvdf_core::{Parser, TargetPlatform};
//!
//! let mut parser = Parser::with_target(TargetPlatform::Linux);
//! parser.load_from_str("\"shader\" \"gl\" [$POSIX]\n\"shader\" \"dx\"");
//! assert!(parser.parse());
//! assert_eq!(parser.key_values().unwrap().get_str("shader", ""), "gl");
//! ```

use crate::conditions::{default_conditions, ConditionSet, TargetPlatform};
use crate::diagnostics::DiagnosticSink;
use crate::error::{ParseError, ParseWarning};
use crate::grammar::{self, GrammarOutput};
use crate::include::IncludeScope;
use crate::key_values::KeyValues;
use crate::limits::Limits;
use crate::source;
use std::io::Write;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Configuration for a parse session.
///
/// ```
/// use kvdf_core::{ParseOptions, TargetPlatform};
///
/// let opts = ParseOptions::builder()
///     .max_nesting_depth(64)
///     .target(TargetPlatform::Windows)
///     .build();
/// assert_eq!(opts.limits.max_nesting_depth, 64);
/// ```
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Resource limits.
    pub limits: Limits,
    /// Platform whose default conditions new sessions start with.
    pub target: TargetPlatform,
    /// Seed the condition set from `target` (default: true).
    pub default_conditions: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            limits: Limits::default(),
            target: TargetPlatform::host(),
            default_conditions: true,
        }
    }
}

impl ParseOptions {
    /// Create a new builder for ParseOptions.
    pub fn builder() -> ParseOptionsBuilder {
        ParseOptionsBuilder::new()
    }
}

/// Builder for [`ParseOptions`].
#[derive(Debug, Clone)]
pub struct ParseOptionsBuilder {
    options: ParseOptions,
}

impl ParseOptionsBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            options: ParseOptions::default(),
        }
    }

    /// Replace all limits at once.
    pub fn limits(mut self, limits: Limits) -> Self {
        self.options.limits = limits;
        self
    }

    /// Set the maximum file size in bytes.
    pub fn max_file_size(mut self, size: usize) -> Self {
        self.options.limits.max_file_size = size;
        self
    }

    /// Set the maximum object and condition nesting depth.
    pub fn max_nesting_depth(mut self, depth: usize) -> Self {
        self.options.limits.max_nesting_depth = depth;
        self
    }

    /// Set the maximum include chain length.
    pub fn max_include_depth(mut self, depth: usize) -> Self {
        self.options.limits.max_include_depth = depth;
        self
    }

    /// Set the platform default conditions are taken from.
    pub fn target(mut self, target: TargetPlatform) -> Self {
        self.options.target = target;
        self
    }

    /// Start sessions with an empty condition set when `false`.
    pub fn default_conditions(mut self, enabled: bool) -> Self {
        self.options.default_conditions = enabled;
        self
    }

    /// Build the ParseOptions.
    pub fn build(self) -> ParseOptions {
        self.options
    }
}

impl Default for ParseOptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParserState {
    Unloaded,
    Loaded,
    Parsed,
    Failed,
}

/// A KeyValues parse session.
#[derive(Debug)]
pub struct Parser {
    options: ParseOptions,
    state: ParserState,
    buffer: Option<Vec<u8>>,
    path: Option<PathBuf>,
    conditions: ConditionSet,
    errors: Vec<ParseError>,
    warnings: Vec<ParseWarning>,
    fatal: bool,
    key_values: Option<KeyValues>,
    sink: DiagnosticSink,
    include_chain: Vec<PathBuf>,
    include_depth: usize,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    /// A session with default options and the host platform's conditions.
    pub fn new() -> Self {
        Self::with_options(ParseOptions::default())
    }

    pub fn with_options(options: ParseOptions) -> Self {
        let conditions = if options.default_conditions {
            default_conditions(options.target)
        } else {
            ConditionSet::new()
        };
        Self {
            options,
            state: ParserState::Unloaded,
            buffer: None,
            path: None,
            conditions,
            errors: Vec::new(),
            warnings: Vec::new(),
            fatal: false,
            key_values: None,
            sink: DiagnosticSink::default(),
            include_chain: Vec::new(),
            include_depth: 0,
        }
    }

    /// A session seeded with the default conditions of `target`.
    pub fn with_target(target: TargetPlatform) -> Self {
        Self::with_options(ParseOptions::builder().target(target).build())
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut parser = Self::new();
        parser.load_from_bytes(bytes);
        parser
    }

    pub fn from_range(bytes: &[u8], range: Range<usize>) -> Self {
        let mut parser = Self::new();
        parser.load_from_range(bytes, range);
        parser
    }

    pub fn from_text(text: &str) -> Self {
        let mut parser = Self::new();
        parser.load_from_str(text);
        parser
    }

    pub fn from_file(path: impl AsRef<Path>) -> Self {
        let mut parser = Self::new();
        parser.load_from_file(path);
        parser
    }

    // ==================== Loading ====================

    /// Loads a copy of `bytes`. A leading UTF-8 BOM is skipped.
    pub fn load_from_bytes(&mut self, bytes: &[u8]) -> bool {
        self.reset(None);
        self.accept(Ok(source::strip_bom(bytes).to_vec()))
    }

    /// Loads `bytes[range]`. An out-of-bounds range is a load error.
    pub fn load_from_range(&mut self, bytes: &[u8], range: Range<usize>) -> bool {
        self.reset(None);
        self.accept(source::read_range(bytes, range))
    }

    pub fn load_from_str(&mut self, text: &str) -> bool {
        self.load_from_bytes(text.as_bytes())
    }

    /// Loads the file at `path`. Relative includes resolve against its
    /// directory.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        self.reset(Some(path.to_path_buf()));
        let loaded = source::read_file(path, &self.options.limits);
        self.accept(loaded)
    }

    /// Loads `path` with a copy of `root`'s condition set.
    pub fn load_from_file_with_root(&mut self, path: impl AsRef<Path>, root: &Parser) -> bool {
        self.conditions = root.conditions.clone();
        self.load_from_file(path)
    }

    fn reset(&mut self, path: Option<PathBuf>) {
        self.errors.clear();
        self.warnings.clear();
        self.fatal = false;
        self.key_values = None;
        self.buffer = None;
        self.path = path;
        self.state = ParserState::Unloaded;
    }

    fn accept(&mut self, loaded: Result<Vec<u8>, ParseError>) -> bool {
        match loaded {
            Ok(bytes) => {
                debug!(
                    path = ?self.path,
                    bytes = bytes.len(),
                    "source loaded"
                );
                self.buffer = Some(bytes);
                self.state = ParserState::Loaded;
                true
            }
            Err(err) => {
                self.record(err, None);
                self.state = ParserState::Failed;
                false
            }
        }
    }

    // ==================== Parsing ====================

    /// Runs the grammar over the loaded buffer.
    ///
    /// Returns `true` and stores the tree when no error was recorded.
    /// Calling this before anything is loaded records a fatal error.
    pub fn parse(&mut self) -> bool {
        let buffer = match self.buffer.take() {
            Some(buffer) => buffer,
            None => {
                if self.state == ParserState::Unloaded {
                    self.record(ParseError::not_loaded(), None);
                    self.state = ParserState::Failed;
                }
                return false;
            }
        };

        self.errors.clear();
        self.warnings.clear();
        self.fatal = false;
        self.key_values = None;

        let ok = match self.run_grammar(&buffer) {
            Ok(output) => self.absorb(output, &buffer),
            Err(err) => {
                self.record(err, None);
                false
            }
        };
        self.buffer = Some(buffer);
        self.state = if ok {
            ParserState::Parsed
        } else {
            ParserState::Failed
        };
        debug!(
            path = ?self.path,
            ok,
            errors = self.errors.len(),
            warnings = self.warnings.len(),
            "parse finished"
        );
        ok
    }

    fn run_grammar(&self, bytes: &[u8]) -> Result<GrammarOutput, ParseError> {
        let text = source::decode(bytes)?;
        let mut chain = self.include_chain.clone();
        if let Some(canonical) = self.path.as_ref().and_then(|p| p.canonicalize().ok()) {
            chain.push(canonical);
        }
        let base_dir = self.path.as_deref().and_then(Path::parent);
        let scope = IncludeScope {
            depth: self.include_depth,
            ..IncludeScope::root(&self.conditions, &self.options, base_dir, &chain)
        };
        Ok(grammar::parse_file(text, scope))
    }

    fn absorb(&mut self, output: GrammarOutput, buffer: &[u8]) -> bool {
        let text = std::str::from_utf8(buffer).ok();
        self.warnings = output.warnings;
        for err in output.errors {
            self.record(err, text);
        }
        match output.tree {
            Some(tree) if self.errors.is_empty() => {
                trace!(entries = tree.len(), "tree stored");
                self.key_values = Some(tree);
                true
            }
            _ => false,
        }
    }

    fn record(&mut self, mut err: ParseError, source: Option<&str>) {
        if err.path.is_none() {
            if let Some(path) = &self.path {
                err.path = Some(path.clone());
            }
        }
        self.fatal |= err.is_fatal();
        self.sink.emit(&err, source);
        self.errors.push(err);
    }

    // ==================== Results ====================

    pub fn state(&self) -> ParserState {
        self.state
    }

    /// The parsed tree, if the last parse succeeded.
    pub fn key_values(&self) -> Option<&KeyValues> {
        self.key_values.as_ref()
    }

    /// Moves the parsed tree out of the session.
    pub fn take_key_values(&mut self) -> Option<KeyValues> {
        self.key_values.take()
    }

    pub fn has_error(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_fatal_error(&self) -> bool {
        self.fatal
    }

    pub fn has_warning(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    /// File the buffer was loaded from.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    // ==================== Conditions ====================

    /// Adds `name`; adding an active condition has no effect.
    pub fn add_condition(&mut self, name: impl Into<String>) {
        self.conditions.insert(name);
    }

    /// Removes `name`, returning whether it was active.
    pub fn remove_condition(&mut self, name: &str) -> bool {
        self.conditions.remove(name)
    }

    pub fn has_condition(&self, name: &str) -> bool {
        self.conditions.contains(name)
    }

    pub fn clear_conditions(&mut self) {
        self.conditions.clear();
    }

    pub fn conditions(&self) -> &ConditionSet {
        &self.conditions
    }

    pub(crate) fn replace_conditions(&mut self, conditions: ConditionSet) {
        self.conditions = conditions;
    }

    pub(crate) fn set_include_chain(&mut self, chain: Vec<PathBuf>, depth: usize) {
        self.include_chain = chain;
        self.include_depth = depth;
    }

    // ==================== Diagnostics ====================

    pub fn set_error_log_to_null(&mut self) {
        self.sink = DiagnosticSink::Null;
    }

    pub fn set_error_log_to_stderr(&mut self) {
        self.sink = DiagnosticSink::Stderr;
    }

    pub fn set_error_log_to_stdout(&mut self) {
        self.sink = DiagnosticSink::Stdout;
    }

    /// Sends rendered errors to `writer`.
    pub fn set_error_log_to(&mut self, writer: impl Write + Send + 'static) {
        self.sink = DiagnosticSink::Custom(Box::new(writer));
    }
}
