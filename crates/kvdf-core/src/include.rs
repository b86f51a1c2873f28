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

//! `#include`/`#base` resolution and standalone file merging.
//!
//! Resolving an include runs the whole pipeline (load, lex, grammar, fold)
//! on another file in a nested [`Parser`] and hands back its root tree.
//! Failures never fail the including parse; they become [`ParseWarning`]s:
//!
//! | Code | Condition |
//! |------|-----------|
//! | 1 | the file could not be loaded |
//! | 2 | the file loaded but did not parse |
//! | 3 | the file is already on the active include chain |
//! | 4 | the chain is deeper than [`Limits::max_include_depth`](crate::Limits) |

use crate::conditions::ConditionSet;
use crate::error::ParseWarning;
use crate::key_values::KeyValues;
use crate::parser::{ParseOptions, Parser};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Result of [`KeyValues::merge_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MergeOutcome {
    /// The file parsed and its entries were merged first-wins.
    Success,
    /// The file could not be loaded. The tree is unchanged.
    FileMissing,
    /// The file loaded but did not parse. The tree is unchanged.
    ParseFail,
}

impl MergeOutcome {
    pub fn is_success(&self) -> bool {
        *self == MergeOutcome::Success
    }
}

/// What an include inherits from the session that issues it.
#[derive(Debug, Clone, Copy)]
pub(crate) struct IncludeScope<'a> {
    pub conditions: &'a ConditionSet,
    pub options: &'a ParseOptions,
    /// Directory of the including file, if it came from a file.
    pub base_dir: Option<&'a Path>,
    /// Canonical paths of the files currently being parsed, outermost first.
    pub chain: &'a [PathBuf],
    /// Number of include hops above the current file.
    pub depth: usize,
}

impl<'a> IncludeScope<'a> {
    /// Scope of a top-level parse. Nested sessions override `depth`.
    pub(crate) fn root(
        conditions: &'a ConditionSet,
        options: &'a ParseOptions,
        base_dir: Option<&'a Path>,
        chain: &'a [PathBuf],
    ) -> Self {
        Self {
            conditions,
            options,
            base_dir,
            chain,
            depth: 0,
        }
    }
}

/// Resolves `written` against the including file's directory, falling back
/// to the path as written when that candidate does not exist.
pub(crate) fn resolve_path(written: &str, base_dir: Option<&Path>) -> PathBuf {
    let path = Path::new(written);
    if path.is_relative() {
        if let Some(candidate) = base_dir.map(|dir| dir.join(path)) {
            if candidate.exists() {
                return candidate;
            }
        }
    }
    path.to_path_buf()
}

/// Parses the file named by an include directive.
///
/// Warnings raised while resolving, including those from the included
/// file's own includes, are appended to `warnings`. Returns the included
/// root tree, or `None` when the include was skipped.
pub(crate) fn resolve(
    written: &str,
    scope: &IncludeScope<'_>,
    warnings: &mut Vec<ParseWarning>,
) -> Option<KeyValues> {
    if scope.depth >= scope.options.limits.max_include_depth {
        warnings.push(ParseWarning::include_too_deep(written));
        return None;
    }

    let path = resolve_path(written, scope.base_dir);
    let canonical = match path.canonicalize() {
        Ok(canonical) => canonical,
        Err(_) => {
            warnings.push(ParseWarning::include_missing(written));
            return None;
        }
    };
    if scope.chain.contains(&canonical) {
        warnings.push(ParseWarning::include_cycle(written));
        return None;
    }

    debug!(path = %path.display(), depth = scope.depth + 1, "resolving include");
    let mut nested = Parser::with_options(scope.options.clone());
    nested.set_error_log_to_null();
    nested.replace_conditions(scope.conditions.clone());
    nested.set_include_chain(scope.chain.to_vec(), scope.depth + 1);

    if !nested.load_from_file(&path) {
        warnings.push(ParseWarning::include_missing(written));
        return None;
    }
    let parsed = nested.parse();
    warnings.extend_from_slice(nested.warnings());
    if !parsed {
        for error in nested.errors() {
            debug!(path = %path.display(), "{}", error);
        }
        warnings.push(ParseWarning::include_unparsable(written));
        return None;
    }
    Some(nested.take_key_values().unwrap_or_default())
}

/// Runs a fresh session on `path` and merges its root into `dest`.
pub(crate) fn merge_file(
    dest: &mut KeyValues,
    path: &Path,
    conditions: &ConditionSet,
) -> MergeOutcome {
    let mut parser = Parser::new();
    parser.set_error_log_to_null();
    parser.replace_conditions(conditions.clone());

    let shown = path.display().to_string();
    if !parser.load_from_file(path) {
        warn!("{}", ParseWarning::include_missing(&shown));
        return MergeOutcome::FileMissing;
    }
    let parsed = parser.parse();
    for warning in parser.warnings() {
        warn!("{}", warning);
    }
    if !parsed {
        warn!("{}", ParseWarning::include_unparsable(&shown));
        return MergeOutcome::ParseFail;
    }
    if let Some(tree) = parser.take_key_values() {
        dest.extend(tree);
    }
    MergeOutcome::Success
}
