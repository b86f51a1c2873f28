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

//! Core parser and data model for Valve KeyValues (VDF) text.
//!
//! This crate turns KeyValues text into an ordered tree of typed values and
//! stitches several files together through `#include`/`#base` directives and
//! conditional statements gated on a named condition set.
//!
//! ```text
//! "Weapon"
//! {
//!     "damage"  25
//!     "spread"  0.05
//!     "model"   "models/crowbar.mdl"   [$WIN32]
//!     "model"   "models/crowbar_x.mdl" [$X360]
//! }
//! #base "weapon_base.vdf"
//! ```
//!
//! # Parsing
//!
//! For one-shot parsing use [`KeyValues::from_file`] or `str::parse`. For
//! control over conditions, limits and diagnostics use a [`Parser`] session:
//!
//! ```
//! use kvdf_core::{Parser, TargetPlatform};
//!
//! let mut parser = Parser::with_target(TargetPlatform::Xbox360);
//! parser.set_error_log_to_null();
//! parser.load_from_str(r#""Weapon" { "model" "pc.mdl" [$WIN32] "model" "x.mdl" [$X360] }"#);
//! assert!(parser.parse());
//! let weapon = parser.key_values().unwrap().get_object("Weapon").unwrap();
//! assert_eq!(weapon.get_str("model", ""), "x.mdl");
//! ```
//!
//! # Lexical Analysis
//!
//! The [`lex`] module provides the cursor and literal tokenizers the grammar
//! is built on. See its documentation for details.

mod conditional;
mod conditions;
mod diagnostics;
pub mod error;
mod grammar;
mod include;
mod key_values;
pub mod lex;
mod limits;
mod parser;
mod source;
mod value;

pub use conditional::{evaluate_condition, Operand};
pub use conditions::{default_conditions, ConditionSet, TargetPlatform};
pub use diagnostics::{render_error, DiagnosticSink};
pub use error::{GrammarErrorKind, ParseContext, ParseError, ParseFailure, ParseWarning, Severity};
pub use include::MergeOutcome;
pub use key_values::KeyValues;
pub use limits::Limits;
pub use parser::{ParseOptions, ParseOptionsBuilder, Parser, ParserState};
pub use value::Value;
