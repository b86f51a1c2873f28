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

//! Lexical analysis for KeyValues text.
//!
//! # Module Structure
//!
//! - [`span`] - Source positions for error reporting
//! - [`cursor`] - Character cursor with trivia skipping and backtracking
//! - [`literals`] - Identifier, quoted string, float and integer tokens
//! - [`error`] - Errors raised while tokenizing literals
//!
//! # Examples
//!
//! ```
//! use kvdf_core::lex::{literals, Cursor};
//!
//! let mut cur = Cursor::new("  // comment\n \"key\" 3.5");
//! cur.skip_trivia();
//! assert_eq!(literals::quoted_string(&mut cur), Ok(Some("key".to_string())));
//! cur.skip_trivia();
//! assert_eq!(literals::float(&mut cur), Ok(Some(3.5)));
//! ```

pub mod cursor;
pub mod error;
pub mod literals;
pub mod span;

pub use cursor::{Checkpoint, Cursor};
pub use error::{LexError, LexResult};
pub use span::SourcePos;
