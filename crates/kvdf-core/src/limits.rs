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

//! Resource limits for KeyValues parsing.

/// Configurable bounds on the resources a parse may consume.
///
/// Nesting and include depth replace the host call stack as the bound on
/// recursion, so deeply nested or self-referencing input fails with an error
/// instead of overflowing the stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum file size in bytes (default: 64MB).
    pub max_file_size: usize,
    /// Maximum depth of nested objects and parenthesized conditions
    /// (default: 256).
    pub max_nesting_depth: usize,
    /// Maximum length of an `#include`/`#base` chain (default: 32).
    pub max_include_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_file_size: 64 * 1024 * 1024, // 64MB
            max_nesting_depth: 256,
            max_include_depth: 32,
        }
    }
}

impl Limits {
    /// Create limits with no restrictions (for testing).
    pub fn unlimited() -> Self {
        Self {
            max_file_size: usize::MAX,
            max_nesting_depth: usize::MAX,
            max_include_depth: usize::MAX,
        }
    }
}
