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

//! Value types stored in a [`KeyValues`] tree.

use crate::key_values::KeyValues;
use std::fmt;

/// A value in a KeyValues tree.
///
/// With the `serde` feature, values serialize untagged: strings and numbers
/// as JSON scalars, objects as maps.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    /// Identifier or quoted string.
    String(String),
    /// 32-bit signed integer literal (decimal or `0x` hex).
    Int(i32),
    /// 32-bit float literal.
    Float(f32),
    /// Nested `{ ... }` object.
    Object(KeyValues),
}

impl Value {
    /// Short name of the variant, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Object(_) => "object",
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// Try to get the value as a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the value as an integer.
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get the value as a float.
    pub fn as_float(&self) -> Option<f32> {
        match self {
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get the value as a nested object.
    pub fn as_object(&self) -> Option<&KeyValues> {
        match self {
            Self::Object(kv) => Some(kv),
            _ => None,
        }
    }

    /// Mutable access to a nested object.
    pub fn as_object_mut(&mut self) -> Option<&mut KeyValues> {
        match self {
            Self::Object(kv) => Some(kv),
            _ => None,
        }
    }

    /// Loose truthiness used by [`KeyValues::get_bool`].
    ///
    /// Numbers are true when non-zero, strings when they equal `"true"`
    /// ignoring case and surrounding whitespace, objects when non-empty.
    pub fn truthy(&self) -> bool {
        match self {
            Self::Int(n) => *n != 0,
            Self::Float(n) => *n != 0.0,
            Self::String(s) => s.trim().eq_ignore_ascii_case("true"),
            Self::Object(kv) => !kv.is_empty(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{}", s),
            Self::Int(n) => write!(f, "{}", n),
            Self::Float(n) => write!(f, "{}", n),
            Self::Object(kv) => write!(f, "{{{} entries}}", kv.len()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Int(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Self::Float(n)
    }
}

impl From<KeyValues> for Value {
    fn from(kv: KeyValues) -> Self {
        Self::Object(kv)
    }
}
