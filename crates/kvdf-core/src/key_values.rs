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

//! The KeyValues tree.
//!
//! A [`KeyValues`] maps exact, case-sensitive keys to [`Value`]s. Keys keep
//! the order they were first inserted in, and a key that is already present
//! is never overwritten: the first insert wins. The same rule applies when
//! whole trees are merged with [`append`](KeyValues::append) or
//! [`merge_with`](KeyValues::merge_with).
//!
//! ```
//! use kvdf_core::KeyValues;
//!
//! let kv: KeyValues = r#""speed" "1.5" "count" 3 "count" 4"#.parse().unwrap();
//! assert_eq!(kv.get_int("count", 0), 3);
//! assert_eq!(kv.get_str("speed", ""), "1.5");
//! assert_eq!(kv.get_float("speed", 9.0), 9.0);
//! ```

use crate::conditions::{default_conditions, ConditionSet, TargetPlatform};
use crate::error::ParseFailure;
use crate::include::{self, MergeOutcome};
use crate::parser::Parser;
use crate::value::Value;
use indexmap::map::Entry;
use indexmap::IndexMap;
use std::path::Path;
use std::str::FromStr;

/// An insertion-ordered map from keys to values with first-wins inserts.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct KeyValues {
    entries: IndexMap<String, Value>,
}

impl KeyValues {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a byte buffer with the host platform's default conditions.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ParseFailure> {
        let mut parser = Parser::from_bytes(bytes);
        parser.set_error_log_to_null();
        finish(parser)
    }

    /// Loads and parses a file with the host platform's default conditions.
    /// Includes resolve relative to the file's directory.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ParseFailure> {
        let mut parser = Parser::new();
        parser.set_error_log_to_null();
        parser.load_from_file(path.as_ref());
        finish(parser)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    /// Inserts `value` under `key` unless the key is already present.
    ///
    /// Returns `true` if the value was stored, `false` if it was discarded
    /// because an earlier entry owns the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> bool {
        match self.entries.entry(key.into()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(value.into());
                true
            }
        }
    }

    /// Removes `key`, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    /// Copies every entry of `other` whose key is not yet present.
    pub fn append(&mut self, other: &KeyValues) {
        for (key, value) in other {
            if !self.contains_key(key) {
                self.entries.insert(key.clone(), value.clone());
            }
        }
    }

    /// Parses the file at `path` with the host platform's default conditions
    /// and merges its root entries into this tree, first-wins.
    ///
    /// On failure the tree is left unchanged.
    pub fn merge_with(&mut self, path: impl AsRef<Path>) -> MergeOutcome {
        let conditions = default_conditions(TargetPlatform::host());
        self.merge_with_conditions(path, &conditions)
    }

    /// Like [`merge_with`](Self::merge_with) with an explicit condition set.
    pub fn merge_with_conditions(
        &mut self,
        path: impl AsRef<Path>,
        conditions: &ConditionSet,
    ) -> MergeOutcome {
        include::merge_file(self, path.as_ref(), conditions)
    }

    /// Integer stored under `key`, or `default` if absent or not an integer.
    pub fn get_int(&self, key: &str, default: i32) -> i32 {
        self.get(key).and_then(Value::as_int).unwrap_or(default)
    }

    /// Float stored under `key`, or `default` if absent or not a float.
    pub fn get_float(&self, key: &str, default: f32) -> f32 {
        self.get(key).and_then(Value::as_float).unwrap_or(default)
    }

    /// String stored under `key`, or `default` if absent or not a string.
    pub fn get_str<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).and_then(Value::as_str).unwrap_or(default)
    }

    /// Truthiness of the value under `key`, or `default` if absent.
    ///
    /// See [`Value::truthy`] for the coercion rules.
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.get(key).map(Value::truthy).unwrap_or(default)
    }

    /// Nested object stored under `key`.
    pub fn get_object(&self, key: &str) -> Option<&KeyValues> {
        self.get(key).and_then(Value::as_object)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.values()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.entries.iter()
    }
}

fn finish(mut parser: Parser) -> Result<KeyValues, ParseFailure> {
    if parser.parse() {
        if let Some(tree) = parser.take_key_values() {
            return Ok(tree);
        }
    }
    Err(ParseFailure {
        errors: parser.errors().to_vec(),
    })
}

impl FromStr for KeyValues {
    type Err = ParseFailure;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bytes(s.as_bytes())
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for KeyValues {
    /// First-wins: pairs whose key is already present are dropped.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for KeyValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut kv = KeyValues::new();
        kv.extend(iter);
        kv
    }
}

impl IntoIterator for KeyValues {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a KeyValues {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
