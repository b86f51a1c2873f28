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

//! Print command - indented text view of a parsed tree

use super::parse_file;
use crate::cli::ConditionArgs;
use crate::error::CliError;
use kvdf_core::{KeyValues, Value};
use std::io::{self, Write};

/// Parse `file` and print its tree to stdout, as indented text or, with
/// `json`, as pretty-printed JSON.
///
/// # Errors
///
/// Returns `Err` if the file cannot be loaded or parsed, the tree cannot be
/// serialized, or stdout cannot be written.
///
/// # Examples
///
/// ```no_run
/// use kvdf_cli::cli::ConditionArgs;
/// use kvdf_cli::commands::print;
///
/// # fn main() -> Result<(), kvdf_cli::error::CliError> {
/// print("scripts/weapon_crowbar.txt", &ConditionArgs::default(), false)?;
/// # Ok(())
/// # }
/// ```
pub fn print(file: &str, conditions: &ConditionArgs, json: bool) -> Result<(), CliError> {
    let parser = parse_file(file, conditions)?;
    let empty = KeyValues::new();
    let kv = parser.key_values().unwrap_or(&empty);
    let text = if json {
        let mut text = serde_json::to_string_pretty(kv)?;
        text.push('\n');
        text
    } else {
        format_tree(kv)
    };
    let mut out = io::stdout().lock();
    out.write_all(text.as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Formats `kv` as one `key: value` line per entry. Nested objects open
/// with `key: {`, are indented one tab deeper and close with `}`. Keys and
/// string values containing whitespace are quoted.
///
/// ```
/// use kvdf_cli::commands::format_tree;
///
/// let kv: kvdf_core::KeyValues = "a 1 b { \"c d\" x }".parse().unwrap();
/// assert_eq!(format_tree(&kv), "a: 1\nb: {\n\t\"c d\": x\n}\n");
/// ```
pub fn format_tree(kv: &KeyValues) -> String {
    let mut out = String::new();
    write_tree(&mut out, kv, 0);
    out
}

fn write_tree(out: &mut String, kv: &KeyValues, indent: usize) {
    for (key, value) in kv {
        push_indent(out, indent);
        push_name(out, key);
        out.push_str(": ");
        match value {
            Value::Object(child) => {
                out.push_str("{\n");
                write_tree(out, child, indent + 1);
                push_indent(out, indent);
                out.push('}');
            }
            Value::String(s) => push_name(out, s),
            other => out.push_str(&other.to_string()),
        }
        out.push('\n');
    }
}

fn push_indent(out: &mut String, indent: usize) {
    for _ in 0..indent {
        out.push('\t');
    }
}

fn push_name(out: &mut String, name: &str) {
    if name.contains(|c: char| matches!(c, ' ' | '\t' | '\n')) {
        out.push('"');
        out.push_str(name);
        out.push('"');
    } else {
        out.push_str(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_scalars() {
        let mut kv = KeyValues::new();
        kv.insert("name", "crowbar");
        kv.insert("damage", 25);
        kv.insert("spread", 0.5f32);
        assert_eq!(format_tree(&kv), "name: crowbar\ndamage: 25\nspread: 0.5\n");
    }

    #[test]
    fn test_format_quotes_whitespace() {
        let mut kv = KeyValues::new();
        kv.insert("print name", "Crow Bar");
        kv.insert("tabbed", "a\tb");
        assert_eq!(
            format_tree(&kv),
            "\"print name\": \"Crow Bar\"\ntabbed: \"a\tb\"\n"
        );
    }

    #[test]
    fn test_format_nested_indentation() {
        let mut inner = KeyValues::new();
        inner.insert("x", 1);
        let mut middle = KeyValues::new();
        middle.insert("inner", inner);
        let mut kv = KeyValues::new();
        kv.insert("outer", middle);
        assert_eq!(
            format_tree(&kv),
            "outer: {\n\tinner: {\n\t\tx: 1\n\t}\n}\n"
        );
    }

    #[test]
    fn test_format_empty() {
        assert_eq!(format_tree(&KeyValues::new()), "");
        let mut kv = KeyValues::new();
        kv.insert("empty", KeyValues::new());
        assert_eq!(format_tree(&kv), "empty: {\n}\n");
    }
}
