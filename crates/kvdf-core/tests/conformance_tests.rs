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

//! KeyValues Conformance Tests
//!
//! End-to-end behavior of the public API: tree structure, duplicate keys,
//! conditional gating, includes and literal classification.

use kvdf_core::error::{INCLUDE_CYCLE, INCLUDE_MISSING, INCLUDE_TOO_DEEP, INCLUDE_UNPARSABLE};
use kvdf_core::{
    ConditionSet, GrammarErrorKind, KeyValues, MergeOutcome, ParseOptions, Parser, TargetPlatform,
    Value,
};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn session(conditions: &[&str]) -> Parser {
    let mut parser = Parser::with_options(ParseOptions::builder().default_conditions(false).build());
    parser.set_error_log_to_null();
    for name in conditions {
        parser.add_condition(*name);
    }
    parser
}

fn parse_with(src: &str, conditions: &[&str]) -> KeyValues {
    let mut parser = session(conditions);
    assert!(parser.load_from_str(src));
    assert!(parser.parse(), "parse failed: {:?}", parser.errors());
    parser.take_key_values().unwrap()
}

fn write(dir: &TempDir, name: &str, text: &str) -> PathBuf {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, text).unwrap();
    path
}

// =============================================================================
// Structure
// =============================================================================

#[test]
fn test_round_trip_structure() {
    let kv = parse_with(r#""A" { "B" "c" }"#, &[]);
    assert_eq!(kv.len(), 1);
    let a = kv.get_object("A").unwrap();
    assert_eq!(a.len(), 1);
    assert_eq!(a.get("B"), Some(&Value::String("c".into())));
}

#[test]
fn test_realistic_document() {
    let src = r##"
// Weapon script
"WeaponData"
{
    "printname"     "#HL2_Crowbar"
    "damage"        25
    "rumble"        -1
    "clip_size"     0xFF
    "spread"        0.05
    "BuiltRightHanded" "1"
    SoundData
    {
        "single_shot"   "Weapon_Crowbar.Single"
        melee_miss      Weapon_Crowbar_Miss
    }
}
"##;
    let kv = parse_with(src, &[]);
    let data = kv.get_object("WeaponData").unwrap();
    assert_eq!(data.get_str("printname", ""), "#HL2_Crowbar");
    assert_eq!(data.get_int("damage", 0), 25);
    assert_eq!(data.get_int("rumble", 0), -1);
    assert_eq!(data.get_int("clip_size", 0), 255);
    assert_eq!(data.get_float("spread", 0.0), 0.05);
    assert!(!data.get_bool("BuiltRightHanded", true));
    let sounds = data.get_object("SoundData").unwrap();
    assert_eq!(sounds.get_str("single_shot", ""), "Weapon_Crowbar.Single");
    assert_eq!(sounds.get_str("melee_miss", ""), "Weapon_Crowbar_Miss");
}

#[test]
fn test_iteration_follows_source_order() {
    let kv = parse_with("z 1 a 2 m 3", &[]);
    let keys: Vec<_> = kv.keys().collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
}

// =============================================================================
// First-wins duplicates
// =============================================================================

#[test]
fn test_duplicate_keys_first_wins() {
    let kv = parse_with(r#""K" "1" "K" "2""#, &[]);
    assert_eq!(kv.get_str("K", ""), "1");
    assert_eq!(kv.len(), 1);
}

#[test]
fn test_duplicate_object_keys_are_not_merged() {
    let kv = parse_with("o { a 1 } o { b 2 }", &[]);
    let o = kv.get_object("o").unwrap();
    assert!(o.contains_key("a"));
    assert!(!o.contains_key("b"));
}

// =============================================================================
// Conditional gating
// =============================================================================

#[test]
fn test_conditional_gating() {
    let src = r#""K" "v" [$A && !$B]"#;
    assert_eq!(parse_with(src, &["A"]).get_str("K", ""), "v");
    assert!(!parse_with(src, &["A", "B"]).contains_key("K"));
    assert!(!parse_with(src, &[]).contains_key("K"));
}

#[test]
fn test_short_circuit_evaluation() {
    let src = r#""K" "v" [!$MISSING && $ALSOMISSING]"#;
    assert!(!parse_with(src, &[]).contains_key("K"));
    let src = r#""K" "v" [$PRESENT || $ALSOMISSING]"#;
    assert!(parse_with(src, &["PRESENT"]).contains_key("K"));
}

#[test]
fn test_platform_variants() {
    let src = r#"
"model" "models/pc.mdl"  [$WIN32]
"model" "models/x.mdl"   [$X360]
"ui"    "mac"            [$OSX]
"ui"    "linux"          [$LINUX]
"ui"    "default"
"#;
    let mut parser = Parser::with_target(TargetPlatform::Linux);
    parser.set_error_log_to_null();
    parser.load_from_str(src);
    assert!(parser.parse());
    let kv = parser.key_values().unwrap();
    assert_eq!(kv.get_str("model", ""), "models/pc.mdl");
    assert_eq!(kv.get_str("ui", ""), "linux");

    let mut parser = Parser::with_target(TargetPlatform::Xbox360);
    parser.set_error_log_to_null();
    parser.load_from_str(src);
    assert!(parser.parse());
    let kv = parser.key_values().unwrap();
    assert_eq!(kv.get_str("model", ""), "models/x.mdl");
    assert_eq!(kv.get_str("ui", ""), "default");
}

// =============================================================================
// Literal classification
// =============================================================================

#[test]
fn test_numeric_literal_classification() {
    let kv = parse_with("f 3.14\nh 0x1A\ni 42\nn -5", &[]);
    assert_eq!(kv.get("f"), Some(&Value::Float(3.14)));
    assert_eq!(kv.get("h"), Some(&Value::Int(26)));
    assert_eq!(kv.get("i"), Some(&Value::Int(42)));
    assert_eq!(kv.get("n"), Some(&Value::Int(-5)));
}

#[test]
fn test_hex_wraps_to_negative() {
    let kv = parse_with("mask 0xFFFFFFFF", &[]);
    assert_eq!(kv.get_int("mask", 0), -1);
}

#[test]
fn test_quoted_numbers_stay_strings() {
    let kv = parse_with(r#""n" "42""#, &[]);
    assert_eq!(kv.get_int("n", -1), -1);
    assert_eq!(kv.get_str("n", ""), "42");
}

#[test]
fn test_escape_decoding() {
    let kv = parse_with(r#""S" "a\nb""#, &[]);
    assert_eq!(kv.get_str("S", ""), "a\nb");
}

#[test]
fn test_unicode_identifiers_and_strings() {
    let kv = parse_with("größe \"ä ö ü\"", &[]);
    assert_eq!(kv.get_str("größe", ""), "ä ö ü");
}

#[test]
fn test_comments_are_ignored() {
    let kv = parse_with("// leading\na 1 // trailing\n// b 2\n", &[]);
    assert_eq!(kv.len(), 1);
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_decimal_overflow_is_an_error() {
    let mut parser = session(&[]);
    parser.load_from_str("big 4294967296");
    assert!(!parser.parse());
    assert_eq!(
        parser.errors()[0].code,
        GrammarErrorKind::IntegerOutOfRange(String::new()).code()
    );
}

#[test]
fn test_float_overflow_is_an_error() {
    let mut parser = session(&[]);
    parser.load_from_str("ok 1\nhuge 1e99999\nafter 2");
    assert!(!parser.parse());
    assert!(parser.key_values().is_none());
    let err = &parser.errors()[0];
    assert_eq!(err.code, 23);
    assert_eq!((err.line(), err.column()), (2, 6));
    assert_eq!(err.message, "float literal '1e99999' is out of range");
    assert!(!parser.has_fatal_error());
}

#[test]
fn test_error_positions_are_one_based() {
    let mut parser = session(&[]);
    parser.load_from_str("ok 1\nbad \"x\\z\"");
    assert!(!parser.parse());
    let err = &parser.errors()[0];
    assert_eq!((err.line(), err.column()), (2, 8));
    assert_eq!(err.message, "invalid escape sequence '\\z'");
}

// =============================================================================
// Includes
// =============================================================================

#[test]
fn test_include_merge_precedence() {
    let dir = TempDir::new().unwrap();
    write(&dir, "inc.vdf", "\"K\" \"2\"\n\"J\" \"3\"");
    let main = write(&dir, "main.vdf", "\"K\" \"1\"\n#include \"inc.vdf\"");
    let mut parser = session(&[]);
    assert!(parser.load_from_file(&main));
    assert!(parser.parse());
    let kv = parser.key_values().unwrap();
    assert_eq!(kv.get_str("K", ""), "1");
    assert_eq!(kv.get_str("J", ""), "3");
}

#[test]
fn test_include_before_statements_takes_precedence() {
    let dir = TempDir::new().unwrap();
    write(&dir, "inc.vdf", "\"K\" \"included\"");
    let main = write(&dir, "main.vdf", "#base \"inc.vdf\"\n\"K\" \"local\"");
    let kv = KeyValues::from_file(&main).unwrap();
    assert_eq!(kv.get_str("K", ""), "included");
}

#[test]
fn test_include_inside_object_merges_at_that_level() {
    let dir = TempDir::new().unwrap();
    write(&dir, "sounds.vdf", "fire \"shot.wav\"");
    let main = write(&dir, "main.vdf", "weapon { #include \"sounds.vdf\" name crowbar }");
    let kv = KeyValues::from_file(&main).unwrap();
    let weapon = kv.get_object("weapon").unwrap();
    assert_eq!(weapon.get_str("fire", ""), "shot.wav");
    assert!(!kv.contains_key("fire"));
}

#[test]
fn test_nested_include_resolves_relative_to_includer() {
    let dir = TempDir::new().unwrap();
    write(&dir, "sub/leaf.vdf", "leaf 1");
    write(&dir, "sub/mid.vdf", "#include \"leaf.vdf\"\nmid 1");
    let main = write(&dir, "main.vdf", "#include \"sub/mid.vdf\"");
    let kv = KeyValues::from_file(&main).unwrap();
    assert_eq!(kv.get_int("leaf", 0), 1);
    assert_eq!(kv.get_int("mid", 0), 1);
}

#[test]
fn test_missing_include_is_non_fatal() {
    let mut parser = session(&[]);
    parser.load_from_str("#include \"absent.vdf\"\n\"K\" \"v\"");
    assert!(parser.parse());
    assert!(parser.has_warning());
    assert_eq!(parser.warnings()[0].code, INCLUDE_MISSING);
    assert_eq!(parser.warnings()[0].message, "Could not find 'absent.vdf'.");
    assert_eq!(parser.key_values().unwrap().get_str("K", ""), "v");
}

#[test]
fn test_unparsable_include_is_non_fatal() {
    let dir = TempDir::new().unwrap();
    write(&dir, "broken.vdf", "a { b");
    let main = write(&dir, "main.vdf", "#include \"broken.vdf\"\nok 1");
    let mut parser = session(&[]);
    parser.load_from_file(&main);
    assert!(parser.parse());
    assert!(!parser.has_error());
    assert_eq!(parser.warnings()[0].code, INCLUDE_UNPARSABLE);
    assert_eq!(parser.warnings()[0].message, "'broken.vdf' could not be parsed.");
}

#[test]
fn test_mutual_includes_stop_at_cycle() {
    let dir = TempDir::new().unwrap();
    write(&dir, "a.vdf", "from_a 1\n#include \"b.vdf\"");
    write(&dir, "b.vdf", "from_b 1\n#include \"a.vdf\"");
    let mut parser = session(&[]);
    parser.load_from_file(dir.path().join("a.vdf"));
    assert!(parser.parse());
    let kv = parser.key_values().unwrap();
    assert!(kv.contains_key("from_a"));
    assert!(kv.contains_key("from_b"));
    assert_eq!(parser.warnings().len(), 1);
    assert_eq!(parser.warnings()[0].code, INCLUDE_CYCLE);
    assert_eq!(parser.warnings()[0].message, "'a.vdf' is already being included.");
}

#[test]
fn test_warnings_from_nested_includes_reach_the_root() {
    let dir = TempDir::new().unwrap();
    write(&dir, "b.vdf", "#include \"c_absent.vdf\"\nb 1");
    let main = write(&dir, "a.vdf", "#include \"b.vdf\"\na 1");
    let mut parser = session(&[]);
    parser.load_from_file(&main);
    assert!(parser.parse());
    let kv = parser.key_values().unwrap();
    assert_eq!(kv.get_int("a", 0), 1);
    assert_eq!(kv.get_int("b", 0), 1);
    assert!(parser.has_warning());
    assert_eq!(parser.warnings().len(), 1);
    assert_eq!(parser.warnings()[0].code, INCLUDE_MISSING);
    assert_eq!(parser.warnings()[0].message, "Could not find 'c_absent.vdf'.");
}

#[test]
fn test_self_include_warns() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "self.vdf", "#include \"self.vdf\"\na 1");
    let mut parser = session(&[]);
    parser.load_from_file(&path);
    assert!(parser.parse());
    assert_eq!(parser.warnings()[0].code, INCLUDE_CYCLE);
}

#[test]
fn test_include_depth_limit() {
    let dir = TempDir::new().unwrap();
    write(&dir, "c.vdf", "c 1");
    write(&dir, "b.vdf", "#include \"c.vdf\"\nb 1");
    let main = write(&dir, "a.vdf", "#include \"b.vdf\"\na 1");
    let mut parser = Parser::with_options(ParseOptions::builder().max_include_depth(1).build());
    parser.set_error_log_to_null();
    parser.load_from_file(&main);
    assert!(parser.parse());
    let kv = parser.key_values().unwrap();
    assert!(kv.contains_key("b"));
    assert!(!kv.contains_key("c"));
    assert_eq!(parser.warnings().len(), 1);
    assert_eq!(parser.warnings()[0].code, INCLUDE_TOO_DEEP);

    let mut parser = Parser::with_options(ParseOptions::builder().max_include_depth(0).build());
    parser.set_error_log_to_null();
    parser.load_from_file(&main);
    assert!(parser.parse());
    assert_eq!(parser.warnings()[0].code, INCLUDE_TOO_DEEP);
}

#[test]
fn test_includes_inherit_conditions() {
    let dir = TempDir::new().unwrap();
    write(&dir, "inc.vdf", "gated 1 [$FEATURE]");
    let main = write(&dir, "main.vdf", "#include \"inc.vdf\"");
    let mut parser = session(&["FEATURE"]);
    parser.load_from_file(&main);
    assert!(parser.parse());
    assert!(parser.key_values().unwrap().contains_key("gated"));
}

// =============================================================================
// Standalone merge
// =============================================================================

#[test]
fn test_merge_with_outcomes() {
    let dir = TempDir::new().unwrap();
    let extra = write(&dir, "extra.vdf", "a 100\nb 2");
    let broken = write(&dir, "broken.vdf", "\"open");
    let mut kv = KeyValues::new();
    kv.insert("a", 1);

    assert_eq!(kv.merge_with(&extra), MergeOutcome::Success);
    assert_eq!(kv.get_int("a", 0), 1);
    assert_eq!(kv.get_int("b", 0), 2);

    let snapshot = kv.clone();
    assert_eq!(kv.merge_with(&broken), MergeOutcome::ParseFail);
    assert_eq!(kv.merge_with(dir.path().join("nope.vdf")), MergeOutcome::FileMissing);
    assert_eq!(kv, snapshot);
}

#[test]
fn test_merge_with_conditions() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "extra.vdf", "a 1 [$ON]\nb 2 [!$ON]");
    let conditions: ConditionSet = ["ON"].into_iter().collect();
    let mut kv = KeyValues::new();
    assert!(kv.merge_with_conditions(&path, &conditions).is_success());
    assert!(kv.contains_key("a"));
    assert!(!kv.contains_key("b"));
}
