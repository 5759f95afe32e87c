// SPDX-License-Identifier: MIT

use super::*;

#[test]
fn nested_patch_builds_a_single_level_object() {
    let patch = nested_patch("workspace_dir", Value::String("/tmp/x".into()));
    assert_eq!(patch, serde_json::json!({ "workspace_dir": "/tmp/x" }));
}

#[test]
fn nested_patch_builds_nested_objects_from_dotted_keys() {
    let patch = nested_patch("large_model.name", Value::String("llama3".into()));
    assert_eq!(patch, serde_json::json!({ "large_model": { "name": "llama3" } }));
}

#[test]
fn parse_value_coerces_booleans_and_numbers() {
    assert_eq!(parse_value("true"), Value::Bool(true));
    assert_eq!(parse_value("42"), Value::from(42));
    assert_eq!(parse_value("3.5"), Value::from(3.5));
    assert_eq!(parse_value("gpu"), Value::String("gpu".into()));
}