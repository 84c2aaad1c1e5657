//! CLI binary integration tests using assert_cmd + predicates.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin("schemaref").expect("binary should exist")
}

fn linked_list_doc() -> String {
    json!({
        "openapi": "3.0.0",
        "components": {
            "schemas": {
                "Node": {
                    "type": "object",
                    "properties": {
                        "value": { "$ref": "#/components/schemas/Value" },
                        "next": { "$ref": "#/components/schemas/Node" }
                    }
                },
                "Value": { "type": "string" }
            }
        }
    })
    .to_string()
}

fn write_input(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn stdout_json(output: &[u8]) -> Value {
    serde_json::from_slice(output).expect("stdout should be valid JSON")
}

// ── List ────────────────────────────────────────────────────────────────────

#[test]
fn test_list_names() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "api.json", &linked_list_doc());

    cmd()
        .args(["list", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout("Node\nValue\n");
}

#[test]
fn test_list_filter() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "api.json", &linked_list_doc());

    cmd()
        .args(["list", input.to_str().unwrap(), "--filter", "VAL"])
        .assert()
        .success()
        .stdout("Value\n");
}

// ── Resolve one schema ──────────────────────────────────────────────────────

#[test]
fn test_resolve_single_to_stdout() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "api.json", &linked_list_doc());

    let assert = cmd()
        .args(["resolve", input.to_str().unwrap(), "--schema", "Node"])
        .assert()
        .success();

    let value = stdout_json(&assert.get_output().stdout);
    assert_eq!(value["ok"], json!(true));
    assert_eq!(value["document"]["$ref"], json!("#/$defs/Node"));
    assert_eq!(
        value["document"]["$defs"]["Node"]["properties"]["next"],
        json!({ "$ref": "#" })
    );
    assert_eq!(
        value["document"]["$defs"]["Node"]["properties"]["value"],
        json!({ "$ref": "#/$defs/Value" })
    );
}

#[test]
fn test_resolve_single_to_file_compact() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "api.json", &linked_list_doc());
    let output = dir.path().join("out.json");

    cmd()
        .args(["resolve", input.to_str().unwrap(), "-s", "Value"])
        .args(["-o", output.to_str().unwrap()])
        .args(["--format", "compact"])
        .assert()
        .success();

    let content = fs::read_to_string(&output).expect("output file should exist");
    assert_eq!(content.lines().count(), 1, "compact output is one line");
    let value: Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value["document"]["$defs"]["Value"], json!({ "type": "string" }));
}

#[test]
fn test_resolve_inline_mode() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "api.json", &linked_list_doc());

    let assert = cmd()
        .args(["resolve", input.to_str().unwrap(), "-s", "Node", "--mode", "inline"])
        .assert()
        .success();

    let value = stdout_json(&assert.get_output().stdout);
    assert_eq!(value["properties"]["value"], json!({ "type": "string" }));
    assert_eq!(
        value["properties"]["next"]["properties"]["next"],
        json!({ "$ref": "#/components/schemas/Node" })
    );
}

#[test]
fn test_unknown_schema_fails() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "api.json", &linked_list_doc());

    cmd()
        .args(["resolve", input.to_str().unwrap(), "-s", "Missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown schema: Missing"));
}

#[test]
fn test_depth_limit_reports_failure() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "api.json", &linked_list_doc());

    let assert = cmd()
        .args(["resolve", input.to_str().unwrap(), "-s", "Node"])
        .args(["--max-depth", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Resolution of Node failed"));

    let value = stdout_json(&assert.get_output().stdout);
    assert_eq!(value["ok"], json!(false));
    assert_eq!(value["error"]["kind"], json!("depth_exceeded"));
}

#[test]
fn test_options_file() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "api.json", &linked_list_doc());
    let options = write_input(
        &dir,
        "options.json",
        r#"{ "draft": "http://json-schema.org/draft-07/schema#" }"#,
    );

    let assert = cmd()
        .args(["resolve", input.to_str().unwrap(), "-s", "Value"])
        .args(["--options", options.to_str().unwrap()])
        .assert()
        .success();

    let value = stdout_json(&assert.get_output().stdout);
    assert_eq!(
        value["document"]["$schema"],
        json!("http://json-schema.org/draft-07/schema#")
    );
}

// ── Error Handling ──────────────────────────────────────────────────────────

#[test]
fn test_missing_input_file() {
    cmd()
        .args(["resolve", "/nonexistent/api.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open input file"));
}

#[test]
fn test_invalid_json_input() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "bad.json", "{ not json");

    cmd()
        .args(["resolve", input.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse document"));
}

#[test]
fn test_plain_json_schema_rejected() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "schema.json", r#"{ "type": "object" }"#);

    cmd()
        .args(["list", input.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not supported yet"));
}

#[test]
fn test_long_reference_chain_with_default_limits() {
    let dir = TempDir::new().unwrap();
    let mut schemas = serde_json::Map::new();
    for i in 0..500 {
        schemas.insert(
            format!("S{i}"),
            json!({ "properties": { "next": { "$ref": format!("#/components/schemas/S{}", i + 1) } } }),
        );
    }
    schemas.insert("S500".to_string(), json!({ "type": "string" }));
    let doc = json!({ "openapi": "3.0.0", "components": { "schemas": schemas } });
    let input = write_input(&dir, "chain.json", &doc.to_string());

    let assert = cmd()
        .args(["resolve", input.to_str().unwrap(), "-s", "S0", "--format", "compact"])
        .assert()
        .success();

    let value = stdout_json(&assert.get_output().stdout);
    assert_eq!(value["ok"], json!(true));
    assert_eq!(value["document"]["$defs"].as_object().unwrap().len(), 501);
}
