use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const ALL_JSON: &str = r#"{
    "modules": [
        {
            "name": "util",
            "desc": "<p>Utility functions.</p>\n",
            "methods": [ { "name": "createThing", "signatures": [ { "params": [] } ] } ]
        },
        {
            "name": "path",
            "methods": [
                { "name": "join", "signatures": [ { "params": [ { "name": "path1" }, { "name": "..." } ] } ] }
            ]
        }
    ],
    "miscs": [
        {
            "name": "Global Objects",
            "globals": [
                { "name": "process", "properties": [ { "name": "pid" } ] }
            ]
        }
    ]
}"#;

fn noderef(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("noderef").unwrap();
    cmd.current_dir(dir.path()).env("NODEREF_LOG", "warn");
    cmd
}

#[test]
fn generates_both_artifacts() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("all.json"), ALL_JSON).unwrap();
    fs::write(dir.path().join("IntellisenseHeader.js"), "// header\n").unwrap();

    noderef(&dir).assert().success();

    let stubs = fs::read_to_string(dir.path().join("all.js")).unwrap();
    assert!(stubs.starts_with("// header\nglobal = {};\nvar process = new function __process() {\n"));
    assert!(stubs.contains("    this.pid = 0;\n"));
    assert!(stubs.contains("return new this.Thing();"));
    assert!(stubs.contains("this.join = function(path1) {"));
    assert!(stubs.contains("function normalizeArray(parts, allowAboveRoot) {"));

    let table = fs::read_to_string(dir.path().join("modules.cs")).unwrap();
    assert!(table.contains("{\"util\", \"Utility functions.\" },"));
    assert!(table.contains("{\"path\", \"\" },"));
}

#[test]
fn json_doc_table_from_flags() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("docs.json");
    fs::write(&input, ALL_JSON).unwrap();

    noderef(&dir)
        .arg("--input")
        .arg(&input)
        .args(["--format", "json", "--doc-table", "table.json", "--stubs", "stubs.js"])
        .assert()
        .success();

    let table = fs::read_to_string(dir.path().join("table.json")).unwrap();
    assert!(table.contains("\"doc\": \"Utility functions.\""));
    assert!(dir.path().join("stubs.js").exists());
}

#[test]
fn malformed_input_writes_nothing() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("all.json"),
        r#"{ "modules": [ { "name": "os", "methods": [ { "name": "cpus", "signatures": [] } ] } ] }"#,
    )
    .unwrap();

    noderef(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("has no signatures"));

    assert!(!dir.path().join("all.js").exists());
    assert!(!dir.path().join("modules.cs").exists());
}

#[test]
fn missing_input_is_reported() {
    let dir = TempDir::new().unwrap();
    noderef(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("reading documentation"));
}
