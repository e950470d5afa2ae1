//! End-to-end tests running the compiled binary

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const REQUIREMENTS: &str = "\
# Requirements

| CRID | Function | Type | Status |
|------|----------|------|--------|
| R-1 | Parse input | string | active |
| R-2 | Emit output | number | draft |
";

fn crtable(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_crtable"))
        .args(args)
        .current_dir(cwd)
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run crtable binary")
}

#[test]
fn test_table_to_stdout() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("people.md"),
        "| Name | Age |\n|---|---|\n| Ann | 30 |\n",
    )
    .unwrap();

    let output = crtable(
        &["table", "people.md", "--locator", "fixed-offset"],
        temp_dir.path(),
    );

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(
        stdout,
        "[\n    {\n        \"Name\": \"Ann\",\n        \"Age\": \"30\"\n    }\n]\n"
    );
}

#[test]
fn test_table_without_header_prints_empty_array() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("prose.md"), "Just prose.\n").unwrap();

    let output = crtable(&["table", "prose.md"], temp_dir.path());

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "[]\n");
}

#[test]
fn test_keyed_directory_default_output() {
    let temp_dir = TempDir::new().unwrap();
    let docs = temp_dir.path().join("docs");
    fs::create_dir_all(&docs).unwrap();
    fs::write(docs.join("core_cr.md"), REQUIREMENTS).unwrap();

    let output = crtable(&["-q", "keyed", "docs"], temp_dir.path());

    assert!(output.status.success());
    let written = temp_dir.path().join("jsonoutput").join("core.json");
    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(written).unwrap()).unwrap();
    assert_eq!(value["R-1"]["Status"], "Active");
    assert_eq!(value["R-2"]["Type"], "Number");
}

#[test]
fn test_keyed_batch_failure_sets_exit_code() {
    let temp_dir = TempDir::new().unwrap();
    let docs = temp_dir.path().join("docs");
    fs::create_dir_all(&docs).unwrap();
    fs::write(docs.join("good_cr.md"), REQUIREMENTS).unwrap();
    fs::write(docs.join("bad_cr.md"), "no table here").unwrap();

    let output = crtable(&["-q", "keyed", "docs", "-o", "out"], temp_dir.path());

    assert_eq!(output.status.code(), Some(1));
    assert!(temp_dir.path().join("out").join("good.json").exists());
    assert!(!temp_dir.path().join("out").join("bad.json").exists());
}

#[test]
fn test_missing_input_fails() {
    let temp_dir = TempDir::new().unwrap();
    let output = crtable(&["table", "absent.md"], temp_dir.path());

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("absent.md"));
}
