//! Basic conversion tests

use super::{REQUIREMENTS_DOC, test_converter, write_document};
use crate::config::{ConverterConfig, LocatorStrategy};
use crate::processor::{BatchProcessor, DocumentConverter};
use crate::schema::SchemaContract;
use serde_json::{Value, json};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_keyed_file_conversion() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_document(&temp_dir.path().join("docs"), "billing_cr.md", REQUIREMENTS_DOC);
    let converter = test_converter(&temp_dir);

    let written = converter.convert_keyed_file(&input).unwrap();

    assert_eq!(written.output, temp_dir.path().join("jsonoutput").join("billing.json"));
    assert_eq!(written.records, 2);
    assert_eq!(written.stats.placeholders_skipped, 1);

    let contents = fs::read_to_string(&written.output).unwrap();
    assert!(contents.starts_with("{\n    \"BP-01\": {\n        \"Function\": \"Billing\""));

    let value: Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(value["BP-01"]["Type"], json!("Decimal"));
    assert_eq!(value["BP-01"]["Status"], json!("Active"));
    assert_eq!(value["BP-01"]["ValidationCriteria"]["Dependencies"], json!(["BP-00"]));
    assert_eq!(value["BP-02"]["Status"], json!("Draft"));
    assert_eq!(value["BP-02"]["ValidationCriteria"]["Dependencies"], json!([]));
}

#[test]
fn test_generic_text_conversion() {
    let temp_dir = TempDir::new().unwrap();
    let config = ConverterConfig::default()
        .with_locator(LocatorStrategy::fixed_offset(0))
        .with_output_dir(temp_dir.path());
    let converter = DocumentConverter::new(config, &SchemaContract::default()).unwrap();

    let mapped = converter
        .convert_generic_text("| Name | Age |\n|---|---|\n| Ann | 30 |\n| Bob |")
        .unwrap();

    assert_eq!(
        Value::Array(mapped.data.into_iter().map(Value::Object).collect()),
        json!([{"Name": "Ann", "Age": "30"}])
    );
    assert_eq!(mapped.stats.shape_mismatches, 1);
}

#[test]
fn test_generic_file_with_marker() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_document(temp_dir.path(), "rules_cr.md", REQUIREMENTS_DOC);
    let converter = test_converter(&temp_dir);

    let mapped = converter.convert_generic_file(&input).unwrap();
    let crids: Vec<&str> = mapped
        .data
        .iter()
        .filter_map(|record| record.get("CRID").and_then(Value::as_str))
        .collect();

    assert_eq!(crids, vec!["BP-01", "BP-02", "---"]);
    // Generic conversion never writes output
    assert!(!temp_dir.path().join("jsonoutput").exists());
}

#[test]
fn test_batch_converts_every_document() {
    let temp_dir = TempDir::new().unwrap();
    let input_dir = temp_dir.path().join("docs");
    write_document(&input_dir, "billing_cr.md", REQUIREMENTS_DOC);
    write_document(&input_dir, "accounts_cr.md", REQUIREMENTS_DOC);
    write_document(&input_dir, "readme.txt", "ignored");

    let processor = BatchProcessor::new(test_converter(&temp_dir));
    let report = processor.process_directory(&input_dir).unwrap();

    assert_eq!(report.outcomes.len(), 2);
    assert_eq!(report.stats.files_processed, 2);
    assert_eq!(report.stats.files_failed, 0);
    assert_eq!(report.stats.total_records, 4);
    assert!(!report.has_failures());

    let output_dir = temp_dir.path().join("jsonoutput");
    assert!(output_dir.join("accounts.json").exists());
    assert!(output_dir.join("billing.json").exists());
    assert_eq!(
        report.outcomes[0].source.file_name().unwrap(),
        "accounts_cr.md"
    );
}

#[test]
fn test_rerun_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_document(temp_dir.path(), "billing_cr.md", REQUIREMENTS_DOC);
    let converter = test_converter(&temp_dir);

    let first = converter.convert_keyed_file(&input).unwrap();
    let first_bytes = fs::read(&first.output).unwrap();
    let second = converter.convert_keyed_file(&input).unwrap();

    assert_eq!(first_bytes, fs::read(&second.output).unwrap());
}
