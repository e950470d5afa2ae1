//! Pipeline tests for the processor module
//!
//! Exercise document conversion and batch runs against temporary directories.

pub mod basic_processing;

use crate::config::ConverterConfig;
use crate::processor::DocumentConverter;
use crate::schema::SchemaContract;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const REQUIREMENTS_DOC: &str = "\
# Billing requirements

Some introductory prose.

| CRID | Function | Type | Status | Dependencies |
|------|----------|------|--------|--------------|
| BP-01 | Billing | decimal | active | BP-00 |
| BP-02 | Invoicing | string | draft | |
| --- | continuation | | | |

Trailing notes.
";

/// Write `contents` to `name` inside `dir`
pub fn write_document(dir: &Path, name: &str, contents: &str) -> PathBuf {
    fs::create_dir_all(dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// Converter writing into `<temp>/jsonoutput`
pub fn test_converter(temp_dir: &TempDir) -> DocumentConverter {
    let config = ConverterConfig::default().with_output_dir(temp_dir.path().join("jsonoutput"));
    DocumentConverter::new(config, &SchemaContract::default()).unwrap()
}
