//! JSON writing module
//!
//! Derives output file names from input documents and writes pretty-printed
//! JSON with four-space indentation.

use crate::constants::{JSON_INDENT, OUTPUT_EXTENSION};
use crate::error::{ConvertError, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Serialize `data` as pretty-printed JSON
pub fn to_pretty_json<T: Serialize + ?Sized>(data: &T) -> Result<String> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(JSON_INDENT);
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    data.serialize(&mut serializer)?;
    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Write `data` as pretty-printed JSON to `path`, creating parent directories
pub fn write_json_file<T: Serialize + ?Sized>(data: &T, path: &Path) -> Result<u64> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ConvertError::io(parent, e))?;
    }

    let json = to_pretty_json(data)?;
    let file = File::create(path).map_err(|e| ConvertError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(json.as_bytes())
        .and_then(|_| writer.flush())
        .map_err(|e| ConvertError::io(path, e))?;

    debug!("Wrote {} bytes to {}", json.len(), path.display());
    Ok(json.len() as u64)
}

/// Writer for converted documents
#[derive(Debug, Clone)]
pub struct JsonWriter {
    output_dir: PathBuf,
    strip_suffix: String,
}

impl JsonWriter {
    /// Create a new JSON writer
    pub fn new(output_dir: PathBuf, strip_suffix: impl Into<String>) -> Self {
        Self {
            output_dir,
            strip_suffix: strip_suffix.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Output file name for a source document
    ///
    /// `billing_cr.md` becomes `billing.json`. A stem that would be emptied by
    /// the suffix is kept whole.
    pub fn output_name(&self, source: &Path) -> String {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        let base = match stem.strip_suffix(self.strip_suffix.as_str()) {
            Some(stripped) if !stripped.is_empty() && !self.strip_suffix.is_empty() => {
                stripped.to_string()
            }
            _ => stem,
        };

        format!("{}.{}", base, OUTPUT_EXTENSION)
    }

    /// Full output path for a source document
    pub fn output_path(&self, source: &Path) -> PathBuf {
        self.output_dir.join(self.output_name(source))
    }

    /// Write the converted data for `source`, returning the output path and size
    pub fn write<T: Serialize + ?Sized>(&self, source: &Path, data: &T) -> Result<(PathBuf, u64)> {
        let path = self.output_path(source);
        let bytes = write_json_file(data, &path)?;
        Ok((path, bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_output_name_strips_suffix() {
        let writer = JsonWriter::new(PathBuf::from("jsonoutput"), "_cr");

        assert_eq!(writer.output_name(Path::new("docs/billing_cr.md")), "billing.json");
        assert_eq!(writer.output_name(Path::new("accounts.md")), "accounts.json");
        assert_eq!(writer.output_name(Path::new("cr_notes.md")), "cr_notes.json");
        assert_eq!(writer.output_name(Path::new("_cr.md")), "_cr.json");
        assert_eq!(
            writer.output_path(Path::new("a/b_cr.md")),
            PathBuf::from("jsonoutput").join("b.json")
        );
    }

    #[test]
    fn test_output_name_without_suffix() {
        let writer = JsonWriter::new(PathBuf::from("out"), "");
        assert_eq!(writer.output_name(Path::new("billing_cr.md")), "billing_cr.json");
    }

    #[test]
    fn test_pretty_json_uses_four_spaces() {
        let json = to_pretty_json(&json!([{"Name": "Ann"}])).unwrap();
        assert_eq!(json, "[\n    {\n        \"Name\": \"Ann\"\n    }\n]");

        assert_eq!(to_pretty_json(&json!([])).unwrap(), "[]");
    }

    #[test]
    fn test_write_creates_output_directory() {
        let temp_dir = TempDir::new().unwrap();
        let output_dir = temp_dir.path().join("nested").join("jsonoutput");
        let writer = JsonWriter::new(output_dir.clone(), "_cr");

        let (path, bytes) = writer
            .write(Path::new("input/rules_cr.md"), &json!({"C1": {}}))
            .unwrap();

        assert_eq!(path, output_dir.join("rules.json"));
        assert!(bytes > 0);
        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, json!({"C1": {}}));
    }

    #[test]
    fn test_write_json_file_plain_name() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.json");

        write_json_file(&json!([1, 2]), &path).unwrap();
        assert!(path.exists());
    }
}
