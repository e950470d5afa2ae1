//! Core data structures for table conversion.
//!
//! Defines the located header layout, the two output shapes (generic rows
//! and keyed records), per-table mapping statistics and batch statistics.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;
use std::ops::Range;
use std::path::PathBuf;

/// Header name to zero-based field position
///
/// Built once per table. When a header name repeats, the first occurrence
/// keeps the slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderIndex {
    positions: HashMap<String, usize>,
}

impl HeaderIndex {
    pub fn from_headers(headers: &[String]) -> Self {
        let mut positions = HashMap::with_capacity(headers.len());
        for (index, header) in headers.iter().enumerate() {
            positions.entry(header.clone()).or_insert(index);
        }
        Self { positions }
    }

    /// Get the position for a given column name
    pub fn get(&self, column: &str) -> Option<usize> {
        self.positions.get(column).copied()
    }

    pub fn contains(&self, column: &str) -> bool {
        self.positions.contains_key(column)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Result of locating a table header inside a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLayout {
    /// Header fields in column order, not guaranteed unique
    pub headers: Vec<String>,
    pub index: HeaderIndex,
    /// Line number of the header within the scanned lines
    pub header_line: usize,
    /// Lines holding candidate data rows
    pub data_lines: Range<usize>,
}

impl HeaderLayout {
    pub fn new(headers: Vec<String>, header_line: usize, data_lines: Range<usize>) -> Self {
        let index = HeaderIndex::from_headers(&headers);
        Self {
            headers,
            index,
            header_line,
            data_lines,
        }
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }
}

/// One generic output row: header name to cell value, in header order
pub type GenericRecord = serde_json::Map<String, serde_json::Value>;

/// Validation metadata nested inside every keyed record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ValidationCriteria {
    pub must_satisfy: String,
    pub keyword: String,
    pub requirement: String,
    pub condition: String,
    pub dependencies: Vec<String>,
}

/// Fixed-shape record produced per identifier in keyed mode
///
/// The identifier itself is the map key and never part of the body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct KeyedRecord {
    pub function: String,
    pub reference: String,
    pub entity_type: String,
    pub applicability_criteria: Vec<String>,
    #[serde(rename = "Type")]
    pub kind: String,
    pub validation_criteria: ValidationCriteria,
    #[serde(rename = "CRVersionIntroduced")]
    pub cr_version_introduced: String,
    pub status: String,
    pub notes: String,
}

/// Insertion-ordered identifier to record mapping
///
/// Inserting an existing identifier replaces its payload in place, so the
/// entry keeps the position of its first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyedTable {
    entries: Vec<(String, KeyedRecord)>,
    positions: HashMap<String, usize>,
}

impl KeyedTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, returning the payload it replaced
    pub fn insert(&mut self, identifier: String, record: KeyedRecord) -> Option<KeyedRecord> {
        if let Some(&position) = self.positions.get(&identifier) {
            return Some(std::mem::replace(&mut self.entries[position].1, record));
        }
        self.positions.insert(identifier.clone(), self.entries.len());
        self.entries.push((identifier, record));
        None
    }

    pub fn get(&self, identifier: &str) -> Option<&KeyedRecord> {
        self.positions
            .get(identifier)
            .map(|&position| &self.entries[position].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(identifier, _)| identifier.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &KeyedRecord)> {
        self.entries
            .iter()
            .map(|(identifier, record)| (identifier.as_str(), record))
    }
}

impl Serialize for KeyedTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (identifier, record) in &self.entries {
            map.serialize_entry(identifier, record)?;
        }
        map.end()
    }
}

/// Row accounting for one mapped table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingStats {
    /// Lines inside the data range
    pub rows_seen: usize,
    pub records_emitted: usize,
    pub separators_skipped: usize,
    /// Generic mode: field count differed from header count
    pub shape_mismatches: usize,
    /// Keyed mode: rows padded up to the header count
    pub rows_padded: usize,
    /// Keyed mode: empty or all-dash identifiers
    pub placeholders_skipped: usize,
    /// Keyed mode: rows that replaced an earlier row with the same identifier
    pub identifiers_overwritten: usize,
}

/// Mapper output together with its row accounting
#[derive(Debug, Clone, PartialEq)]
pub struct MappedTable<T> {
    pub data: T,
    pub stats: MappingStats,
}

/// Batch processing statistics
#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub files_processed: usize,
    pub files_failed: usize,
    pub total_records: usize,
    pub output_path: PathBuf,
    pub processing_time_ms: u128,
}
