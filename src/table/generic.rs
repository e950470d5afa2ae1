//! Generic row mapping: one ordered object per well-formed data row

use super::locator::LocatedTable;
use super::tokenizer::{is_separator_line, tokenize_row};
use crate::models::{GenericRecord, MappedTable, MappingStats};
use serde_json::Value;
use tracing::debug;

/// Maps data rows onto header-keyed records
///
/// Rows whose field count differs from the header count are discarded
/// without an error.
#[derive(Debug, Clone)]
pub struct GenericRowMapper {
    delimiter: char,
}

impl GenericRowMapper {
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    pub fn map(&self, table: &LocatedTable<'_>) -> MappedTable<Vec<GenericRecord>> {
        let headers = table.headers();
        let mut records = Vec::new();
        let mut stats = MappingStats::default();

        for line in table.data_rows() {
            stats.rows_seen += 1;

            if is_separator_line(line, self.delimiter) {
                stats.separators_skipped += 1;
                continue;
            }

            let fields = tokenize_row(line, self.delimiter);
            if fields.len() != headers.len() {
                debug!(
                    "Discarding row with {} fields (expected {}): {}",
                    fields.len(),
                    headers.len(),
                    line
                );
                stats.shape_mismatches += 1;
                continue;
            }

            let record: GenericRecord = headers
                .iter()
                .cloned()
                .zip(fields.into_iter().map(Value::String))
                .collect();
            records.push(record);
        }

        stats.records_emitted = records.len();
        MappedTable {
            data: records,
            stats,
        }
    }
}
