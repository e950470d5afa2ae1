//! Keyed row mapping onto the fixed requirement record shape.
//!
//! Each data row is padded to the header count, keyed by its identifier
//! column and mapped field-by-field onto [`KeyedRecord`]. Rows with an empty
//! or all-dash identifier are skipped. A repeated identifier replaces the
//! earlier row.

use super::locator::LocatedTable;
use super::tokenizer::{is_placeholder, is_separator_line, tokenize_row};
use crate::constants::{DEPENDENCY_SEPARATOR, ENTITY_TYPE_COLUMN, columns};
use crate::error::{ConvertError, Result};
use crate::models::{
    HeaderIndex, KeyedRecord, KeyedTable, MappedTable, MappingStats, ValidationCriteria,
};
use tracing::{debug, warn};

/// Maps data rows onto identifier-keyed records
#[derive(Debug, Clone)]
pub struct KeyedRowMapper {
    delimiter: char,
    identifier_column: String,
}

impl KeyedRowMapper {
    pub fn new(delimiter: char, identifier_column: impl Into<String>) -> Self {
        Self {
            delimiter,
            identifier_column: identifier_column.into(),
        }
    }

    /// Map every data row of `table` into a keyed table
    ///
    /// Fails only when the identifier column is not among the headers.
    pub fn map(&self, table: &LocatedTable<'_>) -> Result<MappedTable<KeyedTable>> {
        let index = &table.layout.index;
        let header_count = table.layout.column_count();
        let identifier_position =
            index
                .get(&self.identifier_column)
                .ok_or_else(|| ConvertError::IdentifierColumnMissing {
                    column: self.identifier_column.clone(),
                })?;

        let mut records = KeyedTable::new();
        let mut stats = MappingStats::default();

        for line in table.data_rows() {
            stats.rows_seen += 1;

            if is_separator_line(line, self.delimiter) {
                stats.separators_skipped += 1;
                continue;
            }

            let mut fields = tokenize_row(line, self.delimiter);
            if fields.len() < header_count {
                fields.resize(header_count, String::new());
                stats.rows_padded += 1;
            }

            let identifier = fields[identifier_position].as_str();
            if identifier.is_empty() || is_placeholder(identifier) {
                stats.placeholders_skipped += 1;
                continue;
            }

            let identifier = identifier.to_string();
            let record = build_record(&fields, index);
            if records.insert(identifier.clone(), record).is_some() {
                warn!(
                    "Duplicate {} '{}': later row replaces the earlier one",
                    self.identifier_column, identifier
                );
                stats.identifiers_overwritten += 1;
            }
        }

        stats.records_emitted = records.len();
        debug!(
            "Mapped {} keyed records from {} rows ({} padded, {} skipped)",
            stats.records_emitted,
            stats.rows_seen,
            stats.rows_padded,
            stats.placeholders_skipped + stats.separators_skipped
        );

        Ok(MappedTable {
            data: records,
            stats,
        })
    }
}

fn build_record(fields: &[String], index: &HeaderIndex) -> KeyedRecord {
    let field = |column: &str| -> String {
        index
            .get(column)
            .and_then(|position| fields.get(position))
            .cloned()
            .unwrap_or_default()
    };

    let applicability = field(columns::APPLICABILITY_CRITERIA);

    KeyedRecord {
        function: field(columns::FUNCTION),
        reference: field(columns::REFERENCE),
        entity_type: ENTITY_TYPE_COLUMN.to_string(),
        applicability_criteria: if applicability.is_empty() {
            Vec::new()
        } else {
            vec![applicability]
        },
        kind: capitalize_first(&field(columns::TYPE)),
        validation_criteria: ValidationCriteria {
            must_satisfy: field(columns::MUST_SATISFY),
            keyword: field(columns::KEYWORD),
            requirement: field(columns::REQUIREMENT),
            condition: field(columns::CONDITION),
            dependencies: split_dependencies(&field(columns::DEPENDENCIES)),
        },
        cr_version_introduced: field(columns::CR_VERSION_INTRODUCED),
        status: capitalize_first(&field(columns::STATUS)),
        notes: field(columns::NOTES),
    }
}

/// Uppercase the first character, leaving the rest untouched
pub fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn split_dependencies(value: &str) -> Vec<String> {
    value
        .split(DEPENDENCY_SEPARATOR)
        .map(str::trim)
        .filter(|dependency| !dependency.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LocatorStrategy;
    use crate::table::locator::HeaderLocator;
    use serde_json::json;

    fn map_keyed(text: &str) -> Result<MappedTable<KeyedTable>> {
        let locator = HeaderLocator::new(LocatorStrategy::marker("CRID"), '|');
        let table = locator.locate(text)?;
        KeyedRowMapper::new('|', "CRID").map(&table)
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("string"), "String");
        assert_eq!(capitalize_first("String"), "String");
        assert_eq!(capitalize_first("mANDATORY"), "MANDATORY");
        assert_eq!(capitalize_first(""), "");
        assert_eq!(capitalize_first("é"), "É");
        assert_eq!(capitalize_first(&capitalize_first("draft")), "Draft");
    }

    #[test]
    fn test_basic_keyed_record() {
        let mapped = map_keyed("| CRID | Function | Type |\n|---|---|---|\n| C1 | parse | string |")
            .unwrap();

        assert_eq!(
            serde_json::to_value(&mapped.data).unwrap(),
            json!({
                "C1": {
                    "Function": "parse",
                    "Reference": "",
                    "EntityType": "Column",
                    "ApplicabilityCriteria": [],
                    "Type": "String",
                    "ValidationCriteria": {
                        "MustSatisfy": "",
                        "Keyword": "",
                        "Requirement": "",
                        "Condition": "",
                        "Dependencies": []
                    },
                    "CRVersionIntroduced": "",
                    "Status": "",
                    "Notes": ""
                }
            })
        );
    }

    #[test]
    fn test_full_row_mapping() {
        let text = "| CRID | Function | Reference | ApplicabilityCriteria | Type | MustSatisfy | Keyword | Requirement | Condition | Dependencies | CRVersionIntroduced | Status | Notes |\n\
                    |---|---|---|---|---|---|---|---|---|---|---|---|---|\n\
                    | BP-01 | Billing | ref-7 | Always | decimal | yes | MUST | be positive | none | BP-00, BP-02 | 1.0 | active | see annex |";
        let mapped = map_keyed(text).unwrap();
        let record = mapped.data.get("BP-01").unwrap();

        assert_eq!(record.function, "Billing");
        assert_eq!(record.reference, "ref-7");
        assert_eq!(record.applicability_criteria, vec!["Always".to_string()]);
        assert_eq!(record.kind, "Decimal");
        assert_eq!(record.validation_criteria.must_satisfy, "yes");
        assert_eq!(record.validation_criteria.keyword, "MUST");
        assert_eq!(record.validation_criteria.requirement, "be positive");
        assert_eq!(record.validation_criteria.condition, "none");
        assert_eq!(
            record.validation_criteria.dependencies,
            vec!["BP-00".to_string(), "BP-02".to_string()]
        );
        assert_eq!(record.cr_version_introduced, "1.0");
        assert_eq!(record.status, "Active");
        assert_eq!(record.notes, "see annex");
    }

    #[test]
    fn test_duplicate_identifier_keeps_last_row() {
        let text = "| CRID | Function |\n|---|---|\n| C1 | first |\n| C2 | other |\n| C1 | second |";
        let mapped = map_keyed(text).unwrap();

        assert_eq!(mapped.data.len(), 2);
        assert_eq!(mapped.data.get("C1").unwrap().function, "second");
        assert_eq!(mapped.stats.identifiers_overwritten, 1);
    }

    #[test]
    fn test_placeholder_identifiers_are_skipped() {
        let text = "| CRID | Function |\n|---|---|\n| --- | continuation |\n| | orphan |\n| C1 | kept |";
        let mapped = map_keyed(text).unwrap();

        assert_eq!(mapped.data.identifiers().collect::<Vec<_>>(), vec!["C1"]);
        assert_eq!(mapped.stats.placeholders_skipped, 2);
        assert_eq!(mapped.stats.separators_skipped, 1);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let text = "| CRID | Function | Status | Notes |\n|---|---|---|---|\n| C1 | parse |";
        let mapped = map_keyed(text).unwrap();
        let record = mapped.data.get("C1").unwrap();

        assert_eq!(record.function, "parse");
        assert_eq!(record.status, "");
        assert_eq!(record.notes, "");
        assert_eq!(mapped.stats.rows_padded, 1);
    }

    #[test]
    fn test_long_rows_are_not_truncated_away() {
        let text = "| CRID | Function |\n|---|---|\n| C1 | parse | stray |";
        let mapped = map_keyed(text).unwrap();

        assert_eq!(mapped.data.get("C1").unwrap().function, "parse");
    }

    #[test]
    fn test_interior_empty_column_preserved() {
        let text = "| CRID | Function | Reference | Notes |\n|---|---|---|---|\n| C1 | parse | | note |";
        let mapped = map_keyed(text).unwrap();
        let record = mapped.data.get("C1").unwrap();

        assert_eq!(record.reference, "");
        assert_eq!(record.notes, "note");
    }

    #[test]
    fn test_identifier_column_not_first() {
        let locator = HeaderLocator::new(LocatorStrategy::fixed_offset(0), '|');
        let table = locator
            .locate("| Function | ReqID |\n|---|---|\n| parse | R1 |")
            .unwrap();
        let mapped = KeyedRowMapper::new('|', "ReqID").map(&table).unwrap();

        assert_eq!(mapped.data.get("R1").unwrap().function, "parse");
    }

    #[test]
    fn test_missing_identifier_column() {
        let locator = HeaderLocator::new(LocatorStrategy::fixed_offset(0), '|');
        let table = locator.locate("| Name | Age |\n|---|---|\n| Ann | 30 |").unwrap();
        let result = KeyedRowMapper::new('|', "CRID").map(&table);

        assert!(matches!(
            result,
            Err(ConvertError::IdentifierColumnMissing { .. })
        ));
    }

    #[test]
    fn test_keyed_mapping_is_idempotent() {
        let text = "| CRID | Function | Type |\n|---|---|---|\n| C1 | a | x |\n| C2 | b | Y |\n| C1 | c | z |";
        let first = map_keyed(text).unwrap();
        let second = map_keyed(text).unwrap();

        assert_eq!(first.data, second.data);
        assert_eq!(
            serde_json::to_string(&first.data).unwrap(),
            serde_json::to_string(&second.data).unwrap()
        );
    }
}
