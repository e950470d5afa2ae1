//! Schema contract for keyed output and its validator.
//!
//! The contract is an immutable JSON Schema document describing the keyed
//! output shape. It is passed explicitly into [`SchemaValidator`], which wraps
//! the `jsonschema` crate. A keyed result that fails validation must not be
//! persisted.

use crate::error::{ConvertError, Result};
use crate::models::KeyedTable;
use serde_json::{Value, json};
use std::path::Path;
use tracing::debug;

/// JSON Schema document describing keyed output
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaContract {
    document: Value,
}

impl Default for SchemaContract {
    fn default() -> Self {
        Self::keyed_records()
    }
}

impl SchemaContract {
    /// The built-in contract: any key mapping to a requirement record
    pub fn keyed_records() -> Self {
        let string = json!({"type": "string"});
        let string_list = json!({"type": "array", "items": {"type": "string"}});

        let document = json!({
            "type": "object",
            "patternProperties": {
                "^.*$": {
                    "type": "object",
                    "properties": {
                        "Function": string,
                        "Reference": string,
                        "EntityType": string,
                        "ApplicabilityCriteria": string_list,
                        "Type": string,
                        "ValidationCriteria": {
                            "type": "object",
                            "properties": {
                                "MustSatisfy": string,
                                "Keyword": string,
                                "Requirement": string,
                                "Condition": string,
                                "Dependencies": string_list
                            },
                            "additionalProperties": true
                        },
                        "CRVersionIntroduced": string,
                        "Status": string,
                        "Notes": string
                    },
                    "additionalProperties": true
                }
            }
        });

        Self { document }
    }

    /// Wrap an existing schema document
    pub fn from_value(document: Value) -> Self {
        Self { document }
    }

    /// Load a schema document from a JSON file
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConvertError::SourceNotFound {
                path: path.to_path_buf(),
            });
        }
        let contents = std::fs::read_to_string(path).map_err(|e| ConvertError::io(path, e))?;
        let document: Value =
            serde_json::from_str(&contents).map_err(|e| ConvertError::InvalidSchema {
                message: format!("{}: {}", path.display(), e),
            })?;
        debug!("Loaded schema contract from {}", path.display());
        Ok(Self { document })
    }

    pub fn document(&self) -> &Value {
        &self.document
    }
}

/// Compiled validator for a [`SchemaContract`]
#[derive(Debug)]
pub struct SchemaValidator {
    validator: jsonschema::Validator,
}

impl SchemaValidator {
    /// Compile the contract
    pub fn new(contract: &SchemaContract) -> Result<Self> {
        let validator = jsonschema::options()
            .build(contract.document())
            .map_err(|e| ConvertError::InvalidSchema {
                message: e.to_string(),
            })?;

        Ok(Self { validator })
    }

    /// Validate a JSON value, reporting the first violation
    pub fn validate(&self, instance: &Value) -> Result<()> {
        self.validator.validate(instance).map_err(|error| {
            let path = error.instance_path.to_string();
            ConvertError::SchemaViolation {
                path: if path.is_empty() {
                    "$".to_string()
                } else {
                    format!("${path}")
                },
                message: error.to_string(),
            }
        })
    }

    /// Validate a keyed table as it would be serialized
    pub fn validate_keyed(&self, table: &KeyedTable) -> Result<()> {
        let value = serde_json::to_value(table)?;
        self.validate(&value)
    }
}
