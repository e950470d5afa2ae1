//! Markdown requirement table converter
//!
//! Extracts a pipe-delimited table from markdown text and converts it into
//! JSON in one of two shapes:
//! - a list of row objects keyed by header name (generic mode)
//! - a map from each row's identifier to a fixed requirement record,
//!   validated against a JSON Schema before it is written (keyed mode)
//!
//! The [`table`] module holds the pure text-to-structure core. The
//! [`processor`] module adds file reading, output naming, JSON writing and
//! batch conversion of directories.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod processor;
pub mod schema;
pub mod table;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use config::{ConverterConfig, LocatorStrategy};
pub use error::{ConvertError, Result};
pub use models::{GenericRecord, KeyedRecord, KeyedTable, MappedTable, ValidationCriteria};
pub use processor::{BatchProcessor, BatchReport, DocumentConverter, DocumentOutcome};
pub use schema::{SchemaContract, SchemaValidator};
