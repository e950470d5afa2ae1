//! Markdown table extraction
//!
//! Locates a pipe-delimited table inside markdown text and maps its rows onto
//! one of two output shapes:
//! - [`tokenizer`] - Line splitting and separator/placeholder detection
//! - [`locator`] - Header location by marker search or fixed offset
//! - [`generic`] - Header-keyed row objects, malformed rows discarded
//! - [`keyed`] - Identifier-keyed requirement records, short rows padded
//!
//! ## Usage
//!
//! ```rust
//! use crtable::config::LocatorStrategy;
//! use crtable::table::{GenericRowMapper, HeaderLocator};
//!
//! let text = "| Name | Age |\n|---|---|\n| Ann | 30 |";
//! let locator = HeaderLocator::new(LocatorStrategy::fixed_offset(0), '|');
//! let table = locator.locate(text)?;
//! let rows = GenericRowMapper::new('|').map(&table);
//! assert_eq!(rows.data.len(), 1);
//! # Ok::<(), crtable::ConvertError>(())
//! ```

pub mod generic;
pub mod keyed;
pub mod locator;
pub mod tokenizer;

pub use generic::GenericRowMapper;
pub use keyed::{KeyedRowMapper, capitalize_first};
pub use locator::{HeaderLocator, LocatedTable};
pub use tokenizer::{is_placeholder, is_separator_line, tokenize_row};
