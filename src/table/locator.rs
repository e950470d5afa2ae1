//! Header location and data-range calculation.
//!
//! Finds the header line of a markdown table with the configured
//! [`LocatorStrategy`] and computes the boundaries of the data rows that
//! follow it. The table block ends at the first blank line or the first line
//! without the delimiter.

use super::tokenizer::tokenize_row;
use crate::config::LocatorStrategy;
use crate::constants::FIXED_OFFSET_DATA_GAP;
use crate::error::{ConvertError, Result};
use crate::models::HeaderLayout;
use tracing::debug;

/// Header locator bound to one strategy and delimiter
#[derive(Debug, Clone)]
pub struct HeaderLocator {
    strategy: LocatorStrategy,
    delimiter: char,
}

/// A located table: its header layout and the lines it was located in
#[derive(Debug, Clone)]
pub struct LocatedTable<'a> {
    pub layout: HeaderLayout,
    lines: Vec<&'a str>,
}

impl<'a> LocatedTable<'a> {
    /// Raw data lines in document order
    pub fn data_rows(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.lines[self.layout.data_lines.clone()].iter().copied()
    }

    pub fn headers(&self) -> &[String] {
        &self.layout.headers
    }
}

impl HeaderLocator {
    pub fn new(strategy: LocatorStrategy, delimiter: char) -> Self {
        Self {
            strategy,
            delimiter,
        }
    }

    pub fn strategy(&self) -> &LocatorStrategy {
        &self.strategy
    }

    /// Locate the header in `text` and compute where data rows live
    pub fn locate<'a>(&self, text: &'a str) -> Result<LocatedTable<'a>> {
        let (lines, header_line, data_start) = match &self.strategy {
            LocatorStrategy::Marker { marker_column } => {
                let lines: Vec<&str> = text.lines().collect();
                let header_line = self.find_marker_line(&lines, marker_column).ok_or_else(|| {
                    ConvertError::header_not_located(format!(
                        "no line starts with column '{}'",
                        marker_column
                    ))
                })?;
                (lines, header_line, header_line + 1)
            }
            LocatorStrategy::FixedOffset { header_line_index } => {
                let lines: Vec<&str> = text.trim().lines().collect();
                let required = header_line_index
                    .checked_add(FIXED_OFFSET_DATA_GAP)
                    .ok_or_else(|| {
                        ConvertError::header_not_located(format!(
                            "header line {} is beyond any document",
                            header_line_index
                        ))
                    })?;
                if lines.len() < required {
                    return Err(ConvertError::header_not_located(format!(
                        "document has {} lines, header at line {} needs at least {}",
                        lines.len(),
                        header_line_index,
                        required
                    )));
                }
                (lines, *header_line_index, required)
            }
        };

        let headers = tokenize_row(lines[header_line], self.delimiter);
        let data_end = self.block_end(&lines, data_start);
        let layout = HeaderLayout::new(headers, header_line, data_start..data_end);

        debug!(
            "Located header at line {}: {} columns, data lines {:?}",
            layout.header_line,
            layout.column_count(),
            layout.data_lines
        );

        Ok(LocatedTable { layout, lines })
    }

    fn find_marker_line(&self, lines: &[&str], marker_column: &str) -> Option<usize> {
        lines.iter().position(|line| {
            line.contains(self.delimiter)
                && tokenize_row(line, self.delimiter)
                    .first()
                    .is_some_and(|first| first == marker_column)
        })
    }

    /// First line at or after `start` that is outside the table block
    fn block_end(&self, lines: &[&str], start: usize) -> usize {
        lines
            .iter()
            .enumerate()
            .skip(start)
            .find(|(_, line)| line.trim().is_empty() || !line.contains(self.delimiter))
            .map_or(lines.len(), |(index, _)| index)
    }
}
