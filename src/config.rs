//! Configuration management and validation.
//!
//! Provides the converter configuration: delimiter, header-location strategy,
//! identifier column and output naming. Configuration is layered as defaults,
//! then an optional JSON file, then CLI overrides, and is validated before any
//! document is processed.

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_DELIMITER, DEFAULT_MARKDOWN_EXTENSION,
    DEFAULT_MARKER_COLUMN, DEFAULT_OUTPUT_DIR, DEFAULT_STRIP_SUFFIX, SEPARATOR_CHAR,
};
use crate::error::{ConvertError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Strategy used to find the header line of a table
///
/// The two strategies diverge on documents with preamble text, so the choice
/// is always explicit. The default is marker search on `CRID`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "kebab-case")]
pub enum LocatorStrategy {
    /// First line whose leading cell equals `marker_column`
    Marker { marker_column: String },
    /// Header sits at `header_line_index`, data two lines later
    FixedOffset { header_line_index: usize },
}

impl Default for LocatorStrategy {
    fn default() -> Self {
        Self::Marker {
            marker_column: DEFAULT_MARKER_COLUMN.to_string(),
        }
    }
}

impl LocatorStrategy {
    pub fn marker(column: impl Into<String>) -> Self {
        Self::Marker {
            marker_column: column.into(),
        }
    }

    pub fn fixed_offset(header_line_index: usize) -> Self {
        Self::FixedOffset { header_line_index }
    }
}

/// Converter configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Column separator character
    pub delimiter: char,

    /// Header location strategy
    pub locator: LocatorStrategy,

    /// Column whose value keys keyed output
    pub identifier_column: String,

    /// Directory keyed results are written into
    pub output_dir: PathBuf,

    /// Suffix removed from input stems when naming outputs
    pub strip_suffix: String,

    /// Extension of documents picked up in batch mode
    pub markdown_extension: String,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            locator: LocatorStrategy::default(),
            identifier_column: DEFAULT_MARKER_COLUMN.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            strip_suffix: DEFAULT_STRIP_SUFFIX.to_string(),
            markdown_extension: DEFAULT_MARKDOWN_EXTENSION.to_string(),
        }
    }
}

impl ConverterConfig {
    /// Create configuration with a custom delimiter
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Create configuration with a custom header locator
    pub fn with_locator(mut self, locator: LocatorStrategy) -> Self {
        self.locator = locator;
        self
    }

    /// Create configuration with a custom identifier column
    pub fn with_identifier_column(mut self, column: impl Into<String>) -> Self {
        self.identifier_column = column.into();
        self
    }

    /// Set the directory keyed results are written into
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Set the suffix stripped from output names
    pub fn with_strip_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.strip_suffix = suffix.into();
        self
    }

    /// Default config file location (`<config dir>/crtable/config.json`)
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            ConvertError::configuration("Could not determine user config directory")
        })?;
        Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load configuration from a JSON file, filling missing keys with defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConvertError::configuration(format!(
                "Config file does not exist: {}",
                path.display()
            )));
        }

        let contents = std::fs::read_to_string(path).map_err(|e| ConvertError::io(path, e))?;
        let config: Self = serde_json::from_str(&contents).map_err(|e| {
            ConvertError::configuration(format!(
                "Invalid config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load configuration from an explicit file, the default file, or defaults
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        match config_file {
            Some(path) => Self::from_file(path),
            None => match Self::default_config_path() {
                Ok(path) if path.exists() => Self::from_file(&path),
                _ => {
                    debug!("No config file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.delimiter.is_whitespace() {
            return Err(ConvertError::configuration(
                "Delimiter must not be a whitespace character",
            ));
        }

        if self.delimiter == SEPARATOR_CHAR {
            return Err(ConvertError::configuration(format!(
                "Delimiter must differ from the separator rule character '{}'",
                SEPARATOR_CHAR
            )));
        }

        if self.identifier_column.trim().is_empty() {
            return Err(ConvertError::configuration(
                "Identifier column must not be empty",
            ));
        }

        if let LocatorStrategy::Marker { marker_column } = &self.locator {
            if marker_column.trim().is_empty() {
                return Err(ConvertError::configuration(
                    "Marker column must not be empty",
                ));
            }
        }

        if self.markdown_extension.trim_start_matches('.').is_empty() {
            return Err(ConvertError::configuration(
                "Markdown extension must not be empty",
            ));
        }

        Ok(())
    }
}
