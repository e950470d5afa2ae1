//! Command-line argument definitions for the table converter
//!
//! Defines the CLI interface using the clap derive API. Conversion options
//! are global so they can be given before or after the subcommand.

use crate::config::{ConverterConfig, LocatorStrategy};
use crate::constants::DEFAULT_MARKER_COLUMN;
use crate::error::{ConvertError, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the markdown table converter
///
/// Extracts pipe-delimited tables from markdown documents and converts them
/// into JSON, either as plain row objects or as identifier-keyed requirement
/// records validated against a schema.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "crtable",
    version,
    about = "Convert markdown requirement tables into JSON",
    long_about = "Extracts a pipe-delimited table from markdown documents and converts it into \
                  JSON. The `table` command emits one object per row; the `keyed` command emits \
                  requirement records keyed by their identifier column, validated against a \
                  JSON Schema before they are written."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file (JSON)
    ///
    /// If not specified, looks for crtable/config.json in the user config
    /// directory and falls back to built-in defaults.
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    pub config_file: Option<PathBuf>,

    /// Column delimiter character
    #[arg(long = "delimiter", value_name = "CHAR", global = true)]
    pub delimiter: Option<char>,

    /// Header location strategy
    #[arg(long = "locator", value_enum, value_name = "STRATEGY", global = true)]
    pub locator: Option<LocatorKind>,

    /// Leading column that marks the header line (marker strategy)
    #[arg(long = "marker-column", value_name = "NAME", global = true)]
    pub marker_column: Option<String>,

    /// Zero-based header line index (fixed-offset strategy)
    #[arg(long = "header-line", value_name = "INDEX", global = true)]
    pub header_line: Option<usize>,

    /// Column whose value keys each keyed record
    #[arg(long = "identifier-column", value_name = "NAME", global = true)]
    pub identifier_column: Option<String>,

    /// Alternative JSON Schema document for keyed output
    #[arg(long = "schema", value_name = "FILE", global = true)]
    pub schema: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose", global = true)]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Convert a table into a JSON array of row objects
    ///
    /// The header is found by marker search on the `CRID` column unless
    /// configured otherwise. Tables without that column need
    /// `--locator fixed-offset` (optionally with `--header-line`).
    Table(TableArgs),
    /// Convert requirement tables into identifier-keyed JSON files
    Keyed(KeyedArgs),
}

#[derive(Debug, Clone, Parser)]
pub struct TableArgs {
    /// Markdown document to convert
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Write JSON to this file instead of stdout
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Parser)]
pub struct KeyedArgs {
    /// Markdown document, or a directory of documents
    #[arg(value_name = "PATH")]
    pub input: PathBuf,

    /// Directory the JSON files are written into
    #[arg(short = 'o', long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Suffix removed from input file stems when naming outputs
    #[arg(long = "strip-suffix", value_name = "SUFFIX")]
    pub strip_suffix: Option<String>,
}

/// Header location strategy selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LocatorKind {
    /// Search for the line whose first cell is the marker column
    Marker,
    /// Header at a fixed line index, data two lines below
    FixedOffset,
}

impl Args {
    /// Validate argument combinations and input paths
    pub fn validate(&self) -> Result<()> {
        match self.locator {
            Some(LocatorKind::Marker) if self.header_line.is_some() => {
                return Err(ConvertError::configuration(
                    "--header-line only applies to the fixed-offset locator",
                ));
            }
            Some(LocatorKind::FixedOffset) if self.marker_column.is_some() => {
                return Err(ConvertError::configuration(
                    "--marker-column only applies to the marker locator",
                ));
            }
            None if self.header_line.is_some() && self.marker_column.is_some() => {
                return Err(ConvertError::configuration(
                    "--marker-column and --header-line select different locators",
                ));
            }
            _ => {}
        }

        let input = self.input_path();
        if !input.exists() {
            return Err(ConvertError::SourceNotFound {
                path: input.to_path_buf(),
            });
        }

        if let Commands::Table(table) = &self.command {
            if !table.input.is_file() {
                return Err(ConvertError::configuration(format!(
                    "Input path is not a file: {}",
                    table.input.display()
                )));
            }
        }

        Ok(())
    }

    pub fn input_path(&self) -> &std::path::Path {
        match &self.command {
            Commands::Table(table) => &table.input,
            Commands::Keyed(keyed) => &keyed.input,
        }
    }

    /// Locator requested on the command line, if any
    ///
    /// `current` supplies the marker column when `--locator marker` is given
    /// without `--marker-column`.
    pub fn locator_override(&self, current: &LocatorStrategy) -> Option<LocatorStrategy> {
        let configured_marker = match current {
            LocatorStrategy::Marker { marker_column } => marker_column.clone(),
            LocatorStrategy::FixedOffset { .. } => DEFAULT_MARKER_COLUMN.to_string(),
        };

        match self.locator {
            Some(LocatorKind::Marker) => Some(LocatorStrategy::marker(
                self.marker_column.clone().unwrap_or(configured_marker),
            )),
            Some(LocatorKind::FixedOffset) => Some(LocatorStrategy::fixed_offset(
                self.header_line.unwrap_or(0),
            )),
            None => {
                if let Some(marker) = &self.marker_column {
                    Some(LocatorStrategy::marker(marker.clone()))
                } else {
                    self.header_line.map(LocatorStrategy::fixed_offset)
                }
            }
        }
    }

    /// Apply command-line overrides on top of a loaded configuration
    pub fn apply_overrides(&self, mut config: ConverterConfig) -> ConverterConfig {
        if let Some(delimiter) = self.delimiter {
            config.delimiter = delimiter;
        }
        if let Some(locator) = self.locator_override(&config.locator) {
            config.locator = locator;
        }
        if let Some(column) = &self.identifier_column {
            config.identifier_column = column.clone();
        }
        if let Commands::Keyed(keyed) = &self.command {
            if let Some(output_dir) = &keyed.output_dir {
                config.output_dir = output_dir.clone();
            }
            if let Some(suffix) = &keyed.strip_suffix {
                config.strip_suffix = suffix.clone();
            }
        }
        config
    }

    /// Get the log level based on verbosity settings
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}
