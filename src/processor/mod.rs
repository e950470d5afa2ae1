//! Document conversion pipeline.
//!
//! Ties the table core to the filesystem: reads one document, locates and
//! maps its table, validates keyed output against the schema contract and
//! writes the result. Batch conversion runs every discovered document as an
//! independent unit and records one outcome per file.

pub mod discovery;
pub mod writer;

#[cfg(test)]
pub mod tests;

use self::{discovery::MarkdownDiscovery, writer::JsonWriter};

use crate::config::ConverterConfig;
use crate::error::{ConvertError, Result};
use crate::models::{GenericRecord, KeyedTable, MappedTable, MappingStats, ProcessingStats};
use crate::schema::{SchemaContract, SchemaValidator};
use crate::table::{GenericRowMapper, HeaderLocator, KeyedRowMapper};

use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Read a source document as UTF-8 text
pub fn read_source(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(ConvertError::SourceNotFound {
            path: path.to_path_buf(),
        });
    }
    std::fs::read_to_string(path).map_err(|e| ConvertError::io(path, e))
}

/// A keyed document that was validated and persisted
#[derive(Debug, Clone, PartialEq)]
pub struct WrittenDocument {
    pub source: PathBuf,
    pub output: PathBuf,
    pub records: usize,
    pub bytes_written: u64,
    pub stats: MappingStats,
}

/// Converts single documents with a fixed configuration
#[derive(Debug)]
pub struct DocumentConverter {
    config: ConverterConfig,
    locator: HeaderLocator,
    generic_mapper: GenericRowMapper,
    keyed_mapper: KeyedRowMapper,
    validator: SchemaValidator,
    writer: JsonWriter,
}

impl DocumentConverter {
    /// Validate the configuration and compile the schema contract
    pub fn new(config: ConverterConfig, contract: &SchemaContract) -> Result<Self> {
        config.validate()?;
        let validator = SchemaValidator::new(contract)?;

        Ok(Self {
            locator: HeaderLocator::new(config.locator.clone(), config.delimiter),
            generic_mapper: GenericRowMapper::new(config.delimiter),
            keyed_mapper: KeyedRowMapper::new(config.delimiter, config.identifier_column.clone()),
            writer: JsonWriter::new(config.output_dir.clone(), config.strip_suffix.clone()),
            validator,
            config,
        })
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    pub fn writer(&self) -> &JsonWriter {
        &self.writer
    }

    /// Convert markdown text into header-keyed row objects
    pub fn convert_generic_text(&self, text: &str) -> Result<MappedTable<Vec<GenericRecord>>> {
        let table = self.locator.locate(text)?;
        Ok(self.generic_mapper.map(&table))
    }

    /// Convert markdown text into identifier-keyed records
    ///
    /// The result has already passed schema validation.
    pub fn convert_keyed_text(&self, text: &str) -> Result<MappedTable<KeyedTable>> {
        let table = self.locator.locate(text)?;
        let mapped = self.keyed_mapper.map(&table)?;
        self.validator.validate_keyed(&mapped.data)?;
        Ok(mapped)
    }

    /// Read and convert one document into header-keyed row objects
    pub fn convert_generic_file(&self, path: &Path) -> Result<MappedTable<Vec<GenericRecord>>> {
        let text = read_source(path)?;
        let mapped = self.convert_generic_text(&text)?;
        debug!(
            "{}: {} records, {} malformed rows discarded",
            path.display(),
            mapped.stats.records_emitted,
            mapped.stats.shape_mismatches
        );
        Ok(mapped)
    }

    /// Read, convert, validate and write one keyed document
    ///
    /// Nothing is written when any step fails.
    pub fn convert_keyed_file(&self, path: &Path) -> Result<WrittenDocument> {
        let text = read_source(path)?;
        let mapped = self.convert_keyed_text(&text)?;
        let (output, bytes_written) = self.writer.write(path, &mapped.data)?;

        info!(
            "Converted {} -> {} ({} records)",
            path.display(),
            output.display(),
            mapped.data.len()
        );

        Ok(WrittenDocument {
            source: path.to_path_buf(),
            output,
            records: mapped.data.len(),
            bytes_written,
            stats: mapped.stats,
        })
    }
}

/// Result of converting one document in a batch
#[derive(Debug)]
pub struct DocumentOutcome {
    pub source: PathBuf,
    pub result: Result<WrittenDocument>,
}

impl DocumentOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcomes of a batch run, in discovery order
#[derive(Debug)]
pub struct BatchReport {
    pub outcomes: Vec<DocumentOutcome>,
    pub stats: ProcessingStats,
}

impl BatchReport {
    pub fn failures(&self) -> impl Iterator<Item = &DocumentOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.is_success())
    }

    pub fn has_failures(&self) -> bool {
        self.stats.files_failed > 0
    }
}

/// Converts every markdown document in a directory
#[derive(Debug)]
pub struct BatchProcessor {
    converter: DocumentConverter,
    show_progress: bool,
}

impl BatchProcessor {
    pub fn new(converter: DocumentConverter) -> Self {
        Self {
            converter,
            show_progress: false,
        }
    }

    /// Show a progress bar while converting
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn converter(&self) -> &DocumentConverter {
        &self.converter
    }

    /// Discover and convert every document in `input_dir`
    ///
    /// Only discovery failures are returned as errors. Per-document failures
    /// are captured in the report.
    pub fn process_directory(&self, input_dir: &Path) -> Result<BatchReport> {
        let discovery = MarkdownDiscovery::new(
            input_dir.to_path_buf(),
            &self.converter.config().markdown_extension,
        );
        let files = discovery.discover()?;

        if files.is_empty() {
            warn!("No markdown files found in {}", input_dir.display());
        } else {
            info!(
                "Found {} markdown files in {}",
                files.len(),
                input_dir.display()
            );
        }

        Ok(self.process_files(&files))
    }

    /// Convert each file independently, in order
    pub fn process_files(&self, files: &[PathBuf]) -> BatchReport {
        let start_time = Instant::now();
        let progress_bar = self.create_progress_bar(files.len() as u64);

        let mut stats = ProcessingStats {
            output_path: self.converter.writer().output_dir().to_path_buf(),
            ..Default::default()
        };
        let mut outcomes = Vec::with_capacity(files.len());

        for file in files {
            progress_bar.set_message(display_name(file));

            let result = self.converter.convert_keyed_file(file);
            match &result {
                Ok(written) => {
                    stats.files_processed += 1;
                    stats.total_records += written.records;
                }
                Err(e) => {
                    error!("Failed to convert {}: {}", file.display(), e);
                    stats.files_failed += 1;
                }
            }

            outcomes.push(DocumentOutcome {
                source: file.clone(),
                result,
            });
            progress_bar.inc(1);
        }

        progress_bar.finish_and_clear();
        stats.processing_time_ms = start_time.elapsed().as_millis();

        debug!(
            "Batch finished: {} converted, {} failed in {}ms",
            stats.files_processed, stats.files_failed, stats.processing_time_ms
        );

        BatchReport { outcomes, stats }
    }

    fn create_progress_bar(&self, total: u64) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(total);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        pb.set_style(style);
        pb
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
