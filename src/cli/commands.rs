//! Command implementations for the table converter CLI
//!
//! Loads layered configuration, dispatches to the generic or keyed
//! conversion, and prints the run summary.

use crate::cli::args::{Args, Commands, KeyedArgs, TableArgs};
use crate::config::ConverterConfig;
use crate::error::ConvertError;
use crate::models::ProcessingStats;
use crate::processor::writer::{to_pretty_json, write_json_file};
use crate::processor::{BatchProcessor, BatchReport, DocumentConverter};
use crate::schema::SchemaContract;
use anyhow::{Context, Result};
use colored::*;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Main command runner
///
/// Sets up logging, then converts the requested input. Per-document failures
/// in a batch are reported through `files_failed` rather than as an error.
pub fn run(args: Args) -> Result<ProcessingStats> {
    setup_logging(&args)?;

    info!("Starting crtable");
    debug!("Command line arguments: {:?}", args);

    execute(&args)
}

/// Validate arguments, build the converter and run the subcommand
pub fn execute(args: &Args) -> Result<ProcessingStats> {
    args.validate()?;

    let config = load_configuration(args)?;
    debug!("Loaded configuration: {:?}", config);

    let contract = match &args.schema {
        Some(path) => SchemaContract::from_path(path)
            .with_context(|| format!("Failed to load schema {}", path.display()))?,
        None => SchemaContract::default(),
    };

    let converter = DocumentConverter::new(config, &contract)?;

    match &args.command {
        Commands::Table(table) => run_table(&converter, table),
        Commands::Keyed(keyed) => run_keyed(args, converter, keyed),
    }
}

/// Load configuration using the layered approach (file -> args)
pub fn load_configuration(args: &Args) -> Result<ConverterConfig> {
    let config = ConverterConfig::load_layered(args.config_file.as_deref())?;
    let config = args.apply_overrides(config);
    config.validate()?;
    Ok(config)
}

/// Set up structured logging based on CLI arguments
fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("crtable={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .context("Failed to initialise logging")?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .context("Failed to initialise logging")?;
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Generic conversion of one document to stdout or a file
fn run_table(converter: &DocumentConverter, table: &TableArgs) -> Result<ProcessingStats> {
    let start_time = Instant::now();

    let records = match converter.convert_generic_file(&table.input) {
        Ok(mapped) => mapped.data,
        Err(ConvertError::HeaderNotLocated { reason }) => {
            warn!(
                "No table header found in {}: {}",
                table.input.display(),
                reason
            );
            Vec::new()
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to convert {}", table.input.display()));
        }
    };

    let total_records = records.len();
    let rows = Value::Array(records.into_iter().map(Value::Object).collect());

    match &table.output {
        Some(path) => {
            write_json_file(&rows, path)?;
            info!("Wrote {} records to {}", total_records, path.display());
        }
        None => println!("{}", to_pretty_json(&rows)?),
    }

    Ok(ProcessingStats {
        files_processed: 1,
        files_failed: 0,
        total_records,
        output_path: table.output.clone().unwrap_or_default(),
        processing_time_ms: start_time.elapsed().as_millis(),
    })
}

/// Keyed conversion of a single document or a whole directory
fn run_keyed(
    args: &Args,
    converter: DocumentConverter,
    keyed: &KeyedArgs,
) -> Result<ProcessingStats> {
    if keyed.input.is_file() {
        let start_time = Instant::now();
        let written = converter
            .convert_keyed_file(&keyed.input)
            .with_context(|| format!("Failed to convert {}", keyed.input.display()))?;

        let stats = ProcessingStats {
            files_processed: 1,
            files_failed: 0,
            total_records: written.records,
            output_path: written.output,
            processing_time_ms: start_time.elapsed().as_millis(),
        };
        if !args.quiet {
            print_summary(&stats);
        }
        return Ok(stats);
    }

    let processor = BatchProcessor::new(converter).with_progress(args.show_progress());
    let report = processor
        .process_directory(&keyed.input)
        .with_context(|| format!("Failed to scan {}", keyed.input.display()))?;

    if !args.quiet {
        print_failures(&report);
        print_summary(&report.stats);
    }

    Ok(report.stats)
}

fn print_failures(report: &BatchReport) {
    for outcome in report.failures() {
        if let Err(e) = &outcome.result {
            println!(
                "  {} {}: {}",
                "Failed".bright_red(),
                outcome.source.display(),
                e
            );
        }
    }
}

/// Print the colored run summary
fn print_summary(stats: &ProcessingStats) {
    println!("\n{}", "Conversion Summary".bright_green().bold());
    println!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        stats.processing_time_ms.to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Files converted:".bright_cyan(),
        stats.files_processed.to_string().bright_white()
    );
    if stats.files_failed > 0 {
        println!(
            "  {} {}",
            "Files failed:".bright_red(),
            stats.files_failed.to_string().bright_red().bold()
        );
    }
    println!(
        "  {} {}",
        "Total records:".bright_cyan(),
        stats.total_records.to_string().bright_white().bold()
    );
    println!(
        "  {} {}",
        "Output:".bright_cyan(),
        stats.output_path.display()
    );
}
