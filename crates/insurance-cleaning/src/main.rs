//! CLI entry point for the insurance data cleaning pipeline.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use insurance_cleaning::config::{DEFAULT_DESTINATION, DEFAULT_SOURCE};
use insurance_cleaning::{CleaningConfig, CleaningSummary, Pipeline};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Insurance customer data cleaning pipeline",
    long_about = "Normalizes a raw insurance customer CSV and writes a clean copy.\n\n\
                  EXAMPLES:\n  \
                  # Clean the public dataset into ./cleaned_data.csv\n  \
                  insurance-cleaning\n\n  \
                  # Clean a local file into a custom location\n  \
                  insurance-cleaning -i data/file1.csv -o out/cleaned.csv\n\n  \
                  # Clean without writing, print the summary as JSON\n  \
                  insurance-cleaning -i data/file1.csv --dry-run --json"
)]
struct Args {
    /// Path or http(s) URL of the raw CSV
    #[arg(short, long, default_value = DEFAULT_SOURCE)]
    input: String,

    /// Path the cleaned CSV is written to
    #[arg(short, long, default_value = DEFAULT_DESTINATION)]
    output: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and final result)
    #[arg(short, long)]
    quiet: bool,

    /// Output the cleaning summary as JSON to stdout
    ///
    /// Disables all progress logs; only outputs the JSON summary.
    #[arg(long)]
    json: bool,

    /// Write the cleaning summary as JSON to this path
    #[arg(short = 'r', long)]
    report: Option<PathBuf>,

    /// Load and clean, but do not write the cleaned CSV
    #[arg(long)]
    dry_run: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level, args.quiet, args.json);

    let config = CleaningConfig::builder()
        .source(&args.input)
        .destination(&args.output)
        .save_to_disk(!args.dry_run)
        .build()?;

    let result = Pipeline::builder().build().run(&config).map_err(|e| {
        error!("Cleaning failed: {}", e);
        anyhow!("Cleaning failed ({}): {}", e.error_code(), e)
    })?;

    if let Some(ref path) = args.report {
        let json = serde_json::to_string_pretty(&result.summary)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        info!("Report written to: {}", path.display());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result.summary)?);
        return Ok(());
    }

    if args.dry_run {
        print_summary(&result.summary);
        println!("Dry run: nothing written to {}", config.destination.display());
        return Ok(());
    }

    if !args.quiet {
        print_summary(&result.summary);
    }
    println!(
        "Data cleaning completed! Cleaned file saved as: {}",
        config.destination.display()
    );
    Ok(())
}

/// Print a human-readable summary of the run.
///
/// Uses `println!` so the summary shows regardless of log level.
fn print_summary(summary: &CleaningSummary) {
    println!("\n{}", "=".repeat(60));
    println!("CLEANING SUMMARY");
    println!("{}", "=".repeat(60));
    println!(
        "  Rows:    {} -> {} ({:.1}% removed)",
        summary.rows_before,
        summary.rows_after,
        summary.rows_removed_percentage()
    );
    println!(
        "  Columns: {} -> {}",
        summary.columns_before, summary.columns_after
    );
    println!(
        "  Missing cells: {} -> {}",
        summary.nulls_before, summary.nulls_after
    );
    println!("  Rows without customer dropped: {}", summary.rows_dropped_missing_customer);
    println!("  Duplicate rows removed: {}", summary.duplicates_removed);
    println!("  Duration: {}ms", summary.duration_ms);
    println!();

    for report in &summary.stages {
        println!("{}", report.stage);
        for action in &report.actions {
            println!("  - {}", action);
        }
    }
    println!("{}\n", "=".repeat(60));
}
