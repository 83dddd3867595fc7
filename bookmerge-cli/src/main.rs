//! bookmerge - Merge PDF files into one document with a bookmark per file.

mod cli;

use clap::Parser;
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use bookmerge::config::{Config, OverwriteMode};
use bookmerge::error::BookmergeError;
use bookmerge::io::OutputWriter;
use bookmerge::merge::{merge_files, plan_files};
use bookmerge::output::{
    OutputFormatter, display_load_statistics, display_merge_statistics, display_plan,
    display_warning,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

/// Log to stderr, honoring `RUST_LOG` when set.
fn init_tracing(cli: &Cli) {
    let default_level = if cli.verbose {
        "bookmerge=debug"
    } else if cli.quiet || cli.json {
        "error"
    } else {
        "warn"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Main application logic.
async fn run(cli: Cli) -> Result<(), BookmergeError> {
    cli.validate()?;

    let inputs = cli.get_all_inputs().await?;
    let config = cli.to_config(inputs)?;
    let formatter = OutputFormatter::from_config(&config);
    let output_path = config.output_path()?;
    debug!(
        inputs = config.inputs.len(),
        output = %output_path.display(),
        "Resolved configuration"
    );

    if formatter.should_print() {
        formatter.section(&format!("{} v{}", bookmerge::NAME, bookmerge::VERSION));
        formatter.blank_line();
    }

    if config.dry_run {
        formatter.info(&format!("Reading {} file(s)...", config.inputs.len()));
        let planned = plan_files(&config).await?;
        display_load_statistics(&formatter, &planned.load_statistics);

        if config.json {
            print_json(&planned.plan)?;
            return Ok(());
        }

        display_plan(&formatter, &planned.plan);
        formatter.blank_line();
        formatter.success("Dry run completed successfully");
        formatter.info(&format!("  Output would be: {}", output_path.display()));
        formatter.info("  Run without --dry-run to create the merged PDF");
        return Ok(());
    }

    handle_output_overwrite(&config, &formatter).await?;

    let writer = OutputWriter::new();
    writer.can_write(&output_path).await?;

    formatter.info(&format!("Merging {} file(s)...", config.inputs.len()));
    let merged = merge_files(&config).await?;
    display_load_statistics(&formatter, &merged.load_statistics);

    let summary = merged.response.summary();
    for warning in &summary.warnings {
        display_warning(&formatter, warning);
    }

    let document = merged.response.document;
    let statistics = document.statistics;

    formatter.info(&format!("Writing to: {}", output_path.display()));
    let write_stats = writer.save(document.bytes, &output_path).await?;

    if config.json {
        print_json(&summary)?;
        return Ok(());
    }

    if formatter.should_print() {
        formatter.blank_line();
        formatter.success(&format!(
            "Created {} ({} pages, {} bookmarks, {})",
            output_path.display(),
            statistics.total_pages,
            statistics.bookmarks_added,
            write_stats.format_file_size()
        ));
    }
    display_merge_statistics(&formatter, &statistics, &write_stats);

    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), BookmergeError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| BookmergeError::other(format!("Failed to serialize summary: {e}")))?;
    println!("{json}");
    Ok(())
}

/// Handle output file overwrite scenarios.
async fn handle_output_overwrite(
    config: &Config,
    formatter: &OutputFormatter,
) -> Result<(), BookmergeError> {
    let output_path = config.output_path()?;

    if !OutputWriter::new().exists(&output_path).await {
        return Ok(());
    }

    match config.overwrite_mode {
        OverwriteMode::Force => Ok(()),
        OverwriteMode::NoClobber => Err(BookmergeError::output_exists(output_path)),
        OverwriteMode::Prompt => {
            // Nobody to ask in quiet or JSON mode.
            if formatter.is_quiet() || config.json {
                return Err(BookmergeError::output_exists(output_path));
            }

            formatter.warning(&format!(
                "Output file already exists: {}",
                output_path.display()
            ));

            use std::io::{self, Write};
            print!("Overwrite? [y/N]: ");
            io::stdout().flush().ok();

            let mut response = String::new();
            io::stdin()
                .read_line(&mut response)
                .map_err(|err| BookmergeError::other(format!("Failed to read input: {err}")))?;

            let response = response.trim().to_lowercase();
            if response == "y" || response == "yes" {
                Ok(())
            } else {
                Err(BookmergeError::Cancelled)
            }
        }
    }
}
