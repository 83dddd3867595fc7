//! Output formatting and display for bookmerge.
//!
//! This module handles all user-facing output: status messages, the dry-run
//! merge plan, warnings, and summary reports.
//!
//! # Examples
//!
//! ```no_run
//! use bookmerge::output::OutputFormatter;
//! use bookmerge::config::Config;
//!
//! # fn example(config: Config) {
//! let formatter = OutputFormatter::from_config(&config);
//! formatter.info("Starting merge");
//! formatter.success("Merge completed successfully");
//! # }
//! ```

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};

use crate::io::{LoadStatistics, WriteStatistics};
use crate::merge::{MergeStatistics, MergeWarning, OutlinePlan};
use crate::utils::format_file_size;

/// Describe one planned document, e.g. `intro (3 pages, bookmark at page 1)`.
///
/// A document whose bookmark would point past the last page gets
/// `no bookmark` instead.
pub fn describe_planned(
    title: &str,
    page_count: usize,
    first_page_index: usize,
    total_pages: usize,
) -> String {
    let pages = match page_count {
        1 => "1 page".to_string(),
        n => format!("{n} pages"),
    };

    if first_page_index >= total_pages {
        format!("{title} ({pages}, no bookmark)")
    } else {
        format!("{title} ({pages}, bookmark at page {})", first_page_index + 1)
    }
}

/// Display the merge order and outline of a dry run.
pub fn display_plan(formatter: &OutputFormatter, plan: &OutlinePlan) {
    formatter.section("Files to merge (sorted by name):");
    for (index, document) in plan.documents().iter().enumerate() {
        formatter.list_item(
            index + 1,
            &describe_planned(
                &document.title,
                document.page_count,
                document.first_page_index,
                plan.total_pages(),
            ),
        );
    }
    formatter.blank_line();
    formatter.info(&format!(
        "Total: {} file(s), {} page(s)",
        plan.documents().len(),
        plan.total_pages()
    ));

    for warning in plan.warnings() {
        display_warning(formatter, &warning);
    }
}

/// Display a non-fatal merge warning.
pub fn display_warning(formatter: &OutputFormatter, warning: &MergeWarning) {
    formatter.warning(&format!("Warning: {warning}"));
}

/// Display load statistics to the user.
pub fn display_load_statistics(formatter: &OutputFormatter, stats: &LoadStatistics) {
    formatter.debug(&format!(
        "Read {} file(s) in {:.2}s: {}",
        stats.success_count,
        stats.total_time.as_secs_f64(),
        stats.format_total_size()
    ));
}

/// Display merge and write statistics. Only shown in verbose mode.
pub fn display_merge_statistics(
    formatter: &OutputFormatter,
    merge: &MergeStatistics,
    write: &WriteStatistics,
) {
    if !formatter.is_verbose() {
        return;
    }

    formatter.section("Statistics:");
    formatter.detail("Files merged", &merge.files_merged.to_string());
    formatter.detail("Total pages", &merge.total_pages.to_string());
    formatter.detail("Bookmarks", &merge.bookmarks_added.to_string());
    formatter.detail("Input size", &merge.format_input_size());
    formatter.detail("Output size", &format_file_size(write.file_size));
    formatter.detail(
        "Merge time",
        &format!("{:.2}s", merge.merge_time.as_secs_f64()),
    );
    formatter.detail(
        "Encode time",
        &format!("{:.2}s", merge.encode_time.as_secs_f64()),
    );
    formatter.detail(
        "Write time",
        &format!("{:.2}s", write.write_time.as_secs_f64()),
    );
}
