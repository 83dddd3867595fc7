//! Utilities for path collection and formatting.

use std::path::PathBuf;

use crate::error::{BookmergeError, Result};

/// Expand multiple input arguments into filesystem paths.
///
/// Accepts anything iterable with items that convert to `&str`, e.g.:
/// `&[&str]`, `Vec<String>`, or `Vec<&str>`.
///
/// Arguments containing glob metacharacters are expanded and must match at
/// least one path; matches are returned in the order `glob` yields them.
/// Plain paths are passed through untouched so that a missing file is
/// reported as such when it is read.
///
/// Errors:
/// - Propagates `glob` parse errors.
/// - Propagates filesystem errors from glob iterator.
/// - A pattern that matches nothing is an invalid configuration.
pub fn collect_paths_for_patterns<T>(patterns: T) -> Result<Vec<PathBuf>>
where
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    let mut resolved_paths = Vec::new();

    for pattern in patterns.into_iter() {
        let pattern = pattern.as_ref();
        if is_glob_pattern(pattern) {
            let paths = collect_paths_for_pattern(pattern)?;
            if paths.is_empty() {
                return Err(BookmergeError::invalid_config(format!(
                    "No files match pattern: {pattern}"
                )));
            }
            resolved_paths.extend(paths);
        } else {
            resolved_paths.push(PathBuf::from(pattern));
        }
    }

    Ok(resolved_paths)
}

/// Whether `arg` contains glob metacharacters.
pub fn is_glob_pattern(arg: &str) -> bool {
    arg.contains(['*', '?', '['])
}

/// Expand a single glob pattern into filesystem paths.
///
/// Pattern examples:
/// - `"**/*.pdf"`
/// - `"./docs/*.pdf"`
fn collect_paths_for_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    let mut resolved_paths = Vec::new();

    let paths = glob::glob(pattern).map_err(|err| {
        BookmergeError::invalid_config(format!("Invalid pattern '{pattern}': {err}"))
    })?;

    for entry in paths {
        let path = entry.map_err(|err| BookmergeError::other(err.to_string()))?;
        if path.is_file() {
            resolved_paths.push(path);
        }
    }

    Ok(resolved_paths)
}

/// Format file size as human-readable string.
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}
