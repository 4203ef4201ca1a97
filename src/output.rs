//! Structured JSON output for scripting and piping.
//!
//! This module provides serializable data structures that represent the
//! complete report. When the `--json` flag is passed, these structures are
//! serialized to stdout as a single JSON object, replacing all human-readable
//! output.

use std::path::Path;

use serde::Serialize;

use crate::{
    categories::CategoryMap,
    report::{CategoryLine, format_categories},
    system::SystemReport,
    utils::scale_bytes,
};

/// Top-level JSON output emitted when `--json` is active.
#[derive(Debug, Serialize)]
pub struct JsonOutput {
    /// Host sections. Absent when only file categories were requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<SystemReport>,

    /// File categories under the analysed directory.
    pub categories: JsonCategories,
}

/// The file categories section.
#[derive(Debug, Serialize)]
pub struct JsonCategories {
    /// Directory that was analysed.
    pub root: String,

    /// Sum of all category sizes in bytes.
    pub total_size: u64,

    /// Human-readable formatted total (e.g. `"1.20MB"`).
    pub total_size_formatted: String,

    /// Number of files whose size was counted.
    pub files_counted: usize,

    /// Number of entries skipped during the walk.
    pub skipped: usize,

    /// Categories, largest first.
    pub entries: Vec<JsonCategoryEntry>,
}

/// A single category in the JSON output.
#[derive(Debug, Serialize)]
pub struct JsonCategoryEntry {
    /// Lowercased extension including the dot, empty for files without one.
    pub extension: String,

    /// Display label (`"No extension"` for the empty extension).
    pub label: String,

    /// Accumulated size in bytes.
    pub size: u64,

    /// Human-readable formatted size.
    pub size_formatted: String,

    /// Share of the total size, in percent.
    pub percentage: f64,
}

impl JsonOutput {
    /// Build the JSON document for one run.
    #[must_use]
    pub fn new(
        system: Option<SystemReport>,
        root: &Path,
        categories: &CategoryMap,
        files_counted: usize,
        skipped: usize,
    ) -> Self {
        Self {
            system,
            categories: JsonCategories::from_categories(root, categories, files_counted, skipped),
        }
    }
}

impl JsonCategories {
    /// Compute the categories section from an aggregated map.
    #[must_use]
    pub fn from_categories(
        root: &Path,
        categories: &CategoryMap,
        files_counted: usize,
        skipped: usize,
    ) -> Self {
        let total_size = categories.total();

        Self {
            root: root.display().to_string(),
            total_size,
            total_size_formatted: scale_bytes(total_size),
            files_counted,
            skipped,
            entries: format_categories(categories)
                .iter()
                .map(JsonCategoryEntry::from_line)
                .collect(),
        }
    }
}

impl JsonCategoryEntry {
    /// Convert a formatted [`CategoryLine`] into a JSON entry.
    #[must_use]
    pub fn from_line(line: &CategoryLine) -> Self {
        Self {
            extension: line.extension.clone(),
            label: line.label().to_string(),
            size: line.size,
            size_formatted: scale_bytes(line.size),
            percentage: line.percentage,
        }
    }
}
