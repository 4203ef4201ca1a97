//! Text rendering of the report.
//!
//! The formatter turns a [`CategoryMap`] into an ordered list of
//! [`CategoryLine`]s, largest category first, each carrying its scaled size
//! and its share of the total. Section titles are framed the same way for
//! every part of the report.

use std::fmt;

use crate::{
    categories::CategoryMap,
    utils::{percentage, scale_bytes},
};

/// Width of the `=` runs on both sides of a section title.
const RULE_WIDTH: usize = 40;

/// Label used for files without an extension.
pub const NO_EXTENSION_LABEL: &str = "No extension";

/// Title of the file categories section.
pub const FILE_CATEGORIES_TITLE: &str = "File Categories";

/// Frame a section title with runs of `=` characters.
///
/// # Examples
///
/// ```
/// # use sysprobe::report::section_title;
/// let title = section_title("CPU Info");
/// assert!(title.starts_with("==="));
/// assert!(title.contains(" CPU Info "));
/// ```
#[must_use]
pub fn section_title(title: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!("{rule} {title} {rule}")
}

/// One printable row of the file categories section.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryLine {
    /// Raw extension key (empty for files without an extension)
    pub extension: String,

    /// Accumulated bytes for the extension
    pub size: u64,

    /// Share of the total, in percent
    pub percentage: f64,
}

impl CategoryLine {
    /// Display label: the extension, or [`NO_EXTENSION_LABEL`] when empty.
    #[must_use]
    pub fn label(&self) -> &str {
        if self.extension.is_empty() {
            NO_EXTENSION_LABEL
        } else {
            &self.extension
        }
    }
}

impl fmt::Display for CategoryLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} ({:.2}%)",
            self.label(),
            scale_bytes(self.size),
            self.percentage
        )
    }
}

/// Order categories by descending size and compute each one's percentage.
///
/// Equal sizes are ordered by extension ascending, so the empty extension
/// comes first among ties. A map whose total is zero (only empty files)
/// reports `0.00%` for every category; an empty map yields no lines.
#[must_use]
pub fn format_categories(categories: &CategoryMap) -> Vec<CategoryLine> {
    let total = categories.total();

    let mut lines: Vec<CategoryLine> = categories
        .iter()
        .map(|(extension, size)| CategoryLine {
            extension: extension.to_string(),
            size,
            percentage: percentage(size, total),
        })
        .collect();

    lines.sort_by(|a, b| {
        b.size
            .cmp(&a.size)
            .then_with(|| a.extension.cmp(&b.extension))
    });

    lines
}

/// Render the whole file categories section, title included.
#[must_use]
pub fn render_categories(categories: &CategoryMap) -> Vec<String> {
    let mut out = vec![section_title(FILE_CATEGORIES_TITLE)];
    out.extend(
        format_categories(categories)
            .iter()
            .map(ToString::to_string),
    );
    out
}
