//! Extension derivation for file names.

use std::path::Path;

/// Derive the lowercased extension of a file name, including the leading dot.
///
/// The extension is everything from the *last* `.` to the end of the name.
/// Leading dots are part of the stem, so dotfiles such as `.gitignore` have no
/// extension. A name ending in a dot (`"notes."`) has the extension `"."`.
/// Names without a dot yield the empty string.
///
/// # Examples
///
/// ```
/// # use sysprobe::categories::extension_of;
/// assert_eq!(extension_of("report.PDF"), ".pdf");
/// assert_eq!(extension_of("archive.tar.gz"), ".gz");
/// assert_eq!(extension_of(".gitignore"), "");
/// assert_eq!(extension_of("Makefile"), "");
/// ```
#[must_use]
pub fn extension_of(file_name: &str) -> String {
    let stem_start = file_name.len() - file_name.trim_start_matches('.').len();
    let rest = &file_name[stem_start..];

    rest.rfind('.')
        .map_or_else(String::new, |dot| rest[dot..].to_lowercase())
}

/// Derive the extension of the final component of `path`.
///
/// Paths without a file name (e.g. `/` or `..`) have no extension. Non UTF-8
/// names are converted lossily before the extension is taken.
#[must_use]
pub fn extension_of_path(path: &Path) -> String {
    path.file_name()
        .map(|name| extension_of(&name.to_string_lossy()))
        .unwrap_or_default()
}
