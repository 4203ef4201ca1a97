//! Directory walking and per-extension size aggregation.
//!
//! This module provides the logic that traverses a directory tree, classifies
//! every file it finds by extension and sums the file sizes per extension.
//! Files that vanish or cannot be read while the walk is in progress are
//! skipped and recorded, never reported as errors.

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use walkdir::WalkDir;

use crate::{
    categories::{CategoryMap, extension_of_path},
    config::ScanOptions,
};

/// Number of files between two spinner updates.
const PROGRESS_EVERY: usize = 256;

/// Source of file sizes for the aggregator.
///
/// The default implementation, [`FsProbe`], asks the filesystem. Tests provide
/// their own probe to simulate files that change while the walk is running.
pub trait SizeProbe {
    /// Return the size in bytes of the file at `path`.
    ///
    /// `Ok(None)` means the path resolves to something that is not a file
    /// (for instance a symbolic link to a directory) and must be ignored.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the size cannot be read.
    fn size_of(&self, path: &Path) -> io::Result<Option<u64>>;
}

/// [`SizeProbe`] backed by `std::fs::metadata`.
///
/// Symbolic links are followed, so a link to a file is counted with the size
/// of its target and a dangling link fails with `NotFound`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

impl SizeProbe for FsProbe {
    fn size_of(&self, path: &Path) -> io::Result<Option<u64>> {
        let metadata = fs::metadata(path)?;

        if metadata.is_dir() {
            Ok(None)
        } else {
            Ok(Some(metadata.len()))
        }
    }
}

/// Why an entry was left out of the aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The entry disappeared between listing and reading its size
    NotFound,

    /// The entry exists but may not be read
    PermissionDenied,

    /// Any other I/O failure, with its message
    Other(String),
}

impl From<&io::Error> for SkipReason {
    fn from(error: &io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => Self::NotFound,
            io::ErrorKind::PermissionDenied => Self::PermissionDenied,
            _ => Self::Other(error.to_string()),
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => f.write_str("no longer exists"),
            Self::PermissionDenied => f.write_str("permission denied"),
            Self::Other(message) => f.write_str(message),
        }
    }
}

/// A file or directory that could not be included in the aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    /// Path of the skipped entry
    pub path: PathBuf,

    /// Reason the entry was skipped
    pub reason: SkipReason,
}

impl SkippedEntry {
    /// Build a skipped entry from an error reported by the directory walk.
    fn from_walk_error(error: &walkdir::Error, root: &Path) -> Self {
        let path = error
            .path()
            .map_or_else(|| root.to_path_buf(), Path::to_path_buf);

        let reason = error.io_error().map_or_else(
            || SkipReason::Other(error.to_string()),
            SkipReason::from,
        );

        Self { path, reason }
    }
}

impl fmt::Display for SkippedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Skipped {}: {}", self.path.display(), self.reason)
    }
}

/// Outcome of visiting a single non-directory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileVisit {
    /// The file was read and contributes `size` bytes to `extension`
    Counted {
        /// Lowercased extension, including the leading dot
        extension: String,

        /// File size in bytes
        size: u64,
    },

    /// The entry resolved to something that is not a file
    Ignored,

    /// The file could not be read and is left out
    Skipped(SkippedEntry),
}

/// Result of a full aggregation pass.
#[derive(Debug, Clone, Default)]
pub struct Scan {
    /// Accumulated bytes per extension
    pub categories: CategoryMap,

    /// Entries that had to be skipped, in walk order
    pub skipped: Vec<SkippedEntry>,

    /// Number of files whose size was folded into `categories`
    pub files_counted: usize,
}

impl Scan {
    /// Fold one visit into the scan.
    ///
    /// Skipped visits are recorded but never contribute to the totals.
    pub fn record(&mut self, visit: FileVisit) {
        match visit {
            FileVisit::Counted { extension, size } => {
                self.categories.add(&extension, size);
                self.files_counted += 1;
            }
            FileVisit::Ignored => {}
            FileVisit::Skipped(entry) => self.skipped.push(entry),
        }
    }
}

/// Directory walker that aggregates file sizes by extension.
///
/// The `Aggregator` walks the tree below a root directory, reads the size of
/// every file through its [`SizeProbe`] and builds a [`CategoryMap`]. It runs
/// on the calling thread and keeps no state between calls.
#[derive(Debug)]
pub struct Aggregator<P = FsProbe> {
    /// Configuration options for scanning behavior
    scan_options: ScanOptions,

    /// Where file sizes come from
    probe: P,

    /// When `true`, suppresses progress spinner output (used by `--json` mode).
    quiet: bool,
}

impl Aggregator<FsProbe> {
    /// Create a new aggregator that reads sizes from the filesystem.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sysprobe::aggregator::Aggregator;
    /// # use sysprobe::config::ScanOptions;
    /// let aggregator = Aggregator::new(ScanOptions::default()).with_quiet(true);
    /// let categories = aggregator.aggregate(std::path::Path::new("."));
    /// println!("{} extensions", categories.len());
    /// ```
    #[must_use]
    pub const fn new(scan_options: ScanOptions) -> Self {
        Self {
            scan_options,
            probe: FsProbe,
            quiet: false,
        }
    }
}

impl<P: SizeProbe> Aggregator<P> {
    /// Replace the size probe.
    #[must_use]
    pub fn with_probe<Q: SizeProbe>(self, probe: Q) -> Aggregator<Q> {
        Aggregator {
            scan_options: self.scan_options,
            probe,
            quiet: self.quiet,
        }
    }

    /// Enable or disable quiet mode (suppresses progress spinner).
    ///
    /// When quiet mode is active the scanning spinner is hidden, which is
    /// required for `--json` output so that only the final JSON is printed.
    #[must_use]
    pub const fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Aggregate file sizes by extension below `root`.
    ///
    /// A root that does not exist or cannot be read yields an empty map.
    pub fn aggregate(&self, root: &Path) -> CategoryMap {
        self.scan(root).categories
    }

    /// Walk `root` and return the aggregated sizes along with every skip.
    ///
    /// The walk is recursive and unbounded unless `max_depth` is set.
    /// Symbolic links are not followed into directories. The root entry
    /// itself is never counted, so passing a file as `root` yields an empty
    /// result.
    ///
    /// In verbose mode every skipped entry is printed to stderr once the walk
    /// has finished.
    pub fn scan(&self, root: &Path) -> Scan {
        let progress = self.spinner();
        let mut scan = Scan::default();

        let mut walker = WalkDir::new(root);
        if let Some(depth) = self.scan_options.max_depth {
            walker = walker.max_depth(depth);
        }

        for entry in walker {
            match entry {
                Ok(entry) if entry.depth() == 0 || entry.file_type().is_dir() => {}
                Ok(entry) => {
                    scan.record(self.visit_file(entry.path()));

                    if scan.files_counted.is_multiple_of(PROGRESS_EVERY) {
                        progress.set_message(format!("Scanning... {} files", scan.files_counted));
                    }
                }
                Err(err) => scan.skipped.push(SkippedEntry::from_walk_error(&err, root)),
            }
        }

        progress.finish_and_clear();

        if self.scan_options.verbose {
            for skipped in &scan.skipped {
                eprintln!("{}", skipped.to_string().red());
            }
        }

        scan
    }

    /// Read the size and extension of a single file.
    pub fn visit_file(&self, path: &Path) -> FileVisit {
        match self.probe.size_of(path) {
            Ok(Some(size)) => FileVisit::Counted {
                extension: extension_of_path(path),
                size,
            },
            Ok(None) => FileVisit::Ignored,
            Err(err) => FileVisit::Skipped(SkippedEntry {
                path: path.to_path_buf(),
                reason: SkipReason::from(&err),
            }),
        }
    }

    fn spinner(&self) -> ProgressBar {
        if self.quiet {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(style);
        }
        pb.set_message("Scanning...");
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}
