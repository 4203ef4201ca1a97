//! # sysprobe
//!
//! A small diagnostic CLI that reports host system information and shows how
//! the bytes under a directory are spread across file extensions.
//!
//! The report is printed as a fixed sequence of sections: system identity,
//! CPU, memory, disk partitions and finally the file categories of the
//! analysed directory, largest first, each with its share of the total.
//!
//! ## Features
//!
//! - OS, CPU, memory and disk partition summary
//! - Recursive per-extension size breakdown with case-insensitive extensions
//! - Files that vanish or cannot be read during the walk are skipped, never fatal
//! - Structured JSON output for scripting
//! - Persistent configuration via `~/.config/sysprobe/config.toml`
//!
//! ## Usage
//!
//! ```bash
//! # Full report for the current directory
//! sysprobe
//!
//! # Analyse another directory
//! sysprobe ~/Downloads
//! ANALYZE_PATH=/srv/data sysprobe
//!
//! # Only the file categories, as JSON
//! sysprobe --categories-only --json ~/Downloads
//! ```

pub mod aggregator;
pub mod categories;
pub mod config;
pub mod output;
pub mod report;
pub mod system;
pub mod utils;

pub use aggregator::{Aggregator, FileVisit, FsProbe, Scan, SizeProbe, SkipReason, SkippedEntry};
pub use categories::CategoryMap;
pub use config::{FileConfig, ReportOptions, ScanOptions};
