//! Scanning configuration for directory traversal.
//!
//! This module defines the options that control how the target directory is
//! walked and what is reported about files that had to be skipped.

/// Configuration for directory scanning behavior.
#[derive(Clone, Debug, Default)]
pub struct ScanOptions {
    /// Whether to print every skipped file or directory after the scan
    pub verbose: bool,

    /// Maximum directory depth to walk (None = unlimited)
    pub max_depth: Option<usize>,
}
