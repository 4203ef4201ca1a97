//! Configuration types for scanning and reporting.
//!
//! Runtime options are assembled by the CLI from command-line arguments, the
//! environment and the optional [`FileConfig`] on disk.

pub mod file;
pub mod report;
pub mod scan;

pub use file::FileConfig;
pub use report::ReportOptions;
pub use scan::ScanOptions;
