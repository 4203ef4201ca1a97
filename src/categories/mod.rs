//! File categorisation by extension.
//!
//! This module contains the data structures used to classify files by their
//! extension and to accumulate the bytes seen for each one.
//!
//! ## Main Parts
//!
//! - [`CategoryMap`] - Accumulated byte totals keyed by lowercased extension
//! - [`extension_of`] - "Last dot" extension derivation for a file name

pub mod category_map;
pub mod extension;

pub use category_map::CategoryMap;
pub use extension::{extension_of, extension_of_path};
