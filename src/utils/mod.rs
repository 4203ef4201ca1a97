//! Utility functions and helpers.
//!
//! This module contains utility functions used throughout the application,
//! such as byte-size scaling and percentage helpers.

pub mod size;

pub use size::{percentage, scale_bytes};
