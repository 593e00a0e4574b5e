//! Human-facing output for search runs.
//!
//! Indices are printed 1-based here; everything upstream is 0-based.
pub mod console;

pub use console::{format_accuracy, format_subset, ConsoleReporter};
