//! Small dense matrix type used to hold feature tables.
//!
//! `Array2` is a row-major buffer with just enough API for the classifier,
//! the evaluator and the preprocessing helpers. It keeps the crate free of a
//! full linear-algebra dependency.
pub mod matrix;

pub use matrix::{Array2, ShapeError};
