//! featsel: greedy wrapper feature selection.
//!
//! This crate provides a nearest-neighbor classifier, a leave-one-out
//! evaluator that scores feature subsets with it, and a search engine that
//! runs forward selection, backward elimination or an exhaustive fixed-size
//! scan over feature indices. Table loading, min-max normalization and
//! console reporting live in their own modules so the search core only sees
//! a `Dataset` and a `Reporter`.
pub mod config;
pub mod dataset;
pub mod error;
pub mod evaluation;
pub mod feature_selection;
pub mod io;
pub mod math;
pub mod models;
pub mod preprocessing;
pub mod report;
pub mod subset;

pub use dataset::Dataset;
pub use error::{Result, SelectionError};
pub use subset::FeatureSubset;
