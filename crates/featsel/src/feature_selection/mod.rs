//! Feature subset search.
//!
//! Greedy forward selection, greedy backward elimination and an exhaustive
//! fixed-size scan, all scored through a `SubsetEvaluator` and narrated to a
//! `Reporter`.
pub mod reporter;
pub mod search;

pub use reporter::{NullReporter, RecordingReporter, Reporter, SearchEvent};
pub use search::{SearchEngine, SearchOptions, SearchResult};
