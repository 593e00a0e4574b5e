use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which search to run.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// Start from no features and add one per level.
    #[default]
    Forward,
    /// Start from every feature and remove one per level.
    Backward,
    /// Score every subset of exactly `target_size` features.
    Exhaustive,
}

impl SearchStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            SearchStrategy::Forward => "forward",
            SearchStrategy::Backward => "backward",
            SearchStrategy::Exhaustive => "exhaustive",
        }
    }
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SearchStrategy {
    type Err = String;

    /// Accepts the strategy names as well as the menu numbers `1`, `2`, `3`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "forward" | "forward-selection" | "forward_selection" => {
                Ok(SearchStrategy::Forward)
            }
            "2" | "backward" | "backward-elimination" | "backward_elimination" => {
                Ok(SearchStrategy::Backward)
            }
            "3" | "exhaustive" => Ok(SearchStrategy::Exhaustive),
            other => Err(format!(
                "Unknown search strategy: {}. Expected forward (1), backward (2) or exhaustive (3)",
                other
            )),
        }
    }
}

/// Parameters for one search run.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct SearchConfig {
    pub strategy: SearchStrategy,
    /// Number of leading columns to search over. Defaults to every column.
    pub total_features: Option<usize>,
    /// Final subset size for greedy searches, or the fixed subset size for an
    /// exhaustive scan. Defaults to all features (forward), 1 (backward) and
    /// 3 (exhaustive, capped at the feature count).
    pub target_size: Option<usize>,
    /// Also flag an accuracy decrease at the first forward level.
    pub warn_on_first_forward_level: bool,
}

impl SearchConfig {
    pub const DEFAULT_EXHAUSTIVE_SIZE: usize = 3;

    pub fn new(strategy: SearchStrategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    pub fn with_target_size(mut self, target_size: usize) -> Self {
        self.target_size = Some(target_size);
        self
    }
}
