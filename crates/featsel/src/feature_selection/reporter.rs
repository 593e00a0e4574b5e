use serde::Serialize;

use crate::subset::FeatureSubset;

/// One-way sink for search progress. The engine never reads anything back.
pub trait Reporter {
    /// The starting subset has been scored: empty for forward selection,
    /// full for backward elimination.
    fn on_initial(&mut self, _subset: &FeatureSubset, _accuracy: f64) {}

    fn on_candidate(&mut self, subset: &FeatureSubset, accuracy: f64);

    /// The subset adopted at the end of a level. `decreased` is set when the
    /// level did not beat the best accuracy seen so far and a warning applies.
    fn on_level_chosen(&mut self, subset: &FeatureSubset, accuracy: f64, decreased: bool);

    fn on_finished(&mut self, best_subset: &FeatureSubset, best_accuracy: f64);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn on_candidate(&mut self, _subset: &FeatureSubset, _accuracy: f64) {}
    fn on_level_chosen(&mut self, _subset: &FeatureSubset, _accuracy: f64, _decreased: bool) {}
    fn on_finished(&mut self, _best_subset: &FeatureSubset, _best_accuracy: f64) {}
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SearchEvent {
    Initial { subset: FeatureSubset, accuracy: f64 },
    Candidate { subset: FeatureSubset, accuracy: f64 },
    LevelChosen { subset: FeatureSubset, accuracy: f64, decreased: bool },
    Finished { subset: FeatureSubset, accuracy: f64 },
}

/// Keeps every event in arrival order.
#[derive(Debug, Default, Clone)]
pub struct RecordingReporter {
    pub events: Vec<SearchEvent>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn candidates(&self) -> impl Iterator<Item = (&FeatureSubset, f64)> + '_ {
        self.events.iter().filter_map(|e| match e {
            SearchEvent::Candidate { subset, accuracy } => Some((subset, *accuracy)),
            _ => None,
        })
    }

    /// `(subset, accuracy, decreased)` for every completed level.
    pub fn levels(&self) -> Vec<(&FeatureSubset, f64, bool)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SearchEvent::LevelChosen {
                    subset,
                    accuracy,
                    decreased,
                } => Some((subset, *accuracy, *decreased)),
                _ => None,
            })
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn on_initial(&mut self, subset: &FeatureSubset, accuracy: f64) {
        self.events.push(SearchEvent::Initial {
            subset: subset.clone(),
            accuracy,
        });
    }

    fn on_candidate(&mut self, subset: &FeatureSubset, accuracy: f64) {
        self.events.push(SearchEvent::Candidate {
            subset: subset.clone(),
            accuracy,
        });
    }

    fn on_level_chosen(&mut self, subset: &FeatureSubset, accuracy: f64, decreased: bool) {
        self.events.push(SearchEvent::LevelChosen {
            subset: subset.clone(),
            accuracy,
            decreased,
        });
    }

    fn on_finished(&mut self, best_subset: &FeatureSubset, best_accuracy: f64) {
        self.events.push(SearchEvent::Finished {
            subset: best_subset.clone(),
            accuracy: best_accuracy,
        });
    }
}
