use std::time::Instant;

use serde::Serialize;

use crate::config::{SearchConfig, SearchStrategy};
use crate::dataset::Dataset;
use crate::error::{Result, SelectionError};
use crate::evaluation::{LeaveOneOut, SubsetEvaluator};
use crate::feature_selection::reporter::Reporter;
use crate::subset::FeatureSubset;

/// Knobs that change reporting but never the chosen subsets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Forward selection normally stays quiet when its first level fails to
    /// beat the no-feature baseline. Set this to warn there too.
    pub warn_on_first_forward_level: bool,
}

/// Best subset found by a search and how much work it took.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub subset: FeatureSubset,
    pub accuracy: f64,
    /// Greedy levels completed (0 for an exhaustive scan).
    pub levels: usize,
    /// Number of subsets scored, including the initial one.
    pub evaluations: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

impl Direction {
    fn initial_subset(self, total: usize) -> FeatureSubset {
        match self {
            Direction::Forward => FeatureSubset::new(),
            Direction::Backward => FeatureSubset::full(total),
        }
    }

    /// Every subset one step away from `current`, in ascending index order.
    fn candidates(self, current: &FeatureSubset, total: usize) -> Vec<FeatureSubset> {
        match self {
            Direction::Forward => (0..total)
                .filter(|&idx| !current.contains(idx))
                .map(|idx| current.with(idx))
                .collect(),
            Direction::Backward => current.iter().map(|idx| current.without(idx)).collect(),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Direction::Forward => "forward selection",
            Direction::Backward => "backward elimination",
        }
    }
}

struct SearchState {
    current: FeatureSubset,
    best_subset: FeatureSubset,
    best_accuracy: f64,
}

impl SearchState {
    fn new(initial: FeatureSubset, accuracy: f64) -> Self {
        SearchState {
            current: initial.clone(),
            best_subset: initial,
            best_accuracy: accuracy,
        }
    }

    /// Make `chosen` the current subset. Returns whether it beat the best so far.
    fn adopt(&mut self, chosen: FeatureSubset, accuracy: f64) -> bool {
        self.current = chosen;
        if accuracy > self.best_accuracy {
            self.best_accuracy = accuracy;
            self.best_subset = self.current.clone();
            true
        } else {
            false
        }
    }
}

/// Drives subset searches over one dataset.
///
/// The engine borrows the dataset and owns its evaluator, so each engine is
/// an independent unit of work.
pub struct SearchEngine<'a, E = LeaveOneOut> {
    dataset: &'a Dataset,
    evaluator: E,
    options: SearchOptions,
    evaluations: usize,
}

impl<'a> SearchEngine<'a, LeaveOneOut> {
    /// Engine scoring subsets with 1-NN leave-one-out accuracy.
    pub fn new(dataset: &'a Dataset) -> Self {
        Self::with_evaluator(dataset, LeaveOneOut::new())
    }
}

impl<'a, E: SubsetEvaluator> SearchEngine<'a, E> {
    pub fn with_evaluator(dataset: &'a Dataset, evaluator: E) -> Self {
        SearchEngine {
            dataset,
            evaluator,
            options: SearchOptions::default(),
            evaluations: 0,
        }
    }

    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Run whichever search `config` names, filling in its defaults. Options
    /// set in `config` add to those given through `with_options` for this run
    /// only.
    pub fn run(
        &mut self,
        config: &SearchConfig,
        reporter: &mut dyn Reporter,
    ) -> Result<SearchResult> {
        let options = SearchOptions {
            warn_on_first_forward_level: self.options.warn_on_first_forward_level
                || config.warn_on_first_forward_level,
        };
        let total = config
            .total_features
            .unwrap_or_else(|| self.dataset.n_features());
        match config.strategy {
            SearchStrategy::Forward => {
                self.greedy(Direction::Forward, total, config.target_size, options, reporter)
            }
            SearchStrategy::Backward => {
                self.greedy(Direction::Backward, total, config.target_size, options, reporter)
            }
            SearchStrategy::Exhaustive => {
                let size = config
                    .target_size
                    .unwrap_or_else(|| SearchConfig::DEFAULT_EXHAUSTIVE_SIZE.min(total));
                self.run_exhaustive(total, size, reporter)
            }
        }
    }

    /// Grow from the empty subset one feature per level until `target_size`
    /// features (default: all `total_features`) are selected.
    pub fn run_forward_selection(
        &mut self,
        total_features: usize,
        target_size: Option<usize>,
        reporter: &mut dyn Reporter,
    ) -> Result<SearchResult> {
        let options = self.options;
        self.greedy(Direction::Forward, total_features, target_size, options, reporter)
    }

    /// Shrink from the full subset one feature per level until `target_size`
    /// features (default: 1) remain.
    pub fn run_backward_elimination(
        &mut self,
        total_features: usize,
        target_size: Option<usize>,
        reporter: &mut dyn Reporter,
    ) -> Result<SearchResult> {
        let options = self.options;
        self.greedy(Direction::Backward, total_features, target_size, options, reporter)
    }

    /// Score every subset of exactly `subset_size` features, in lexicographic
    /// order. The first subset reaching the highest accuracy wins.
    pub fn run_exhaustive(
        &mut self,
        total_features: usize,
        subset_size: usize,
        reporter: &mut dyn Reporter,
    ) -> Result<SearchResult> {
        self.check_total(total_features)?;
        check_size(subset_size, total_features)?;

        let start = Instant::now();
        self.evaluations = 0;
        log::info!(
            "Beginning exhaustive search over all {}-feature subsets of {} features",
            subset_size,
            total_features
        );

        let mut combo: Vec<usize> = (0..subset_size).collect();
        let mut best: Option<(FeatureSubset, f64)> = None;
        loop {
            let candidate: FeatureSubset = combo.iter().copied().collect();
            let accuracy = self.score(&candidate)?;
            reporter.on_candidate(&candidate, accuracy);
            if best.as_ref().map_or(true, |(_, b)| accuracy > *b) {
                best = Some((candidate, accuracy));
            }
            if !next_combination(&mut combo, total_features) {
                break;
            }
        }

        let (subset, accuracy) =
            best.ok_or_else(|| SelectionError::invalid("no subsets to evaluate"))?;
        reporter.on_finished(&subset, accuracy);
        log::info!(
            "Finished exhaustive search in {:.2?} after {} evaluations: best {:?} at {:.1}%",
            start.elapsed(),
            self.evaluations,
            subset.indices(),
            accuracy * 100.0
        );

        Ok(SearchResult {
            subset,
            accuracy,
            levels: 0,
            evaluations: self.evaluations,
        })
    }

    fn greedy(
        &mut self,
        direction: Direction,
        total: usize,
        target_size: Option<usize>,
        options: SearchOptions,
        reporter: &mut dyn Reporter,
    ) -> Result<SearchResult> {
        self.check_total(total)?;
        let target = target_size.unwrap_or(match direction {
            Direction::Forward => total,
            Direction::Backward => 1,
        });
        check_size(target, total)?;
        self.run_greedy(direction, total, target, options, reporter)
    }

    fn run_greedy(
        &mut self,
        direction: Direction,
        total: usize,
        target: usize,
        options: SearchOptions,
        reporter: &mut dyn Reporter,
    ) -> Result<SearchResult> {
        let start = Instant::now();
        self.evaluations = 0;
        let levels = match direction {
            Direction::Forward => target,
            Direction::Backward => total - target,
        };

        let initial = direction.initial_subset(total);
        let initial_accuracy = self.score(&initial)?;
        reporter.on_initial(&initial, initial_accuracy);
        log::info!(
            "Beginning {} over {} features ({} levels); initial subset {:?} scores {:.1}%",
            direction.name(),
            total,
            levels,
            initial.indices(),
            initial_accuracy * 100.0
        );

        let mut state = SearchState::new(initial, initial_accuracy);

        for level in 1..=levels {
            let mut level_best: Option<(FeatureSubset, f64)> = None;
            for candidate in direction.candidates(&state.current, total) {
                let accuracy = self.score(&candidate)?;
                reporter.on_candidate(&candidate, accuracy);
                // strict: the lowest index keeps a tie
                if level_best.as_ref().map_or(true, |(_, b)| accuracy > *b) {
                    level_best = Some((candidate, accuracy));
                }
            }

            let (chosen, accuracy) = level_best.ok_or_else(|| {
                SelectionError::invalid(format!("no candidates left at level {}", level))
            })?;
            let improved = state.adopt(chosen, accuracy);
            let first_forward_level = direction == Direction::Forward && level == 1;
            let decreased = !improved
                && (!first_forward_level || options.warn_on_first_forward_level);

            log::debug!(
                "Level {}: chose {:?} at {:.1}%",
                level,
                state.current.indices(),
                accuracy * 100.0
            );
            if decreased {
                log::warn!(
                    "Accuracy has decreased at level {}: {:.1}% does not beat best {:.1}%",
                    level,
                    accuracy * 100.0,
                    state.best_accuracy * 100.0
                );
            }
            reporter.on_level_chosen(&state.current, accuracy, decreased);
        }

        reporter.on_finished(&state.best_subset, state.best_accuracy);
        log::info!(
            "Finished {} in {:.2?} after {} evaluations: best {:?} at {:.1}%",
            direction.name(),
            start.elapsed(),
            self.evaluations,
            state.best_subset.indices(),
            state.best_accuracy * 100.0
        );

        Ok(SearchResult {
            subset: state.best_subset,
            accuracy: state.best_accuracy,
            levels,
            evaluations: self.evaluations,
        })
    }

    fn score(&mut self, subset: &FeatureSubset) -> Result<f64> {
        self.evaluations += 1;
        self.evaluator.evaluate(self.dataset, subset)
    }

    fn check_total(&self, total: usize) -> Result<()> {
        if total < 1 {
            return Err(SelectionError::invalid(
                "feature search needs at least one feature",
            ));
        }
        if total > self.dataset.n_features() {
            return Err(SelectionError::invalid(format!(
                "asked to search {} features but the dataset has {}",
                total,
                self.dataset.n_features()
            )));
        }
        Ok(())
    }
}

fn check_size(size: usize, total: usize) -> Result<()> {
    if size < 1 || size > total {
        return Err(SelectionError::invalid(format!(
            "target size {} is outside [1, {}]",
            size, total
        )));
    }
    Ok(())
}

/// Advance `combo` to the next k-combination of `0..n` in lexicographic
/// order. Returns false once the last combination has been passed.
fn next_combination(combo: &mut [usize], n: usize) -> bool {
    let k = combo.len();
    let mut i = k;
    while i > 0 {
        i -= 1;
        if combo[i] < n - k + i {
            combo[i] += 1;
            for j in i + 1..k {
                combo[j] = combo[j - 1] + 1;
            }
            return true;
        }
    }
    false
}
