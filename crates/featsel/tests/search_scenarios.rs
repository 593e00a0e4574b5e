//! Integration tests for the leave-one-out evaluator and the greedy searches.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use featsel::config::{SearchConfig, SearchStrategy};
use featsel::evaluation::{LeaveOneOut, SubsetEvaluator};
use featsel::feature_selection::{NullReporter, RecordingReporter, SearchEngine, SearchEvent};
use featsel::{Dataset, FeatureSubset, SelectionError};

fn random_dataset(seed: u64, n_instances: usize, n_features: usize) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let rows = (0..n_instances)
        .map(|_| (0..n_features).map(|_| rng.gen::<f64>()).collect())
        .collect();
    let labels = (0..n_instances).map(|_| rng.gen_range(1..=2)).collect();
    Dataset::from_rows(rows, labels).unwrap()
}

/// Feature 0 separates the classes, feature 1 is noise.
fn separable() -> Dataset {
    Dataset::from_rows(
        vec![
            vec![0.0, 3.0],
            vec![1.0, 7.0],
            vec![9.0, 4.0],
            vec![10.0, 6.0],
        ],
        vec![0, 0, 1, 1],
    )
    .unwrap()
}

// ---------------------------------------------------------------------------
// Evaluator
// ---------------------------------------------------------------------------

#[test]
fn accuracy_stays_in_unit_interval() {
    let d = random_dataset(11, 15, 4);
    let mut eval = LeaveOneOut::new();
    for subset in [
        FeatureSubset::new(),
        FeatureSubset::from([0]),
        FeatureSubset::from([1, 3]),
        FeatureSubset::full(4),
    ] {
        let acc = eval.evaluate(&d, &subset).unwrap();
        assert!((0.0..=1.0).contains(&acc), "{:?} scored {}", subset, acc);
    }
}

#[test]
fn evaluation_is_deterministic_across_evaluators() {
    let d = random_dataset(5, 20, 6);
    let subset = FeatureSubset::from([0, 2, 5]);
    let a = LeaveOneOut::new().evaluate(&d, &subset).unwrap();
    let b = LeaveOneOut::new().evaluate(&d, &subset).unwrap();
    assert_eq!(a, b);
}

#[test]
fn accuracy_is_a_multiple_of_one_over_n() {
    let d = random_dataset(3, 9, 3);
    let mut eval = LeaveOneOut::new();
    let correct = eval.correct_predictions(&d, &FeatureSubset::from([1])).unwrap();
    let acc = eval.evaluate(&d, &FeatureSubset::from([1])).unwrap();
    assert_eq!(acc, correct as f64 / 9.0);
}

// ---------------------------------------------------------------------------
// Forward selection
// ---------------------------------------------------------------------------

#[test]
fn forward_picks_separating_feature_first() {
    let d = separable();
    let mut rec = RecordingReporter::new();
    let result = SearchEngine::new(&d)
        .run_forward_selection(2, None, &mut rec)
        .unwrap();

    let levels = rec.levels();
    assert_eq!(levels[0].0, &FeatureSubset::from([0]));
    assert_eq!(levels[0].1, 1.0);
    assert_eq!(result.subset, FeatureSubset::from([0]));
    assert_eq!(result.accuracy, 1.0);
}

#[test]
fn forward_grows_by_one_feature_per_level() {
    let d = random_dataset(21, 14, 5);
    let mut rec = RecordingReporter::new();
    let result = SearchEngine::new(&d)
        .run_forward_selection(5, None, &mut rec)
        .unwrap();

    let levels = rec.levels();
    assert_eq!(levels.len(), 5);
    assert_eq!(result.levels, 5);
    for (i, (subset, _, _)) in levels.iter().enumerate() {
        assert_eq!(subset.len(), i + 1);
    }
    // level i evaluates total - (i - 1) candidates
    assert_eq!(rec.candidates().count(), 5 + 4 + 3 + 2 + 1);
}

#[test]
fn forward_target_size_stops_early() {
    let d = random_dataset(8, 10, 6);
    let mut rec = RecordingReporter::new();
    let result = SearchEngine::new(&d)
        .run_forward_selection(6, Some(2), &mut rec)
        .unwrap();
    assert_eq!(rec.levels().len(), 2);
    assert!(result.subset.len() <= 2);
}

#[test]
fn forward_never_warns_at_first_level_by_default() {
    for seed in 0..10 {
        let d = random_dataset(seed, 10, 3);
        let mut rec = RecordingReporter::new();
        SearchEngine::new(&d)
            .run_forward_selection(3, None, &mut rec)
            .unwrap();
        assert!(!rec.levels()[0].2, "seed {} warned at level 1", seed);
    }
}

// ---------------------------------------------------------------------------
// Backward elimination
// ---------------------------------------------------------------------------

#[test]
fn backward_shrinks_by_one_feature_per_level() {
    let d = random_dataset(34, 12, 4);
    let mut rec = RecordingReporter::new();
    SearchEngine::new(&d)
        .run_backward_elimination(4, None, &mut rec)
        .unwrap();
    let levels = rec.levels();
    assert_eq!(levels.len(), 3);
    for (i, (subset, _, _)) in levels.iter().enumerate() {
        assert_eq!(subset.len(), 4 - (i + 1));
    }
}

#[test]
fn backward_three_features_to_one_runs_two_levels() {
    let d = random_dataset(2, 8, 3);
    let mut rec = RecordingReporter::new();
    let result = SearchEngine::new(&d)
        .run_backward_elimination(3, Some(1), &mut rec)
        .unwrap();
    assert_eq!(result.levels, 2);
    assert_eq!(rec.levels().len(), 2);
    assert_eq!(rec.levels()[1].0.len(), 1);
    assert!(matches!(
        rec.events.first(),
        Some(SearchEvent::Initial { subset, .. }) if subset.len() == 3
    ));
}

#[test]
fn backward_target_equal_to_total_runs_no_levels() {
    let d = random_dataset(4, 6, 2);
    let result = SearchEngine::new(&d)
        .run_backward_elimination(2, Some(2), &mut NullReporter)
        .unwrap();
    assert_eq!(result.levels, 0);
    assert_eq!(result.subset, FeatureSubset::full(2));
    assert_eq!(result.evaluations, 1);
}

// ---------------------------------------------------------------------------
// Shared properties
// ---------------------------------------------------------------------------

#[test]
fn best_overall_never_decreases() {
    for strategy in [SearchStrategy::Forward, SearchStrategy::Backward] {
        let d = random_dataset(99, 16, 5);
        let mut rec = RecordingReporter::new();
        let result = SearchEngine::new(&d)
            .run(&SearchConfig::new(strategy), &mut rec)
            .unwrap();

        let mut running = match rec.events.first() {
            Some(SearchEvent::Initial { accuracy, .. }) => *accuracy,
            other => panic!("expected initial event, got {:?}", other),
        };
        for (i, (_, accuracy, decreased)) in rec.levels().into_iter().enumerate() {
            let quiet_first_level = strategy == SearchStrategy::Forward && i == 0;
            assert_eq!(decreased, accuracy <= running && !quiet_first_level);
            let next = running.max(accuracy);
            assert!(next >= running);
            running = next;
        }
        assert_eq!(result.accuracy, running);
    }
}

#[test]
fn zero_total_features_is_invalid_input() {
    let d = separable();
    let err = SearchEngine::new(&d)
        .run_forward_selection(0, None, &mut NullReporter)
        .unwrap_err();
    assert!(matches!(err, SelectionError::InvalidInput(_)));
}

#[test]
fn single_instance_aborts_with_insufficient_data() {
    let d = Dataset::from_rows(vec![vec![0.2, 0.4]], vec![1]).unwrap();
    for strategy in [
        SearchStrategy::Forward,
        SearchStrategy::Backward,
        SearchStrategy::Exhaustive,
    ] {
        let err = SearchEngine::new(&d)
            .run(&SearchConfig::new(strategy), &mut NullReporter)
            .unwrap_err();
        assert_eq!(err, SelectionError::InsufficientData(1));
    }
}

#[test]
fn exhaustive_finds_the_best_single_feature() {
    let d = separable();
    let mut rec = RecordingReporter::new();
    let result = SearchEngine::new(&d)
        .run_exhaustive(2, 1, &mut rec)
        .unwrap();
    assert_eq!(rec.candidates().count(), 2);
    assert_eq!(result.subset, FeatureSubset::from([0]));
    assert_eq!(result.accuracy, 1.0);
}
