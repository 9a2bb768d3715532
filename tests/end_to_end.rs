//! End-to-end scenario over the library: pick a dataset, run a simulated
//! training pass to completion, inspect predictions, reset.

use std::time::Duration;

use netsketch::{
    generate, predict, DatasetKind, NetworkTopology, PredictError, ProgressSimulator, SimState,
    TrainingConfig,
};

fn fast_sim() -> ProgressSimulator {
    ProgressSimulator::with_tick_interval(Duration::from_millis(1))
}

#[test]
fn xor_session_from_selection_to_reset() {
    // Select the dataset the way the studio does: through the config.
    let mut config = TrainingConfig::default();
    config.dataset_id = "xor".to_owned();
    config.set_epochs(10);

    let dataset = generate(&config.dataset_id);
    assert_eq!(dataset.kind, DatasetKind::Classification);
    assert_eq!(dataset.samples.len(), 4);

    // Predictions are rejected before the first tick.
    let mut sim = fast_sim();
    assert_eq!(predict(&dataset, sim.current_epoch()), Err(PredictError));

    // Run to completion.
    let rx = sim.start(config.epochs());
    let ticks = rx.iter().count();
    assert_eq!(ticks, 10);

    let run = sim.snapshot();
    assert_eq!(run.state, SimState::Completed);
    assert_eq!(run.current_epoch, 10);
    assert_eq!(run.loss_series.len(), 10);
    assert_eq!(run.accuracy_series.len(), 10);

    // Predictions now succeed: one per sample, bounded values.
    let predictions = predict(&dataset, sim.current_epoch()).unwrap();
    assert_eq!(predictions.len(), 4);
    for p in &predictions {
        assert!(p.actual == 0.0 || p.actual == 1.0);
        assert!((0.0..=1.0).contains(&p.predicted));
    }

    // Reset drops the run back to the initial snapshot.
    sim.reset();
    let run = sim.snapshot();
    assert_eq!(run.state, SimState::Idle);
    assert_eq!(run.current_epoch, 0);
    assert!(run.loss_series.is_empty());
    assert!(run.accuracy_series.is_empty());
}

#[test]
fn switching_datasets_replaces_the_samples_wholesale() {
    let mut config = TrainingConfig::default();
    let first = generate(&config.dataset_id);
    assert_eq!(first.samples.len(), 4);

    config.dataset_id = "sine".to_owned();
    let second = generate(&config.dataset_id);
    assert_eq!(second.kind, DatasetKind::Regression);
    assert_eq!(second.samples.len(), 100);
}

#[test]
fn editing_the_topology_while_a_run_ticks_is_independent() {
    let mut topology = NetworkTopology::default();
    let mut sim = fast_sim();

    let rx = sim.start(30);
    topology.add_hidden_layer();
    topology.remove_layer(0); // protected, no-op
    assert_eq!(topology.len(), 4);

    let ticks = rx.iter().count();
    assert_eq!(ticks, 30);
    assert_eq!(topology.layers().last().unwrap().kind, netsketch::LayerKind::Output);
}
