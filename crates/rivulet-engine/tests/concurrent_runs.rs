//! Integration test: independent runs on separate threads.
//!
//! Both reference scenarios are driven concurrently through
//! `BatchedRuns`, and a single run is streamed to another thread through
//! a `ChannelSink`. Results must match sequential execution exactly.

use indexmap::IndexMap;
use rivulet_core::{Snapshot, TimeHorizon};
use rivulet_engine::{BatchError, BatchedRuns, ChannelSink, TimeIntegrator, VecSink};
use rivulet_test_utils::fixtures::{convection_diffusion_config, transport_decay_config};

fn sequential(name: &str) -> Vec<Vec<f64>> {
    let config = match name {
        "transport" => transport_decay_config(TimeHorizon::Steps(300), 5),
        _ => convection_diffusion_config(TimeHorizon::Steps(120), 5),
    };
    let mut sink = VecSink::new();
    TimeIntegrator::new(config).unwrap().run(&mut sink).unwrap();
    sink.into_inner().into_iter().map(|s| s.values).collect()
}

#[test]
fn batched_matches_sequential() {
    let mut batch = BatchedRuns::new().with_channel_capacity(4);
    batch
        .add_config("transport", transport_decay_config(TimeHorizon::Steps(300), 5))
        .unwrap();
    batch
        .add_config(
            "diffusion",
            convection_diffusion_config(TimeHorizon::Steps(120), 5),
        )
        .unwrap();

    let mut collected: IndexMap<String, Vec<Vec<f64>>> = IndexMap::new();
    let results = batch.run_all(|tagged| {
        collected
            .entry(tagged.run)
            .or_default()
            .push(tagged.snapshot.values);
    });

    assert!(results.values().all(Result::is_ok));
    assert_eq!(results["transport"].as_ref().unwrap().steps_taken, 300);
    assert_eq!(results["diffusion"].as_ref().unwrap().steps_taken, 120);
    assert_eq!(collected["transport"], sequential("transport"));
    assert_eq!(collected["diffusion"], sequential("diffusion"));
}

#[test]
fn duplicate_run_error_displays_name() {
    let mut batch = BatchedRuns::new();
    batch
        .add_config("a", transport_decay_config(TimeHorizon::Steps(1), 1))
        .unwrap();
    let err = batch
        .add_config("a", transport_decay_config(TimeHorizon::Steps(1), 1))
        .unwrap_err();
    assert_eq!(
        err,
        BatchError::DuplicateRun {
            name: "a".to_string()
        }
    );
    assert_eq!(err.to_string(), "run 'a' already registered");
}

#[test]
fn channel_sink_streams_to_consumer_thread() {
    let (tx, rx) = crossbeam_channel::bounded::<Snapshot>(2);
    let consumer = std::thread::spawn(move || rx.iter().map(|s| s.step.0).collect::<Vec<_>>());

    let mut integrator =
        TimeIntegrator::new(transport_decay_config(TimeHorizon::Steps(40), 10)).unwrap();
    let mut sink = ChannelSink::new(tx);
    integrator.run(&mut sink).unwrap();
    assert_eq!(sink.dropped(), 0);
    drop(sink);

    assert_eq!(consumer.join().unwrap(), vec![1, 11, 21, 31]);
}
