//! Independent runs executed concurrently.
//!
//! [`BatchedRuns`] owns named [`TimeIntegrator`]s, drives each on its own
//! scoped thread, and funnels their snapshots, tagged with the run name,
//! through one bounded crossbeam channel to a single consumer on the
//! calling thread. Runs share nothing; each one's snapshots arrive in its
//! own step order, interleaved arbitrarily with the others.

use indexmap::IndexMap;
use rivulet_core::{ConfigError, Snapshot, StepError};

use crate::config::RunConfig;
use crate::integrator::TimeIntegrator;
use crate::metrics::RunMetrics;

/// Default capacity of the snapshot channel.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

// ── Error type ─────────────────────────────────────────────────────

/// Error from a batched operation, annotated with the run name.
#[derive(Debug, PartialEq)]
pub enum BatchError {
    /// A run with this name is already registered.
    DuplicateRun {
        /// The duplicate name.
        name: String,
    },
    /// The run's configuration was rejected.
    Config {
        /// Run name.
        name: String,
        /// The underlying configuration error.
        error: ConfigError,
    },
    /// The run failed while stepping.
    Run {
        /// Run name.
        name: String,
        /// The underlying step error.
        error: StepError,
    },
    /// The run's worker thread panicked.
    WorkerPanicked {
        /// Run name.
        name: String,
    },
    /// The OS refused to start a worker thread.
    ThreadSpawnFailed {
        /// Run name.
        name: String,
        /// The I/O error text.
        reason: String,
    },
}

impl std::fmt::Display for BatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchError::DuplicateRun { name } => write!(f, "run '{name}' already registered"),
            BatchError::Config { name, error } => write!(f, "run '{name}': {error}"),
            BatchError::Run { name, error } => write!(f, "run '{name}': step failed: {error}"),
            BatchError::WorkerPanicked { name } => write!(f, "run '{name}': worker panicked"),
            BatchError::ThreadSpawnFailed { name, reason } => {
                write!(f, "run '{name}': failed to spawn worker: {reason}")
            }
        }
    }
}

impl std::error::Error for BatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BatchError::Config { error, .. } => Some(error),
            BatchError::Run { error, .. } => Some(error),
            _ => None,
        }
    }
}

// ── TaggedSnapshot ─────────────────────────────────────────────────

/// A snapshot labelled with the run that produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct TaggedSnapshot {
    /// Name the run was registered under.
    pub run: String,
    /// The snapshot.
    pub snapshot: Snapshot,
}

// ── BatchedRuns ────────────────────────────────────────────────────

/// A set of named, independent runs.
///
/// Iteration and result order follow registration order.
#[derive(Debug)]
pub struct BatchedRuns {
    runs: IndexMap<String, TimeIntegrator>,
    channel_capacity: usize,
}

impl Default for BatchedRuns {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchedRuns {
    /// An empty batch with the default channel capacity.
    pub fn new() -> Self {
        Self {
            runs: IndexMap::new(),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }

    /// Set the snapshot channel capacity. Zero makes every hand-off a
    /// rendezvous with the consumer.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }

    /// Register an already-built integrator.
    ///
    /// # Errors
    ///
    /// [`BatchError::DuplicateRun`] if `name` is taken.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        integrator: TimeIntegrator,
    ) -> Result<(), BatchError> {
        let name = name.into();
        if self.runs.contains_key(&name) {
            return Err(BatchError::DuplicateRun { name });
        }
        self.runs.insert(name, integrator);
        Ok(())
    }

    /// Build an integrator from `config` and register it.
    ///
    /// # Errors
    ///
    /// [`BatchError::DuplicateRun`] if `name` is taken, or
    /// [`BatchError::Config`] if the configuration is rejected.
    pub fn add_config(&mut self, name: impl Into<String>, config: RunConfig) -> Result<(), BatchError> {
        let name = name.into();
        if self.runs.contains_key(&name) {
            return Err(BatchError::DuplicateRun { name });
        }
        match TimeIntegrator::new(config) {
            Ok(integrator) => {
                self.runs.insert(name, integrator);
                Ok(())
            }
            Err(error) => Err(BatchError::Config { name, error }),
        }
    }

    /// Number of registered runs.
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// `true` if no runs are registered.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Registered run names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.runs.keys().map(String::as_str)
    }

    /// The integrator registered under `name`.
    pub fn get(&self, name: &str) -> Option<&TimeIntegrator> {
        self.runs.get(name)
    }

    /// Run every integrator to completion, one scoped thread per run.
    ///
    /// `consumer` is called on the calling thread for every emitted
    /// snapshot. Returns once all workers have finished, with one result
    /// per run in registration order. A failing run does not stop the
    /// others.
    pub fn run_all(
        self,
        mut consumer: impl FnMut(TaggedSnapshot),
    ) -> IndexMap<String, Result<RunMetrics, BatchError>> {
        let capacity = self.channel_capacity;
        let runs = self.runs;
        let mut results = IndexMap::with_capacity(runs.len());

        std::thread::scope(|scope| {
            // A panicking consumer drops `rx` before the scope joins, which
            // disconnects workers blocked in `send`.
            let (tx, rx) = crossbeam_channel::bounded::<TaggedSnapshot>(capacity);
            let mut workers = Vec::with_capacity(runs.len());
            for (index, (name, mut integrator)) in runs.into_iter().enumerate() {
                let tx = tx.clone();
                let tag = name.clone();
                let spawned = std::thread::Builder::new()
                    .name(format!("rivulet-run-{index}"))
                    .spawn_scoped(scope, move || {
                        let mut forward = |snapshot: Snapshot| {
                            // Consumer gone: keep stepping, discard.
                            let _ = tx.send(TaggedSnapshot {
                                run: tag.clone(),
                                snapshot,
                            });
                        };
                        integrator.run(&mut forward)
                    });
                workers.push((name, spawned));
            }
            // Workers hold the only remaining senders.
            drop(tx);

            for tagged in rx.iter() {
                consumer(tagged);
            }

            for (name, spawned) in workers {
                let result = match spawned {
                    Ok(handle) => match handle.join() {
                        Ok(Ok(metrics)) => Ok(metrics),
                        Ok(Err(error)) => Err(BatchError::Run {
                            name: name.clone(),
                            error,
                        }),
                        Err(_) => Err(BatchError::WorkerPanicked { name: name.clone() }),
                    },
                    Err(e) => Err(BatchError::ThreadSpawnFailed {
                        name: name.clone(),
                        reason: e.to_string(),
                    }),
                };
                results.insert(name, result);
            }
        });

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rivulet_core::{Domain, EquationCoefficients, TimeHorizon};
    use rivulet_grid::{HyperbolicDiscretization, ParabolicDiscretization, SchemeKind};

    fn hyperbolic(steps: u64, emit_every: u64) -> RunConfig {
        RunConfig::builder()
            .domain(Domain::new(0.0, 100.0).unwrap())
            .coefficients(EquationCoefficients::new(1.0, 0.01, 0.0).unwrap())
            .scheme(SchemeKind::Hyperbolic(HyperbolicDiscretization::new(50, 0.5)))
            .horizon(TimeHorizon::Steps(steps))
            .emit_every(emit_every)
            .initial_condition(|x| 1.0 + x / 100.0)
            .build()
            .unwrap()
    }

    fn parabolic(steps: u64) -> RunConfig {
        RunConfig::builder()
            .domain(Domain::new(0.0, 100.0).unwrap())
            .coefficients(EquationCoefficients::new(1.0, 5.0, 0.0).unwrap())
            .scheme(SchemeKind::Parabolic(ParabolicDiscretization::new(0.25)))
            .horizon(TimeHorizon::Steps(steps))
            .build()
            .unwrap()
    }

    #[test]
    fn duplicate_names_rejected() {
        let mut batch = BatchedRuns::new();
        batch.add_config("a", hyperbolic(3, 1)).unwrap();
        assert_eq!(
            batch.add_config("a", hyperbolic(3, 1)),
            Err(BatchError::DuplicateRun {
                name: "a".to_string()
            })
        );
        let integrator = TimeIntegrator::new(parabolic(2)).unwrap();
        assert!(batch.insert("a", integrator).is_err());
        assert_eq!(batch.len(), 1);
    }

    #[test]
    fn config_error_carries_name() {
        let mut batch = BatchedRuns::new();
        let bad = RunConfig::builder()
            .domain(Domain::new(0.0, 100.0).unwrap())
            .coefficients(EquationCoefficients::new(1.0, 5.0, 0.0).unwrap())
            .scheme(SchemeKind::Parabolic(ParabolicDiscretization::new(0.9)))
            .horizon(TimeHorizon::Steps(1))
            .build()
            .unwrap();
        let err = batch.add_config("unstable", bad).unwrap_err();
        assert!(matches!(err, BatchError::Config { ref name, .. } if name == "unstable"));
        assert!(err.to_string().starts_with("run 'unstable':"));
        assert!(batch.is_empty());
    }

    #[test]
    fn runs_deliver_every_snapshot_in_step_order() {
        let mut batch = BatchedRuns::new().with_channel_capacity(2);
        batch.add_config("hyper", hyperbolic(20, 5)).unwrap();
        batch.add_config("para", parabolic(6)).unwrap();
        assert_eq!(batch.names().collect::<Vec<_>>(), vec!["hyper", "para"]);

        let mut per_run: IndexMap<String, Vec<u64>> = IndexMap::new();
        let results = batch.run_all(|tagged| {
            per_run
                .entry(tagged.run)
                .or_default()
                .push(tagged.snapshot.step.0);
        });

        assert_eq!(per_run["hyper"], vec![1, 6, 11, 16]);
        assert_eq!(per_run["para"], vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(
            results.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["hyper", "para"]
        );
        assert_eq!(results["hyper"].as_ref().unwrap().steps_taken, 20);
        assert_eq!(results["para"].as_ref().unwrap().snapshots_emitted, 6);
    }

    #[test]
    fn finished_run_reports_error_without_stopping_others() {
        let mut done = TimeIntegrator::new(hyperbolic(1, 1)).unwrap();
        done.step().unwrap();
        let mut batch = BatchedRuns::new();
        batch.insert("done", done).unwrap();
        batch.add_config("fresh", hyperbolic(4, 1)).unwrap();

        let mut count = 0;
        let results = batch.run_all(|_| count += 1);
        assert_eq!(count, 4);
        assert_eq!(
            results["done"],
            Err(BatchError::Run {
                name: "done".to_string(),
                error: StepError::IntegratorCompleted { step_count: 1 },
            })
        );
        assert!(results["fresh"].is_ok());
    }

    #[test]
    fn panicking_worker_is_reported() {
        let config = RunConfig::builder()
            .domain(Domain::new(0.0, 100.0).unwrap())
            .coefficients(EquationCoefficients::new(1.0, 0.0, 0.0).unwrap())
            .scheme(SchemeKind::Hyperbolic(HyperbolicDiscretization::new(10, 0.5)))
            .horizon(TimeHorizon::Steps(3))
            .source(|_i: usize, _t: f64| -> f64 { panic!("source failed") })
            .build()
            .unwrap();
        let mut batch = BatchedRuns::new();
        batch.add_config("boom", config).unwrap();
        let results = batch.run_all(|_| {});
        assert_eq!(
            results["boom"],
            Err(BatchError::WorkerPanicked {
                name: "boom".to_string()
            })
        );
    }

    #[test]
    fn consumer_panic_propagates_instead_of_blocking_workers() {
        let mut batch = BatchedRuns::new().with_channel_capacity(1);
        batch.add_config("a", hyperbolic(100, 1)).unwrap();
        batch.add_config("b", hyperbolic(100, 1)).unwrap();

        let (done_tx, done_rx) = crossbeam_channel::bounded(1);
        std::thread::spawn(move || {
            let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                batch.run_all(|_| panic!("consumer failed"))
            }));
            let _ = done_tx.send(outcome.is_err());
        });

        let panicked = done_rx
            .recv_timeout(std::time::Duration::from_secs(10))
            .expect("run_all returned after the consumer panicked");
        assert!(panicked);
    }

    #[test]
    fn empty_batch_returns_no_results() {
        let results = BatchedRuns::default().run_all(|_| {});
        assert!(results.is_empty());
    }
}
