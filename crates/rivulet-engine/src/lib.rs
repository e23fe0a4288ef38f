//! Time integration engine for Rivulet runs.
//!
//! [`TimeIntegrator`] owns the state vector of one run and advances it
//! with the run's constant [`UpdateOperator`](rivulet_stencil::UpdateOperator),
//! injecting boundary and source contributions every step. Snapshots are
//! produced lazily and handed to a [`SnapshotSink`](rivulet_core::SnapshotSink)
//! or pulled through an iterator.
//!
//! # Modules
//!
//! - [`config`]: [`RunConfig`] and its builder.
//! - [`integrator`]: the stepping state machine.
//! - [`sink`]: collecting and channel-backed sinks.
//! - [`batched`]: independent runs executed concurrently.
//! - [`metrics`]: per-run timing and stability figures.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod batched;
pub mod config;
pub mod integrator;
pub mod metrics;
pub mod sink;

pub use batched::{BatchError, BatchedRuns, TaggedSnapshot};
pub use config::{InitialCondition, RunConfig, RunConfigBuilder};
pub use integrator::{IntoSnapshots, Phase, Snapshots, StepOutcome, TimeIntegrator};
pub use metrics::RunMetrics;
pub use sink::{ChannelSink, VecSink};
