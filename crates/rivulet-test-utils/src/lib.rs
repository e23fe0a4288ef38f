//! Test utilities for Rivulet development.
//!
//! Provides the two reference scenarios ([`fixtures`]), seeded random
//! initial profiles ([`profiles`]) and a [`RecordingSink`] that keeps a
//! compact trace of everything a run emitted.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod profiles;

use rivulet_core::{Snapshot, SnapshotSink, StepId};

/// Sink recording step ids, times, and per-snapshot extrema.
///
/// Only the most recent snapshot's values are kept, so long runs stay
/// cheap to record.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub steps: Vec<StepId>,
    pub times: Vec<f64>,
    pub max_abs: Vec<f64>,
    pub last: Option<Snapshot>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of snapshots received.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step numbers as plain integers.
    pub fn step_numbers(&self) -> Vec<u64> {
        self.steps.iter().map(|s| s.0).collect()
    }
}

impl SnapshotSink for RecordingSink {
    fn accept(&mut self, snapshot: Snapshot) {
        self.steps.push(snapshot.step);
        self.times.push(snapshot.time);
        self.max_abs.push(snapshot.max_abs());
        self.last = Some(snapshot);
    }
}
