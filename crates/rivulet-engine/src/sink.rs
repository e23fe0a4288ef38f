//! Ready-made [`SnapshotSink`] implementations.
//!
//! Any `FnMut(Snapshot)` closure is already a sink; these cover the two
//! other common consumers: collecting in memory and forwarding to another
//! thread.

use crossbeam_channel::Sender;
use rivulet_core::{Snapshot, SnapshotSink};

/// Collects every snapshot in memory.
#[derive(Clone, Debug, Default)]
pub struct VecSink {
    snapshots: Vec<Snapshot>,
}

impl VecSink {
    /// An empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshots received so far, in step order.
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// Consume the sink, returning its snapshots.
    pub fn into_inner(self) -> Vec<Snapshot> {
        self.snapshots
    }
}

impl SnapshotSink for VecSink {
    fn accept(&mut self, snapshot: Snapshot) {
        self.snapshots.push(snapshot);
    }
}

/// Forwards snapshots over a crossbeam channel.
///
/// Blocks when a bounded channel is full. Once the receiver is gone,
/// snapshots are discarded and counted in [`dropped()`](Self::dropped);
/// stepping is never interrupted.
#[derive(Debug)]
pub struct ChannelSink {
    tx: Sender<Snapshot>,
    dropped: u64,
}

impl ChannelSink {
    /// Wrap the sending half of a channel.
    pub fn new(tx: Sender<Snapshot>) -> Self {
        Self { tx, dropped: 0 }
    }

    /// Snapshots discarded because the receiver disconnected.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

impl SnapshotSink for ChannelSink {
    fn accept(&mut self, snapshot: Snapshot) {
        if self.tx.send(snapshot).is_err() {
            self.dropped += 1;
        }
    }
}
