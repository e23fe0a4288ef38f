//! Injection points of the stepping loop: boundary values, source terms,
//! and the snapshot sink.

use crate::snapshot::Snapshot;

/// Dirichlet boundary values as functions of simulation time.
///
/// Queried once per step with the time the step advances to. Boundary
/// nodes are not part of the solved state; the integrator injects their
/// values through the stencil's neighbour weights.
pub trait BoundaryProvider: Send {
    /// Value at the lower edge of the domain.
    fn left(&self, t: f64) -> f64;

    /// Value at the upper edge of the domain.
    fn right(&self, t: f64) -> f64;
}

/// A forcing term `f(x_i, t)` added to the update each step.
///
/// The integrator calls [`accumulate`](SourceTerm::accumulate) with
/// `scale = dt`. The default implementation visits every cell;
/// sparse sources override it to touch only their support.
pub trait SourceTerm: Send {
    /// Forcing value at grid index `index` and time `t`.
    fn value(&self, index: usize, t: f64) -> f64;

    /// Add `scale * value(i, t)` into `out[i]` for every forced cell.
    fn accumulate(&self, t: f64, scale: f64, out: &mut [f64]) {
        for (i, v) in out.iter_mut().enumerate() {
            *v += scale * self.value(i, t);
        }
    }
}

impl<F> SourceTerm for F
where
    F: Fn(usize, f64) -> f64 + Send,
{
    fn value(&self, index: usize, t: f64) -> f64 {
        self(index, t)
    }
}

/// Consumer of emitted snapshots (plotting, storage, channels).
///
/// Invoked once per emitted snapshot, in step order. A sink receives
/// owned data and has no way to influence the stepping loop.
pub trait SnapshotSink {
    /// Receive one snapshot.
    fn accept(&mut self, snapshot: Snapshot);
}

impl<F> SnapshotSink for F
where
    F: FnMut(Snapshot),
{
    fn accept(&mut self, snapshot: Snapshot) {
        self(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::StepId;

    #[test]
    fn closure_source_fills_every_cell() {
        let src = |i: usize, t: f64| i as f64 + t;
        let mut out = vec![1.0; 3];
        src.accumulate(2.0, 0.5, &mut out);
        assert_eq!(out, vec![2.0, 2.5, 3.0]);
    }

    #[test]
    fn closure_sink_receives_snapshots() {
        let mut seen = Vec::new();
        {
            let mut sink = |s: Snapshot| seen.push(s.step);
            sink.accept(Snapshot {
                step: StepId(3),
                time: 1.0,
                values: vec![0.0, 0.0],
            });
        }
        assert_eq!(seen, vec![StepId(3)]);
    }
}
