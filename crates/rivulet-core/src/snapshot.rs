//! Owned, read-only snapshots of the state vector.

use crate::id::StepId;

/// A copy of the state vector at one instant.
///
/// Snapshots never alias the integrator's live state: the integrator
/// mutates its buffers in place every step, so each snapshot owns its
/// own `values`.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    /// Step that produced this state (`StepId(0)` is the initial condition).
    pub step: StepId,
    /// Simulation time of this state.
    pub time: f64,
    /// `U(x_i, time)` for every solved node, in grid order.
    pub values: Vec<f64>,
}

impl Snapshot {
    /// Number of values (equal to the grid's cell count).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false` for snapshots produced by the engine (grids have
    /// at least two cells).
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Largest absolute value, or `0.0` for an empty snapshot.
    pub fn max_abs(&self) -> f64 {
        self.values.iter().fold(0.0f64, |m, v| m.max(v.abs()))
    }
}
