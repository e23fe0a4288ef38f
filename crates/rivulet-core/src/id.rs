//! Strongly-typed step identifier.

use std::fmt;

/// Monotonically increasing step counter.
///
/// `StepId(0)` is the initial condition; each integrator step advances
/// the counter by one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StepId(pub u64);

impl StepId {
    /// The step after this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<u64> for StepId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_increments() {
        assert_eq!(StepId(0).next(), StepId(1));
        assert_eq!(StepId::default(), StepId(0));
    }

    #[test]
    fn display_is_bare_number() {
        assert_eq!(StepId(42).to_string(), "42");
        assert_eq!(format!("{:>4}", StepId(7)), "   7");
    }
}
