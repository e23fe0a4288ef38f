//! Uniform 1D grid specification.

use rivulet_core::{ConfigError, Domain};

/// Where the solved nodes sit relative to the domain bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GridLayout {
    /// `cell_count` nodes covering `[lower, upper)`; node `i` sits at
    /// `lower + i * dx` with `dx = (upper - lower) / cell_count`.
    Cells,
    /// `cell_count` interior nodes of a boundary-value problem; the two
    /// boundary nodes are excluded. Node `i` sits at `lower + (i + 1) * dx`
    /// with `dx = (upper - lower) / (cell_count + 1)`.
    Interior,
}

/// Immutable spatial discretization of a 1D domain.
///
/// # Examples
///
/// ```
/// use rivulet_core::Domain;
/// use rivulet_grid::GridSpec;
///
/// let domain = Domain::new(0.0, 1000.0).unwrap();
///
/// let cells = GridSpec::cells(domain, 400).unwrap();
/// assert_eq!(cells.spacing(), 2.5);
/// assert_eq!(cells.position(0), 0.0);
///
/// let interior = GridSpec::interior(domain, 99).unwrap();
/// assert_eq!(interior.spacing(), 10.0);
/// assert_eq!(interior.position(0), 10.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct GridSpec {
    lower: f64,
    upper: f64,
    cell_count: usize,
    spacing: f64,
    layout: GridLayout,
}

impl GridSpec {
    /// Minimum number of solved cells.
    pub const MIN_CELLS: usize = 2;

    /// Maximum number of solved cells.
    pub const MAX_CELLS: usize = i32::MAX as usize;

    /// Grid of `cell_count` cells covering `[lower, upper)`.
    pub fn cells(domain: Domain, cell_count: usize) -> Result<Self, ConfigError> {
        Self::new(domain, cell_count, GridLayout::Cells)
    }

    /// Grid of `cell_count` interior nodes, boundary nodes excluded.
    pub fn interior(domain: Domain, cell_count: usize) -> Result<Self, ConfigError> {
        Self::new(domain, cell_count, GridLayout::Interior)
    }

    /// Build a grid with an explicit layout.
    ///
    /// Returns `Err(ConfigError::DegenerateGrid)` if `cell_count < 2`, or
    /// `Err(ConfigError::InvalidParameter)` if the domain is invalid or the
    /// cell count exceeds [`MAX_CELLS`](Self::MAX_CELLS).
    pub fn new(domain: Domain, cell_count: usize, layout: GridLayout) -> Result<Self, ConfigError> {
        domain.validate()?;
        if cell_count < Self::MIN_CELLS {
            return Err(ConfigError::DegenerateGrid {
                cell_count: cell_count as i64,
            });
        }
        if cell_count > Self::MAX_CELLS {
            return Err(ConfigError::InvalidParameter {
                name: "cell_count",
                reason: format!("{cell_count} exceeds maximum of {}", Self::MAX_CELLS),
            });
        }
        let intervals = match layout {
            GridLayout::Cells => cell_count,
            GridLayout::Interior => cell_count + 1,
        };
        Ok(Self {
            lower: domain.lower,
            upper: domain.upper,
            cell_count,
            spacing: domain.length() / intervals as f64,
            layout,
        })
    }

    /// Lower domain bound.
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Upper domain bound.
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Number of solved nodes.
    pub fn cell_count(&self) -> usize {
        self.cell_count
    }

    /// Node spacing `dx`.
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Node layout.
    pub fn layout(&self) -> GridLayout {
        self.layout
    }

    /// Physical position of node `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= cell_count`.
    pub fn position(&self, index: usize) -> f64 {
        assert!(
            index < self.cell_count,
            "node index {index} out of range for {} cells",
            self.cell_count
        );
        let offset = match self.layout {
            GridLayout::Cells => index,
            GridLayout::Interior => index + 1,
        };
        self.lower + offset as f64 * self.spacing
    }

    /// Positions of every solved node, in grid order.
    pub fn positions(&self) -> Vec<f64> {
        (0..self.cell_count).map(|i| self.position(i)).collect()
    }

    /// Evaluate `f` at every node position.
    pub fn sample(&self, f: impl Fn(f64) -> f64) -> Vec<f64> {
        (0..self.cell_count).map(|i| f(self.position(i))).collect()
    }
}
