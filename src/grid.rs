use crate::error::GridError;
use serde::{Deserialize, Serialize};

/// Concentrations of the two species at one grid point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub a: f64,
    pub b: f64,
}

impl Cell {
    /// Unseeded state: all A, no B.
    pub const BASE: Cell = Cell { a: 1.0, b: 0.0 };
    /// A cell that received a drop of B at seeding time.
    pub const SEEDED: Cell = Cell { a: 1.0, b: 1.0 };

    pub const fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }

    pub fn is_finite(self) -> bool {
        self.a.is_finite() && self.b.is_finite()
    }
}

/// How neighbor reads past the grid edge are resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Boundary {
    /// Toroidal: indices wrap modulo width/height.
    #[default]
    Wrap,
    /// Reflecting: indices are clamped to the nearest edge cell.
    Clamp,
}

impl Boundary {
    #[inline]
    fn resolve(self, coord: usize, delta: isize, len: usize) -> usize {
        let c = coord as isize + delta;
        match self {
            Boundary::Wrap => c.rem_euclid(len as isize) as usize,
            Boundary::Clamp => c.clamp(0, len as isize - 1) as usize,
        }
    }
}

/// Fixed-size row-major field of cells. Immutable once built; each generation
/// is a new `Grid`.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    w: usize,
    h: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Uniform grid of [`Cell::BASE`].
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        Self::filled(width, height, Cell::BASE)
    }

    pub fn filled(width: usize, height: usize, cell: Cell) -> Result<Self, GridError> {
        let n = checked_len(width, height)?;
        Ok(Self {
            w: width,
            h: height,
            cells: vec![cell; n],
        })
    }

    /// Builds a grid by evaluating `f(x, y)` in row-major order.
    pub fn from_fn(
        width: usize,
        height: usize,
        mut f: impl FnMut(usize, usize) -> Cell,
    ) -> Result<Self, GridError> {
        let n = checked_len(width, height)?;
        let mut cells = Vec::with_capacity(n);
        for y in 0..height {
            for x in 0..width {
                cells.push(f(x, y));
            }
        }
        Ok(Self {
            w: width,
            h: height,
            cells,
        })
    }

    pub fn from_cells(width: usize, height: usize, cells: Vec<Cell>) -> Result<Self, GridError> {
        let n = checked_len(width, height)?;
        if cells.len() != n {
            return Err(GridError::LengthMismatch {
                expected: n,
                actual: cells.len(),
            });
        }
        Ok(Self {
            w: width,
            h: height,
            cells,
        })
    }

    /// Caller guarantees `cells.len() == width * height` with both positive.
    pub(crate) fn from_parts(width: usize, height: usize, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        Self {
            w: width,
            h: height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: a grid has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    fn idx(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    /// Panics if `(x, y)` is outside the grid.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Cell {
        assert!(x < self.w && y < self.h, "({x}, {y}) outside {}x{}", self.w, self.h);
        self.cells[self.idx(x, y)]
    }

    /// Reads the cell at `(x + dx, y + dy)`, resolving edges with `boundary`.
    #[inline]
    pub fn neighbor(&self, x: usize, y: usize, dx: isize, dy: isize, boundary: Boundary) -> Cell {
        let nx = boundary.resolve(x, dx, self.w);
        let ny = boundary.resolve(y, dy, self.h);
        self.cells[self.idx(nx, ny)]
    }

    /// Coordinates of the first cell holding NaN or an infinity, if any.
    pub fn first_non_finite(&self) -> Option<(usize, usize)> {
        self.cells
            .iter()
            .position(|c| !c.is_finite())
            .map(|i| (i % self.w, i / self.w))
    }
}

fn checked_len(width: usize, height: usize) -> Result<usize, GridError> {
    if width == 0 || height == 0 {
        return Err(GridError::EmptyDimension { width, height });
    }
    width
        .checked_mul(height)
        .filter(|n| n.checked_mul(std::mem::size_of::<Cell>()).is_some())
        .ok_or(GridError::TooLarge { width, height })
}
