/// The coordinates of a single cell in the grid.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Cell {
    /// Horizontal position of the cell.
    pub col: usize,
    /// Vertical position of the cell.
    pub row: usize,
}

impl Cell {
    /// Construct a [`Cell`] from the given `col` and `row`.
    pub fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }

    /// Component of this cell along the given axis.
    pub fn along(&self, axis: Axis) -> usize {
        axis.pick(self.col, self.row)
    }
}

impl From<(usize, usize)> for Cell {
    /// Construct a [`Cell`] from the given `(col, row)` pair.
    fn from((col, row): (usize, usize)) -> Self {
        Self::new(col, row)
    }
}

impl From<Cell> for (usize, usize) {
    /// Convert the [`Cell`] into a `(col, row)` pair.
    fn from(cell: Cell) -> Self {
        (cell.col, cell.row)
    }
}

/// One of the two axes of the board. A ship extends along one axis (its placement axis)
/// and occupies a single cell on the other (its cross axis).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Axis {
    /// Columns, pixel `x`.
    X,
    /// Rows, pixel `y`.
    Y,
}

impl Axis {
    /// The other axis.
    pub fn cross(self) -> Self {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    /// Select the component that lies on this axis from an `(x, y)` pair.
    #[inline]
    pub fn pick<T>(self, x: T, y: T) -> T {
        match self {
            Axis::X => x,
            Axis::Y => y,
        }
    }

    /// Build an `(x, y)` pair from a component on this axis and one on the cross axis.
    #[inline]
    pub fn compose<T>(self, along: T, cross: T) -> (T, T) {
        match self {
            Axis::X => (along, cross),
            Axis::Y => (cross, along),
        }
    }
}
