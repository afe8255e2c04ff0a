use std::fmt;

/// A cell on the board, counted from the top-left corner
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct Cell {
    pub(crate) row: u16,
    pub(crate) col: u16,
}

impl Cell {
    pub(crate) const fn new(row: u16, col: u16) -> Cell {
        Cell { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The playing field: `rows` × `cols` cells, both at least 1.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Grid {
    rows: u16,
    cols: u16,
}

impl Grid {
    /// The smallest grid there is
    pub(crate) const MIN: Grid = Grid { rows: 1, cols: 1 };

    /// Returns `None` if either dimension is zero
    pub(crate) fn new(rows: u16, cols: u16) -> Option<Grid> {
        (rows > 0 && cols > 0).then_some(Grid { rows, cols })
    }

    /// Build the grid that fits a board of the given pixel size when each
    /// cell is `cell_px` pixels square.
    pub(crate) fn from_board(width_px: u32, height_px: u32, cell_px: u32) -> Option<Grid> {
        let (rows, cols) = dimensions(width_px, height_px, cell_px)?;
        Grid::new(rows, cols)
    }

    pub(crate) fn rows(self) -> u16 {
        self.rows
    }

    pub(crate) fn cols(self) -> u16 {
        self.cols
    }

    pub(crate) fn contains(self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    pub(crate) fn total_cells(self) -> usize {
        usize::from(self.rows) * usize::from(self.cols)
    }

    /// Iterate over every cell in row-major order
    pub(crate) fn cells(self) -> impl Iterator<Item = Cell> {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Cell { row, col }))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// `(rows, cols)` for a board of `width_px` × `height_px` pixels divided
/// into square cells of `cell_px` pixels, rounding down.  Returns `None` if
/// `cell_px` is zero or a count does not fit in a `u16`.
pub(crate) fn dimensions(width_px: u32, height_px: u32, cell_px: u32) -> Option<(u16, u16)> {
    let rows = height_px.checked_div(cell_px)?;
    let cols = width_px.checked_div(cell_px)?;
    Some((u16::try_from(rows).ok()?, u16::try_from(cols).ok()?))
}
