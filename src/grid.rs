use crate::direction::Direction;

/// Board coordinate. `row` grows downward, `col` grows rightward.
///
/// Signed so that a head stepping off the board can still be represented
/// and rejected by [`Grid::is_in_bounds`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Returns the neighbouring cell one step in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (d_row, d_col) = direction.offset();
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }
}

/// Fixed-size square board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Grid {
    size: u16,
}

impl Grid {
    /// Creates a `size` x `size` board.
    #[must_use]
    pub fn new(size: u16) -> Self {
        debug_assert!(size > 0, "board must contain at least one cell");
        Self { size }
    }

    #[must_use]
    pub fn size(self) -> u16 {
        self.size
    }

    /// Returns true iff both coordinates lie in `0..size`.
    #[must_use]
    pub fn is_in_bounds(self, cell: Cell) -> bool {
        let size = i32::from(self.size);
        (0..size).contains(&cell.row) && (0..size).contains(&cell.col)
    }

    /// Returns the total number of cells on the board.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.size) * usize::from(self.size)
    }

    /// Iterates over every cell in row-major order.
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        let size = i32::from(self.size);
        (0..size).flat_map(move |row| (0..size).map(move |col| Cell { row, col }))
    }
}
