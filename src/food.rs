use std::collections::HashSet;

use rand::Rng;

use crate::grid::{Cell, Grid};

/// Food currently on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Cell,
}

impl Food {
    #[must_use]
    pub fn new(position: Cell) -> Self {
        Self { position }
    }

    /// Spawns food in a cell not contained in `occupied`.
    ///
    /// Returns `None` when every cell of the board is occupied.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        grid: Grid,
        occupied: &HashSet<Cell>,
    ) -> Option<Self> {
        place(rng, grid, occupied).map(Self::new)
    }
}

/// Draws uniformly random cells until one outside `occupied` is found.
///
/// A full board is detected up front so the rejection loop always has a
/// free cell to land on.
#[must_use]
pub fn place<R: Rng + ?Sized>(rng: &mut R, grid: Grid, occupied: &HashSet<Cell>) -> Option<Cell> {
    let free_cells = grid
        .total_cells()
        .saturating_sub(occupied.iter().filter(|cell| grid.is_in_bounds(**cell)).count());
    if free_cells == 0 {
        return None;
    }

    let size = i32::from(grid.size());
    loop {
        let candidate = Cell {
            row: rng.gen_range(0..size),
            col: rng.gen_range(0..size),
        };
        if !occupied.contains(&candidate) {
            return Some(candidate);
        }
    }
}
