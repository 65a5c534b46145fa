//! Grid-lottery board sizing
//!
//! The grid lottery shows a fixed board of cells that is filled with the
//! user's items, repeats and placeholders. Only the board size lives here;
//! filling the cells is the lottery's own business.

use serde::Serialize;

/// Board sizes, smallest first
pub const GRID_SIZES: [usize; 4] = [6, 9, 12, 15];

/// Rows and columns of a lottery board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoardShape {
    pub rows: usize,
    pub columns: usize,
}

impl BoardShape {
    pub fn cells(&self) -> usize {
        self.rows * self.columns
    }
}

/// Smallest board that holds every item, capped at the largest board
pub fn determine_optimal_grid_size(item_count: usize) -> usize {
    GRID_SIZES
        .iter()
        .copied()
        .find(|&size| item_count <= size)
        .unwrap_or(GRID_SIZES[GRID_SIZES.len() - 1])
}

/// Shape of the board chosen for `item_count` items
pub fn board_shape(item_count: usize) -> BoardShape {
    match determine_optimal_grid_size(item_count) {
        6 => BoardShape { rows: 2, columns: 3 },
        9 => BoardShape { rows: 3, columns: 3 },
        12 => BoardShape { rows: 3, columns: 4 },
        _ => BoardShape { rows: 3, columns: 5 },
    }
}
