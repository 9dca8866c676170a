use serde::Serialize;

use super::error::{GameError, Result};
use super::state::Position;

/// Fixed bounds of the board, walls included.
///
/// Row and column 0 and `len - 1` are walls; only interior cells can hold
/// the snake or fruit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Grid {
    width: usize,
    height: usize,
}

impl Grid {
    /// Create a grid, rejecting sizes that leave no interior
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width < 3 || height < 3 {
            return Err(GameError::InvalidGrid { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Check if a position lies inside the walls
    pub fn is_interior(&self, pos: Position) -> bool {
        pos.x >= 1
            && pos.x <= self.width as i32 - 2
            && pos.y >= 1
            && pos.y <= self.height as i32 - 2
    }

    /// Number of cells that can be occupied
    pub fn interior_area(&self) -> usize {
        (self.width - 2) * (self.height - 2)
    }

    /// Iterate over all interior cells, row by row
    pub fn interior_cells(&self) -> impl Iterator<Item = Position> + '_ {
        (1..self.height as i32 - 1)
            .flat_map(move |y| (1..self.width as i32 - 1).map(move |x| Position::new(x, y)))
    }
}
