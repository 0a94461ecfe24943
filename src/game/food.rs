use rand::Rng;
use rand::rngs::ThreadRng;

use super::state::{Position, Snake};

/// Picks food cells that are not covered by the snake.
///
/// `cell_size` must be positive and divide `arena_size`; `GameConfig::validate`
/// checks both before a `Simulation` builds one.
#[derive(Debug, Clone)]
pub struct FoodPlacer<R = ThreadRng> {
    rng: R,
    cells_per_side: i32,
    cell_size: i32,
}

impl FoodPlacer<ThreadRng> {
    pub fn new(arena_size: i32, cell_size: i32) -> Self {
        Self::with_rng(arena_size, cell_size, rand::thread_rng())
    }
}

impl<R: Rng> FoodPlacer<R> {
    pub fn with_rng(arena_size: i32, cell_size: i32, rng: R) -> Self {
        Self {
            rng,
            cells_per_side: arena_size / cell_size,
            cell_size,
        }
    }

    /// Draw a random free cell.
    ///
    /// Each axis is drawn uniformly and snapped to the cell grid; a draw that
    /// lands on the snake is thrown away and retried. Loops forever if the
    /// snake covers every cell.
    pub fn relocate(&mut self, snake: &Snake) -> Position {
        loop {
            let x = self.rng.gen_range(0..self.cells_per_side) * self.cell_size;
            let y = self.rng.gen_range(0..self.cells_per_side) * self.cell_size;
            let pos = Position::new(x, y);

            if !snake.occupies(pos) {
                return pos;
            }
        }
    }
}
